use serde::{Deserialize, Serialize};

use dsd_core::DriverId;

/// What the driver is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverStatus {
    Driving,
    Delivering,
    Idle,
}

/// A WGS84 coordinate (mock position; no live tracking).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Driver status card shown on the vendor's live map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub current_location: GeoPoint,
    pub status: DriverStatus,
    pub next_stop: String,
    /// Display string, e.g. `"10:45 AM"`.
    pub eta: String,
}
