use serde::{Deserialize, Serialize};

use dsd_ai::InventoryInsight;
use dsd_core::RouteId;
use dsd_logistics::{DeliveryEvent, RouteOption};
use dsd_messaging::Sender;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OptimizeRoutesRequest {
    /// Candidate subset in preference order; `None` means every route.
    pub route_ids: Option<Vec<RouteId>>,
}

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub sender: Sender,
    pub text: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct InsightResponse {
    pub insight: InventoryInsight,
    pub cached: bool,
}

#[derive(Debug, Serialize)]
pub struct RoutesResponse<'a> {
    pub routes: &'a [RouteOption],
    pub selected_route_id: RouteId,
}

#[derive(Debug, Serialize)]
pub struct DeliveriesResponse<'a> {
    pub deliveries: &'a [DeliveryEvent],
    pub total_value: f64,
}
