//! `dsd-core`: shared building blocks for the delivery domain.
//!
//! Pure domain primitives only (no IO, no HTTP, no remote services).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{DeliveryId, DriverId, ItemId, MessageId, RouteId};
