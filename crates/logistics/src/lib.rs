//! Logistics domain module: route candidates, drivers and the delivery schedule.
//!
//! Plain validated values; route-finding and map rendering are out of scope.

pub mod delivery;
pub mod driver;
pub mod route;

pub use delivery::{DeliveryEvent, scheduled_value};
pub use driver::{Driver, DriverStatus, GeoPoint};
pub use route::{NewRouteOption, RouteOption, TrafficCondition, WeatherCondition};
