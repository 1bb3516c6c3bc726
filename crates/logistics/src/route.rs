use serde::{Deserialize, Serialize};

use dsd_core::{DomainError, DomainResult, RouteId};

/// Traffic along a route at planning time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficCondition {
    Clear,
    Moderate,
    Heavy,
}

/// Weather along a route at planning time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Sunny,
    Rainy,
    Stormy,
}

/// Unvalidated fields of a route candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRouteOption {
    pub id: RouteId,
    pub name: String,
    pub distance_km: f64,
    pub estimated_time_min: u32,
    pub traffic: TrafficCondition,
    pub weather: WeatherCondition,
    pub fuel_cost_estimate: f64,
}

/// One candidate route a driver may take.
///
/// Invariants: `distance_km > 0`, `estimated_time_min > 0`,
/// `fuel_cost_estimate >= 0`, all numbers finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NewRouteOption")]
pub struct RouteOption {
    id: RouteId,
    name: String,
    distance_km: f64,
    estimated_time_min: u32,
    traffic: TrafficCondition,
    weather: WeatherCondition,
    fuel_cost_estimate: f64,
}

impl RouteOption {
    pub fn new(fields: NewRouteOption) -> DomainResult<Self> {
        if fields.name.trim().is_empty() {
            return Err(DomainError::validation("route name cannot be empty"));
        }
        if !(fields.distance_km.is_finite() && fields.distance_km > 0.0) {
            return Err(DomainError::validation("distance_km must be positive"));
        }
        if fields.estimated_time_min == 0 {
            return Err(DomainError::validation("estimated_time_min must be positive"));
        }
        if !(fields.fuel_cost_estimate.is_finite() && fields.fuel_cost_estimate >= 0.0) {
            return Err(DomainError::validation(
                "fuel_cost_estimate must be a finite, non-negative amount",
            ));
        }

        Ok(Self {
            id: fields.id,
            name: fields.name,
            distance_km: fields.distance_km,
            estimated_time_min: fields.estimated_time_min,
            traffic: fields.traffic,
            weather: fields.weather,
            fuel_cost_estimate: fields.fuel_cost_estimate,
        })
    }

    pub fn id(&self) -> &RouteId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn estimated_time_min(&self) -> u32 {
        self.estimated_time_min
    }

    pub fn traffic(&self) -> TrafficCondition {
        self.traffic
    }

    pub fn weather(&self) -> WeatherCondition {
        self.weather
    }

    pub fn fuel_cost_estimate(&self) -> f64 {
        self.fuel_cost_estimate
    }
}

impl TryFrom<NewRouteOption> for RouteOption {
    type Error = DomainError;

    fn try_from(value: NewRouteOption) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> NewRouteOption {
        NewRouteOption {
            id: RouteId::new("route-a").unwrap(),
            name: "Highway Route 101".to_string(),
            distance_km: 45.0,
            estimated_time_min: 40,
            traffic: TrafficCondition::Clear,
            weather: WeatherCondition::Sunny,
            fuel_cost_estimate: 12.5,
        }
    }

    #[test]
    fn new_accepts_valid_route() {
        let route = RouteOption::new(fields()).unwrap();
        assert_eq!(route.id().as_str(), "route-a");
        assert_eq!(route.traffic(), TrafficCondition::Clear);
    }

    #[test]
    fn new_rejects_non_positive_distance_and_time() {
        let mut f = fields();
        f.distance_km = 0.0;
        assert!(RouteOption::new(f).is_err());

        let mut f = fields();
        f.estimated_time_min = 0;
        assert!(RouteOption::new(f).is_err());
    }

    #[test]
    fn new_rejects_negative_fuel_cost() {
        let mut f = fields();
        f.fuel_cost_estimate = -1.0;
        match RouteOption::new(f).unwrap_err() {
            DomainError::Validation(_) => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn conditions_serialize_lowercase() {
        let route = RouteOption::new(fields()).unwrap();
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json["traffic"], "clear");
        assert_eq!(json["weather"], "sunny");
        assert_eq!(json["id"], "route-a");
    }
}
