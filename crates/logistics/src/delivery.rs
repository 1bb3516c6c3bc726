use serde::{Deserialize, Serialize};

use dsd_core::DeliveryId;

/// One stop on the vendor's delivery calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryEvent {
    pub id: DeliveryId,
    pub destination: String,
    pub departure_time: String,
    pub eta: String,
    pub items_count: u32,
    pub total_value: f64,
}

/// Sum of the goods value across a schedule.
pub fn scheduled_value(events: &[DeliveryEvent]) -> f64 {
    events.iter().map(|e| e.total_value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn event(id: &str, value: f64) -> DeliveryEvent {
        DeliveryEvent {
            id: DeliveryId::new(id).unwrap(),
            destination: "Main St Market".to_string(),
            departure_time: "08:00 AM".to_string(),
            eta: "08:45 AM".to_string(),
            items_count: 120,
            total_value: value,
        }
    }

    #[test]
    fn scheduled_value_of_empty_schedule_is_zero() {
        assert_eq!(scheduled_value(&[]), 0.0);
    }

    #[test]
    fn scheduled_value_sums_events() {
        let events = vec![event("evt-1", 450.0), event("evt-2", 210.5)];
        assert!((scheduled_value(&events) - 660.5).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn scheduled_value_is_never_below_the_largest_event(values in proptest::collection::vec(0.0f64..1_000.0, 1..8)) {
            let events: Vec<_> = values
                .iter()
                .enumerate()
                .map(|(i, v)| event(&format!("evt-{i}"), *v))
                .collect();
            let max = values.iter().cloned().fold(0.0, f64::max);
            prop_assert!(scheduled_value(&events) + 1e-9 >= max);
        }
    }
}
