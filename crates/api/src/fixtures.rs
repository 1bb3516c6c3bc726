//! Demo fleet data the server starts with.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use dsd_core::{DeliveryId, DomainError, DomainResult, DriverId, ItemId, MessageId, RouteId};
use dsd_inventory::{InventoryItem, NewInventoryItem};
use dsd_logistics::{
    DeliveryEvent, Driver, DriverStatus, GeoPoint, NewRouteOption, RouteOption, TrafficCondition,
    WeatherCondition,
};
use dsd_messaging::{ChatMessage, Sender};

fn date(y: i32, m: u32, d: u32) -> DomainResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| DomainError::validation(format!("invalid date {y}-{m}-{d}")))
}

fn item(
    id: &str,
    name: &str,
    category: &str,
    current_stock: u32,
    sales_velocity: f64,
    last_restock_date: NaiveDate,
) -> DomainResult<InventoryItem> {
    InventoryItem::new(NewInventoryItem {
        id: ItemId::new(id)?,
        name: name.to_string(),
        category: category.to_string(),
        current_stock,
        sales_velocity,
        last_restock_date,
    })
}

pub fn inventory() -> DomainResult<Vec<InventoryItem>> {
    Ok(vec![
        item("1", "Sparkling Water (Lemon)", "Beverage", 45, 12.0, date(2023, 10, 1)?)?,
        item("2", "Energy Drink X", "Beverage", 12, 25.0, date(2023, 10, 5)?)?,
        item("3", "Potato Chips (Sea Salt)", "Snack", 80, 8.0, date(2023, 9, 28)?)?,
        item("4", "Protein Bar (Chocolate)", "Snack", 150, 5.0, date(2023, 10, 10)?)?,
    ])
}

fn route(
    id: &str,
    name: &str,
    distance_km: f64,
    estimated_time_min: u32,
    traffic: TrafficCondition,
    weather: WeatherCondition,
    fuel_cost_estimate: f64,
) -> DomainResult<RouteOption> {
    RouteOption::new(NewRouteOption {
        id: RouteId::new(id)?,
        name: name.to_string(),
        distance_km,
        estimated_time_min,
        traffic,
        weather,
        fuel_cost_estimate,
    })
}

pub fn routes() -> DomainResult<Vec<RouteOption>> {
    use TrafficCondition::*;
    use WeatherCondition::*;

    Ok(vec![
        route("route-a", "Highway Route 101", 45.0, 40, Clear, Sunny, 12.50)?,
        route("route-b", "City Center (Shortest Distance)", 32.0, 55, Heavy, Sunny, 10.00)?,
        route("route-c", "Scenic Coastal Road", 50.0, 45, Moderate, Rainy, 14.00)?,
    ])
}

pub fn driver() -> DomainResult<Driver> {
    Ok(Driver {
        id: DriverId::new("d-1")?,
        name: "John Doe".to_string(),
        current_location: GeoPoint {
            lat: 34.0522,
            lng: -118.2437,
        },
        status: DriverStatus::Driving,
        next_stop: "7-Eleven #4205".to_string(),
        eta: "10:45 AM".to_string(),
    })
}

fn delivery(
    id: &str,
    destination: &str,
    departure_time: &str,
    eta: &str,
    items_count: u32,
    total_value: f64,
) -> DomainResult<DeliveryEvent> {
    Ok(DeliveryEvent {
        id: DeliveryId::new(id)?,
        destination: destination.to_string(),
        departure_time: departure_time.to_string(),
        eta: eta.to_string(),
        items_count,
        total_value,
    })
}

pub fn deliveries() -> DomainResult<Vec<DeliveryEvent>> {
    Ok(vec![
        delivery("evt-1", "Main St Market", "08:00 AM", "08:45 AM", 120, 450.00)?,
        delivery("evt-2", "Downtown Grocery", "10:00 AM", "10:30 AM", 50, 210.50)?,
        delivery("evt-3", "Westside Bodega", "01:00 PM", "01:50 PM", 200, 800.00)?,
    ])
}

/// Opening conversation, timestamped relative to `now`.
pub fn chat_history(now: DateTime<Utc>) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            id: MessageId::generate(),
            sender: Sender::Vendor,
            text: "Hey, update on the Main St delivery?".to_string(),
            timestamp: now - Duration::minutes(60),
        },
        ChatMessage {
            id: MessageId::generate(),
            sender: Sender::Driver,
            text: "Stuck in slight traffic, but should be there in 15.".to_string(),
            timestamp: now - Duration::minutes(58),
        },
    ]
}
