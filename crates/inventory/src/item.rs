use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use dsd_core::{DomainError, DomainResult, ItemId};

/// Unvalidated fields of an inventory item (deserialization / seeding input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub current_stock: u32,
    /// Units sold per day.
    pub sales_velocity: f64,
    pub last_restock_date: NaiveDate,
}

/// A product stocked at a store by the vendor.
///
/// Immutable once constructed; every instance upholds:
/// - `name` is not blank
/// - `sales_velocity` is finite and `>= 0`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NewInventoryItem")]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    category: String,
    current_stock: u32,
    sales_velocity: f64,
    last_restock_date: NaiveDate,
}

impl InventoryItem {
    pub fn new(fields: NewInventoryItem) -> DomainResult<Self> {
        if fields.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if !(fields.sales_velocity.is_finite() && fields.sales_velocity >= 0.0) {
            return Err(DomainError::validation(
                "sales_velocity must be a finite, non-negative number",
            ));
        }

        Ok(Self {
            id: fields.id,
            name: fields.name,
            category: fields.category,
            current_stock: fields.current_stock,
            sales_velocity: fields.sales_velocity,
            last_restock_date: fields.last_restock_date,
        })
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn current_stock(&self) -> u32 {
        self.current_stock
    }

    pub fn sales_velocity(&self) -> f64 {
        self.sales_velocity
    }

    pub fn last_restock_date(&self) -> NaiveDate {
        self.last_restock_date
    }
}

impl TryFrom<NewInventoryItem> for InventoryItem {
    type Error = DomainError;

    fn try_from(value: NewInventoryItem) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
