use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use dsd_core::ItemId;
use dsd_inventory::InventoryItem;

use crate::completion::{
    CompletionClient, CompletionRequest, DEFAULT_TIMEOUT, FieldKind, ResponseSchema, complete_within,
};
use crate::result::{AdviceFailure, AdviceSource};

/// Days of sales velocity covered by the fallback order.
pub const FALLBACK_COVER_DAYS: f64 = 7.0;

pub const FALLBACK_REASONING: &str =
    "AI analysis unavailable. Defaulting to weekly velocity calculation.";

/// Restock recommendation for one inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryInsight {
    /// Always the id of the item the insight was computed for.
    pub item_id: ItemId,
    pub suggested_restock_rate: f64,
    pub reasoning: String,
    pub urgent: bool,
    pub source: AdviceSource,
}

impl InventoryInsight {
    /// One week of sales velocity, never urgent. Saturates at `f64::MAX`.
    pub fn fallback(item: &InventoryItem, failure: AdviceFailure) -> Self {
        Self {
            item_id: item.id().clone(),
            suggested_restock_rate: (item.sales_velocity() * FALLBACK_COVER_DAYS).min(f64::MAX),
            reasoning: FALLBACK_REASONING.to_string(),
            urgent: false,
            source: AdviceSource::Fallback(failure),
        }
    }
}

/// Model answer, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RestockPayload {
    suggested_restock_rate: f64,
    reasoning: String,
    urgent: bool,
    /// Ignored beyond logging, so any JSON type is accepted.
    #[serde(default)]
    item_id: Option<JsonValue>,
}

/// Suggests how many units to order next for an item.
#[derive(Clone)]
pub struct RestockAdvisor {
    client: Arc<dyn CompletionClient>,
    timeout: Duration,
}

impl RestockAdvisor {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Evaluate one item. Never fails: any remote problem yields
    /// [`InventoryInsight::fallback`].
    pub async fn evaluate(&self, item: &InventoryItem) -> InventoryInsight {
        let request = CompletionRequest::new(restock_prompt(item), restock_schema());
        debug!(item_id = %item.id(), prompt = %request.prompt, "requesting restock advice");

        let outcome = match complete_within(self.client.as_ref(), &request, self.timeout).await {
            Ok(value) => parse_insight(item, value),
            Err(e) => Err(AdviceFailure::from(e)),
        };

        match outcome {
            Ok(insight) => {
                info!(
                    item_id = %insight.item_id,
                    suggested_restock_rate = insight.suggested_restock_rate,
                    urgent = insight.urgent,
                    "restock advice produced"
                );
                insight
            }
            Err(failure) => {
                warn!(item_id = %item.id(), error = %failure, "restock advice unavailable; using weekly velocity");
                InventoryInsight::fallback(item, failure)
            }
        }
    }
}

pub fn restock_prompt(item: &InventoryItem) -> String {
    format!(
        "Analyze this product for a DSD (Direct Store Delivery) vendor.\n\
         Product: {name}\n\
         Category: {category}\n\
         Current Stock: {stock}\n\
         Last Restock: {last}\n\
         Sales Velocity: {velocity} units/day.\n\
         \n\
         Determine if we should increase the restock rate and provide a reasoning.\n\
         Return JSON.",
        name = item.name(),
        category = item.category(),
        stock = item.current_stock(),
        last = item.last_restock_date(),
        velocity = item.sales_velocity(),
    )
}

pub fn restock_schema() -> ResponseSchema {
    ResponseSchema::new()
        .required(
            "suggestedRestockRate",
            FieldKind::Number,
            Some("Suggested units to order next time"),
        )
        .required("reasoning", FieldKind::String, Some("Why this amount is recommended"))
        .required("urgent", FieldKind::Boolean, Some("Is stock critically low?"))
        .optional("itemId", FieldKind::String, Some("Return the exact input item ID"))
}

fn parse_insight(item: &InventoryItem, value: JsonValue) -> Result<InventoryInsight, AdviceFailure> {
    let payload: RestockPayload = serde_json::from_value(value)
        .map_err(|e| AdviceFailure::MalformedResponse(e.to_string()))?;

    let rate = payload.suggested_restock_rate;
    if !(rate.is_finite() && rate >= 0.0) {
        return Err(AdviceFailure::MalformedResponse(format!(
            "suggestedRestockRate must be a non-negative number, got {rate}"
        )));
    }

    let reasoning = payload.reasoning.trim();
    if reasoning.is_empty() {
        return Err(AdviceFailure::MalformedResponse("reasoning is empty".to_string()));
    }

    // The model's claimed id is ignored; the insight belongs to the requested item.
    if let Some(claimed) = payload
        .item_id
        .filter(|c| c.as_str() != Some(item.id().as_str()))
    {
        debug!(item_id = %item.id(), %claimed, "model returned a different item id; overriding");
    }

    Ok(InventoryInsight {
        item_id: item.id().clone(),
        suggested_restock_rate: rate,
        reasoning: reasoning.to_string(),
        urgent: payload.urgent,
        source: AdviceSource::Ai,
    })
}
