//! Application state: the seeded fleet, the insight cache and the advisors.
//!
//! All state is owned here and handed to handlers via `Extension`; nothing
//! lives in globals.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;

use dsd_ai::{
    AdvisorError, CompletionClient, InventoryInsight, RestockAdvisor, RouteAdvisor, RouteRecommendation,
};
use dsd_core::{DomainError, DomainResult, ItemId, RouteId};
use dsd_infra::read_model::{InsightStore, KeyedStore};
use dsd_inventory::InventoryItem;
use dsd_logistics::{DeliveryEvent, Driver, RouteOption};
use dsd_messaging::{ChatMessage, ChatThread, Sender};

use crate::fixtures;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Advisor(#[from] AdvisorError),
}

/// Result of an evaluate request: the insight and whether it came from cache.
#[derive(Debug, Clone)]
pub struct InsightLookup {
    pub insight: InventoryInsight,
    pub cached: bool,
}

pub struct AppServices {
    inventory: Vec<InventoryItem>,
    routes: Vec<RouteOption>,
    selected_route: RwLock<RouteId>,
    driver: Driver,
    deliveries: Vec<DeliveryEvent>,
    chat: Mutex<ChatThread>,
    insights: Arc<InsightStore>,
    /// One gate per item so concurrent first evaluations share one request.
    evaluating: Mutex<HashMap<ItemId, Arc<tokio::sync::Mutex<()>>>>,
    restock: RestockAdvisor,
    route_advisor: RouteAdvisor,
}

impl AppServices {
    /// Demo fleet wired to `client`, with every advisory call bounded by `timeout`.
    pub fn seeded(client: Arc<dyn CompletionClient>, timeout: Duration) -> DomainResult<Self> {
        let routes = fixtures::routes()?;
        let selected = routes
            .first()
            .map(|r| r.id().clone())
            .ok_or_else(|| DomainError::validation("at least one route is required"))?;

        Ok(Self {
            inventory: fixtures::inventory()?,
            routes,
            selected_route: RwLock::new(selected),
            driver: fixtures::driver()?,
            deliveries: fixtures::deliveries()?,
            chat: Mutex::new(ChatThread::with_history(fixtures::chat_history(Utc::now()))),
            insights: Arc::new(InsightStore::new()),
            evaluating: Mutex::new(HashMap::new()),
            restock: RestockAdvisor::new(client.clone()).with_timeout(timeout),
            route_advisor: RouteAdvisor::new(client).with_timeout(timeout),
        })
    }

    // -------------------------
    // Inventory
    // -------------------------

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn item(&self, id: &ItemId) -> DomainResult<&InventoryItem> {
        self.inventory
            .iter()
            .find(|i| i.id() == id)
            .ok_or_else(|| DomainError::not_found(format!("inventory item {id}")))
    }

    pub fn cached_insight(&self, id: &ItemId) -> Option<InventoryInsight> {
        self.insights.get(id)
    }

    pub fn insights(&self) -> Vec<InventoryInsight> {
        self.insights.list()
    }

    /// Cached insight for `id`, or evaluate it once and cache the result.
    ///
    /// Concurrent callers for the same uncached item wait for the first
    /// evaluation instead of issuing their own.
    pub async fn evaluate_item(&self, id: &ItemId) -> DomainResult<InsightLookup> {
        let item = self.item(id)?;

        if let Some(insight) = self.insights.get(id) {
            return Ok(InsightLookup { insight, cached: true });
        }

        let gate = self.evaluation_gate(id);
        let _guard = gate.lock().await;

        if let Some(insight) = self.insights.get(id) {
            return Ok(InsightLookup { insight, cached: true });
        }

        let insight = self.restock.evaluate(item).await;
        self.insights.upsert(id.clone(), insight.clone());
        Ok(InsightLookup {
            insight,
            cached: false,
        })
    }

    fn evaluation_gate(&self, id: &ItemId) -> Arc<tokio::sync::Mutex<()>> {
        self.evaluating
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(id.clone())
            .or_default()
            .clone()
    }

    // -------------------------
    // Routes
    // -------------------------

    pub fn routes(&self) -> &[RouteOption] {
        &self.routes
    }

    pub fn selected_route(&self) -> RouteId {
        match self.selected_route.read() {
            Ok(id) => id.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn select_route(&self, id: &RouteId) -> DomainResult<()> {
        if !self.routes.iter().any(|r| r.id() == id) {
            return Err(DomainError::not_found(format!("route {id}")));
        }
        self.set_selected(id.clone());
        Ok(())
    }

    /// Ask the route advisor to choose among `route_ids` (all routes when
    /// `None`), in the order given, and select the winner.
    pub async fn optimize_routes(
        &self,
        route_ids: Option<&[RouteId]>,
    ) -> Result<RouteRecommendation, ServiceError> {
        let candidates: Vec<RouteOption> = match route_ids {
            None => self.routes.clone(),
            Some(ids) => ids
                .iter()
                .map(|id| {
                    self.routes
                        .iter()
                        .find(|r| r.id() == id)
                        .cloned()
                        .ok_or_else(|| DomainError::not_found(format!("route {id}")))
                })
                .collect::<DomainResult<_>>()?,
        };

        let rec = self.route_advisor.optimize(&candidates).await?;
        self.set_selected(rec.selected_route_id.clone());
        Ok(rec)
    }

    fn set_selected(&self, id: RouteId) {
        match self.selected_route.write() {
            Ok(mut slot) => *slot = id,
            Err(poisoned) => *poisoned.into_inner() = id,
        }
    }

    // -------------------------
    // Fleet
    // -------------------------

    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    pub fn deliveries(&self) -> &[DeliveryEvent] {
        &self.deliveries
    }

    // -------------------------
    // Chat
    // -------------------------

    pub fn chat_messages(&self) -> Vec<ChatMessage> {
        self.chat
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .messages()
            .to_vec()
    }

    pub fn post_message(&self, sender: Sender, text: &str) -> DomainResult<ChatMessage> {
        self.chat
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .post(sender, text, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsd_ai::{CompletionError, StubCompletionClient, StubReply};
    use serde_json::json;

    fn services(stub: Arc<StubCompletionClient>) -> AppServices {
        AppServices::seeded(stub, Duration::from_secs(1)).unwrap()
    }

    #[tokio::test]
    async fn evaluate_item_caches_by_id() {
        let stub = Arc::new(StubCompletionClient::failing(CompletionError::AuthMissing));
        let svc = services(stub.clone());
        let id = ItemId::new("2").unwrap();

        let first = svc.evaluate_item(&id).await.unwrap();
        let second = svc.evaluate_item(&id).await.unwrap();

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.insight, second.insight);
        assert_eq!(first.insight.suggested_restock_rate, 175.0);
        assert_eq!(stub.request_count(), 1);
    }

    #[tokio::test]
    async fn concurrent_first_evaluations_share_one_request() {
        let stub = Arc::new(StubCompletionClient::always(StubReply::Delayed(
            Duration::from_millis(50),
            Box::new(StubReply::Json(json!({
                "suggestedRestockRate": 90,
                "reasoning": "Fast mover.",
                "urgent": true
            }))),
        )));
        let svc = services(stub.clone());
        let id = ItemId::new("2").unwrap();

        let (a, b) = tokio::join!(svc.evaluate_item(&id), svc.evaluate_item(&id));
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_eq!(stub.request_count(), 1);
        assert_eq!(a.insight, b.insight);
        assert_ne!(a.cached, b.cached);
        assert_eq!(svc.insights().len(), 1);
    }

    #[tokio::test]
    async fn evaluate_unknown_item_is_not_found() {
        let svc = services(Arc::new(StubCompletionClient::failing(CompletionError::AuthMissing)));
        let err = svc.evaluate_item(&ItemId::new("nope").unwrap()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn optimize_selects_the_recommended_route() {
        let stub = Arc::new(StubCompletionClient::json(json!({
            "selectedRouteId": "route-c",
            "reasoning": "Avoids the city center."
        })));
        let svc = services(stub);
        assert_eq!(svc.selected_route().as_str(), "route-a");

        let rec = svc.optimize_routes(None).await.unwrap();
        assert_eq!(rec.selected_route_id.as_str(), "route-c");
        assert_eq!(svc.selected_route().as_str(), "route-c");
    }

    #[tokio::test]
    async fn optimize_subset_respects_order_and_rejects_empty() {
        let svc = services(Arc::new(StubCompletionClient::failing(CompletionError::Timeout)));

        let ids = vec![RouteId::new("route-b").unwrap(), RouteId::new("route-a").unwrap()];
        let rec = svc.optimize_routes(Some(ids.as_slice())).await.unwrap();
        assert_eq!(rec.selected_route_id.as_str(), "route-b");

        let err = svc.optimize_routes(Some(Vec::new().as_slice())).await.unwrap_err();
        assert!(matches!(err, ServiceError::Advisor(AdvisorError::InvalidInput(_))));

        let unknown = vec![RouteId::new("route-z").unwrap()];
        let err = svc.optimize_routes(Some(unknown.as_slice())).await.unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::NotFound(_))));
    }

    #[test]
    fn post_message_appends_to_seeded_history() {
        let svc = services(Arc::new(StubCompletionClient::failing(CompletionError::AuthMissing)));
        let before = svc.chat_messages().len();

        svc.post_message(Sender::Driver, "Arrived.").unwrap();
        assert!(svc.post_message(Sender::Vendor, " ").is_err());

        let after = svc.chat_messages();
        assert_eq!(after.len(), before + 1);
        assert_eq!(after.last().unwrap().text, "Arrived.");
    }
}
