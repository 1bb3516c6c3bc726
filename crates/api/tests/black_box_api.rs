use std::sync::Arc;
use std::time::Duration;

use dsd_ai::{CompletionError, StubCompletionClient};
use dsd_api::app::{build_app, services::AppServices};
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(stub: Arc<StubCompletionClient>) -> Self {
        // Same router as prod, with a scripted completion client and an ephemeral port.
        let services = AppServices::seeded(stub, Duration::from_millis(500)).expect("seed data is valid");
        let app = build_app(Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn offline() -> Arc<StubCompletionClient> {
    Arc::new(StubCompletionClient::failing(CompletionError::AuthMissing))
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn(offline()).await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn inventory_lists_seeded_items() {
    let srv = TestServer::spawn(offline()).await;
    let client = reqwest::Client::new();

    let items: serde_json::Value = client
        .get(srv.url("/inventory/items"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(items.as_array().unwrap().len(), 4);

    let item: serde_json::Value = client
        .get(srv.url("/inventory/items/2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(item["name"], "Energy Drink X");

    let res = client.get(srv.url("/inventory/items/99")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn evaluate_falls_back_and_caches_per_item() {
    let stub = offline();
    let srv = TestServer::spawn(stub.clone()).await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/inventory/items/2/insight")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let first: serde_json::Value = client
        .post(srv.url("/inventory/items/2/insight"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first["cached"], false);
    assert_eq!(first["insight"]["item_id"], "2");
    assert_eq!(first["insight"]["suggested_restock_rate"], 175.0);
    assert_eq!(first["insight"]["urgent"], false);
    assert_eq!(first["insight"]["source"]["kind"], "fallback");

    let second: serde_json::Value = client
        .post(srv.url("/inventory/items/2/insight"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second["cached"], true);
    assert_eq!(second["insight"], first["insight"]);
    assert_eq!(stub.request_count(), 1);

    let cached: serde_json::Value = client
        .get(srv.url("/inventory/items/2/insight"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cached["insight"], first["insight"]);

    let all: serde_json::Value = client
        .get(srv.url("/inventory/insights"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn evaluate_uses_model_answer_when_valid() {
    let stub = Arc::new(StubCompletionClient::json(json!({
        "suggestedRestockRate": 60,
        "reasoning": "Low stock against fast sales.",
        "urgent": true,
        "itemId": "something-else"
    })));
    let srv = TestServer::spawn(stub).await;

    let body: serde_json::Value = reqwest::Client::new()
        .post(srv.url("/inventory/items/2/insight"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["insight"]["item_id"], "2");
    assert_eq!(body["insight"]["suggested_restock_rate"], 60.0);
    assert_eq!(body["insight"]["urgent"], true);
    assert_eq!(body["insight"]["source"]["kind"], "ai");
}

#[tokio::test]
async fn optimize_rejects_hallucinated_route_and_selects_first() {
    let stub = Arc::new(StubCompletionClient::json(json!({
        "selectedRouteId": "route-zzz",
        "reasoning": "Made up."
    })));
    let srv = TestServer::spawn(stub).await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/routes/optimize"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let rec: serde_json::Value = res.json().await.unwrap();
    assert_eq!(rec["selected_route_id"], "route-a");
    assert_eq!(rec["source"]["kind"], "fallback");
    assert_eq!(rec["source"]["reason"]["kind"], "validation_failure");

    let routes: serde_json::Value = client
        .get(srv.url("/routes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(routes["routes"].as_array().unwrap().len(), 3);
    assert_eq!(routes["selected_route_id"], "route-a");
}

#[tokio::test]
async fn optimize_selects_recommended_route() {
    let stub = Arc::new(StubCompletionClient::json(json!({
        "selectedRouteId": "route-c",
        "reasoning": "Moderate traffic beats the jam downtown."
    })));
    let srv = TestServer::spawn(stub).await;
    let client = reqwest::Client::new();

    let rec: serde_json::Value = client
        .post(srv.url("/routes/optimize"))
        .json(&json!({ "route_ids": ["route-b", "route-c"] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(rec["selected_route_id"], "route-c");
    assert_eq!(rec["source"]["kind"], "ai");

    let routes: serde_json::Value = client
        .get(srv.url("/routes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(routes["selected_route_id"], "route-c");
}

#[tokio::test]
async fn optimize_input_errors() {
    let stub = offline();
    let srv = TestServer::spawn(stub.clone()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/routes/optimize"))
        .json(&json!({ "route_ids": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_input");

    let res = client
        .post(srv.url("/routes/optimize"))
        .json(&json!({ "route_ids": ["route-q"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    assert_eq!(stub.request_count(), 0);
}

#[tokio::test]
async fn manual_route_selection() {
    let srv = TestServer::spawn(offline()).await;
    let client = reqwest::Client::new();

    let res = client.post(srv.url("/routes/route-b/select")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let routes: serde_json::Value = client
        .get(srv.url("/routes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(routes["selected_route_id"], "route-b");

    let res = client.post(srv.url("/routes/route-x/select")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn driver_and_deliveries() {
    let srv = TestServer::spawn(offline()).await;
    let client = reqwest::Client::new();

    let driver: serde_json::Value = client
        .get(srv.url("/driver"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(driver["name"], "John Doe");

    let deliveries: serde_json::Value = client
        .get(srv.url("/deliveries"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(deliveries["deliveries"].as_array().unwrap().len(), 3);
    assert_eq!(deliveries["total_value"], 1460.5);
}

#[tokio::test]
async fn chat_post_and_list() {
    let srv = TestServer::spawn(offline()).await;
    let client = reqwest::Client::new();

    let before: serde_json::Value = client
        .get(srv.url("/chat/messages"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let before = before.as_array().unwrap().len();

    let res = client
        .post(srv.url("/chat/messages"))
        .json(&json!({ "sender": "vendor", "text": "  Need two more cases.  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let msg: serde_json::Value = res.json().await.unwrap();
    assert_eq!(msg["text"], "Need two more cases.");
    assert_eq!(msg["sender"], "vendor");

    let res = client
        .post(srv.url("/chat/messages"))
        .json(&json!({ "sender": "driver", "text": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let after: serde_json::Value = client
        .get(srv.url("/chat/messages"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after.as_array().unwrap().len(), before + 1);
}
