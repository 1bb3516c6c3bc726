use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use dsd_core::ItemId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/items", get(list_items))
        .route("/items/:id", get(get_item))
        .route("/items/:id/insight", get(get_insight).post(evaluate_item))
        .route("/insights", get(list_insights))
}

fn parse_item_id(id: String) -> Result<ItemId, axum::response::Response> {
    ItemId::new(id).map_err(errors::domain_error_to_response)
}

pub async fn list_items(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.inventory().to_vec())
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_item_id(id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.item(&id) {
        Ok(item) => (StatusCode::OK, Json(item.clone())).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Evaluate an item once per session; repeated calls return the cached insight.
pub async fn evaluate_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_item_id(id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.evaluate_item(&id).await {
        Ok(lookup) => (
            StatusCode::OK,
            Json(dto::InsightResponse {
                insight: lookup.insight,
                cached: lookup.cached,
            }),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_insight(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_item_id(id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    if let Err(e) = services.item(&id) {
        return errors::domain_error_to_response(e);
    }

    match services.cached_insight(&id) {
        Some(insight) => (
            StatusCode::OK,
            Json(dto::InsightResponse {
                insight,
                cached: true,
            }),
        )
            .into_response(),
        None => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("no insight computed yet for item {id}"),
        ),
    }
}

pub async fn list_insights(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.insights())
}
