use std::sync::Arc;

use axum::{Json, Router, extract::Extension, response::IntoResponse, routing::get};

use dsd_logistics::scheduled_value;

use crate::app::dto;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/driver", get(get_driver))
        .route("/deliveries", get(list_deliveries))
}

pub async fn get_driver(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.driver().clone())
}

pub async fn list_deliveries(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let deliveries = services.deliveries();
    Json(dto::DeliveriesResponse {
        deliveries,
        total_value: scheduled_value(deliveries),
    })
    .into_response()
}
