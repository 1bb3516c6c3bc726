use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use dsd_core::RouteId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_routes))
        .route("/optimize", post(optimize_routes))
        .route("/:id/select", post(select_route))
}

pub async fn list_routes(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    Json(dto::RoutesResponse {
        routes: services.routes(),
        selected_route_id: services.selected_route(),
    })
    .into_response()
}

pub async fn optimize_routes(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::OptimizeRoutesRequest>,
) -> axum::response::Response {
    match services.optimize_routes(body.route_ids.as_deref()).await {
        Ok(rec) => (StatusCode::OK, Json(rec)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn select_route(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match RouteId::new(id) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.select_route(&id) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "selected_route_id": id })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
