use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/messages", get(list_messages).post(post_message))
}

pub async fn list_messages(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.chat_messages())
}

pub async fn post_message(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::PostMessageRequest>,
) -> axum::response::Response {
    match services.post_message(body.sender, &body.text) {
        Ok(msg) => (StatusCode::CREATED, Json(msg)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
