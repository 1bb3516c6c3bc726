use axum::Router;

pub mod chat;
pub mod fleet;
pub mod inventory;
pub mod planning;
pub mod system;

/// Router for all fleet endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/inventory", inventory::router())
        .nest("/routes", planning::router())
        .nest("/chat", chat::router())
        .merge(fleet::router())
}
