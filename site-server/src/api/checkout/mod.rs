//! Checkout API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/checkout", post(handler::submit))
        .route("/api/checkout/confirmation", get(handler::confirmation))
}
