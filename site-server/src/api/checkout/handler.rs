//! Checkout API Handlers

use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
    response::IntoResponse,
};
use serde::Deserialize;
use shared::ApiResponse;
use shared::models::{CheckoutRequest, Order};

use crate::checkout;
use crate::core::ServerState;
use crate::session::{session_cookie, session_from_cookies};
use crate::utils::{AppError, AppResult, ok};

/// POST /api/checkout - 提交结账
///
/// 成功后购物车被清空，订单停放在交接存储中等待确认页取走。
pub async fn submit(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(mut payload): Json<CheckoutRequest>,
) -> AppResult<impl IntoResponse> {
    if payload.session_id.trim().is_empty()
        && let Some(sid) = session_from_cookies(&headers)
    {
        payload.session_id = sid;
    }
    let session_id = payload.session_id.clone();

    let order = checkout::run(&state, payload).await?;
    Ok((session_cookie(&session_id), ok(order)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationQuery {
    pub session_id: Option<String>,
}

/// GET /api/checkout/confirmation?sessionId=xxx - 取走订单 (一次性)
///
/// 同一订单第二次请求返回 404，确认页据此跳转回首页。
pub async fn confirmation(
    State(state): State<ServerState>,
    Query(query): Query<ConfirmationQuery>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<Order>>> {
    let session_id = query
        .session_id
        .filter(|s| !s.is_empty())
        .or_else(|| session_from_cookies(&headers))
        .ok_or_else(|| AppError::validation("Session ID is required"))?;

    let order = state
        .handoff
        .take(&session_id)
        .ok_or_else(|| AppError::not_found("Order"))?;
    Ok(ok(order))
}
