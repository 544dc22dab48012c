//! Cart API Handlers
//!
//! 会话标识解析顺序：请求体/查询参数 > `cart_session_id` Cookie > 新生成。
//! 每个携带会话的响应都会重新下发 Cookie (延长 30 天有效期)。

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use shared::ApiResponse;
use shared::models::{CartLineCreate, CartLineUpdate};
use uuid::Uuid;

use crate::cart;
use crate::core::ServerState;
use crate::session::{session_cookie, session_from_cookies};
use crate::utils::{AppError, AppResult, ok, ok_message};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityQuery {
    pub session_id: Option<String>,
    pub user_id: Option<String>,
}

impl IdentityQuery {
    /// Effective session: explicit query value wins over the cookie.
    fn resolve_session(&self, headers: &HeaderMap) -> Option<String> {
        self.session_id
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| session_from_cookies(headers))
    }
}

/// GET /api/cart - 获取当前会话/用户的购物车
///
/// 购物车严格按身份隔离：没有任何身份时拒绝，绝不返回全量行。
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<IdentityQuery>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let session_id = query.resolve_session(&headers);
    if session_id.is_none() && query.user_id.is_none() {
        return Err(AppError::validation("Session ID or User ID is required"));
    }
    let lines = cart::list(
        &state.pool,
        session_id.as_deref(),
        query.user_id.as_deref(),
    )
    .await?;

    let sid = session_id.unwrap_or_else(new_session_id);
    Ok((session_cookie(&sid), ok(lines)))
}

/// POST /api/cart - 添加菜品 (同键合并)
pub async fn add(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(mut payload): Json<CartLineCreate>,
) -> AppResult<impl IntoResponse> {
    if payload.session_id.trim().is_empty() {
        payload.session_id = session_from_cookies(&headers).unwrap_or_else(new_session_id);
    }
    let session_id = payload.session_id.clone();

    let line = cart::add(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, session_cookie(&session_id), ok(line)))
}

/// DELETE /api/cart - 清空购物车 (需要 sessionId 或 userId)
pub async fn clear(
    State(state): State<ServerState>,
    Query(query): Query<IdentityQuery>,
    headers: HeaderMap,
) -> AppResult<Json<ApiResponse<()>>> {
    let session_id = query.resolve_session(&headers);
    cart::clear(
        &state.pool,
        session_id.as_deref(),
        query.user_id.as_deref(),
    )
    .await?;
    Ok(ok_message("Cart cleared"))
}

/// GET /api/cart/summary - 实时合计和件数
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<IdentityQuery>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let session_id = query.resolve_session(&headers);
    if session_id.is_none() && query.user_id.is_none() {
        return Err(AppError::validation("Session ID or User ID is required"));
    }
    let summary = cart::summary(
        &state.pool,
        session_id.as_deref(),
        query.user_id.as_deref(),
    )
    .await?;
    Ok(ok(summary))
}

/// GET /api/cart/:id - 获取单行
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let line = crate::db::repository::cart::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Cart item"))?;
    Ok(ok(line))
}

/// PUT /api/cart/:id - 更新数量/餐厅/日期
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CartLineUpdate>,
) -> AppResult<impl IntoResponse> {
    let line = cart::update(&state.pool, id, payload).await?;
    Ok(ok(line))
}

/// DELETE /api/cart/:id - 删除单行
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    cart::remove(&state.pool, id).await?;
    Ok(ok_message("Cart item removed"))
}

fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}
