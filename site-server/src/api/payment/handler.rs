//! Payment API Handlers

use axum::{Json, extract::State};
use shared::ApiResponse;
use shared::models::{PaymentIntent, PaymentRequest};

use crate::core::ServerState;
use crate::payment::{self, PaymentError};
use crate::utils::{AppError, AppResult, ok};

/// POST /api/payment - 模拟支付处理
///
/// 拒付返回 402 和固定 `card_declined` 错误码，其余校验失败返回 400。
pub async fn process(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentRequest>,
) -> AppResult<Json<ApiResponse<PaymentIntent>>> {
    let intent = payment::process(
        &payload,
        state.config.payment_failure_rate,
        state.config.payment_delay_ms,
    )
    .await
    .map_err(|e| match e {
        PaymentError::Declined => AppError::payment_declined(e.to_string()),
        other => AppError::validation(other.to_string()),
    })?;
    Ok(ok(intent))
}
