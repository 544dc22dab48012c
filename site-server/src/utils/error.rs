//! 统一错误处理
//!
//! 提供应用级错误类型和响应封装：
//! - [`AppError`] - 应用错误枚举
//! - 所有错误以 `{success: false, error: "..."}` 信封返回
//!
//! # 错误分级
//!
//! | 分类 | 状态码 | 说明 |
//! |------|--------|------|
//! | Validation / Invalid | 400 | 请求校验失败 |
//! | PaymentDeclined | 402 | 模拟支付拒绝 (code: card_declined) |
//! | NotFound | 404 | 资源不存在 |
//! | Conflict | 409 | 资源冲突/重复 |
//! | Database / Internal | 500 | 系统错误 (仅记录日志，不暴露细节) |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::ApiResponse;
use tracing::error;

use crate::db::repository::RepoError;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    #[error("Invalid request: {0}")]
    Invalid(String),

    // ========== 系统错误 (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Declines carry a fixed machine-readable code next to the
        // human-readable message.
        if let AppError::PaymentDeclined(msg) = &self {
            let body = serde_json::json!({
                "success": false,
                "error": msg,
                "code": "card_declined",
            });
            return (StatusCode::PAYMENT_REQUIRED, Json(body)).into_response();
        }

        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) | AppError::Invalid(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            // handled above
            AppError::PaymentDeclined(msg) => (StatusCode::PAYMENT_REQUIRED, msg.clone()),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(format!("{} not found", resource.into()))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn payment_declined(message: impl Into<String>) -> Self {
        Self::PaymentDeclined(message.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

// ========== Helper functions ==========

/// Create a successful response envelope
pub fn ok<T: serde::Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// Create a successful data-less response with a message
pub fn ok_message<T: serde::Serialize>(message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success_message(message))
}
