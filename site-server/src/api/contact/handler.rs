//! Contact API Handlers

use axum::{Json, extract::State};
use serde::Serialize;
use shared::ApiResponse;

use crate::core::ServerState;
use crate::email::ContactMessage;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_email_field, validate_required_text,
};
use crate::utils::{AppResult, ok, ok_message};

/// POST /api/contact - 提交联系表单
///
/// 邮箱统一小写存储转发；SMTP 未配置时仍然受理 (仅记录日志)。
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<ContactMessage>,
) -> AppResult<Json<ApiResponse<()>>> {
    validate_required_text(&payload.full_name, "fullName", MAX_NAME_LEN)?;
    validate_email_field(&payload.email, "email")?;
    validate_required_text(&payload.subject, "subject", MAX_NAME_LEN)?;
    validate_required_text(&payload.message, "message", MAX_NOTE_LEN)?;

    let payload = payload.normalized();
    state.email.send_contact(&payload).await?;

    Ok(ok_message(
        "Your message has been sent successfully. We will get back to you soon!",
    ))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactStatus {
    email_enabled: bool,
}

/// GET /api/contact - 邮件服务状态
pub async fn status(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<ContactStatus>>> {
    Ok(ok(ContactStatus {
        email_enabled: state.email.is_enabled(),
    }))
}
