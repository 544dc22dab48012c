//! Reservation API Handlers
//!
//! `date` 在线上以字符串传输 ("YYYY-MM-DD" 或 RFC 3339)，存储为 UTC 毫秒。
//! `?date=YYYY-MM-DD` 过滤匹配该自然日内的所有预订 (半开区间)。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use shared::ApiResponse;
use shared::models::{ReservationCreate, ReservationUpdate, ReservationWithRestaurant};

use crate::core::ServerState;
use crate::db::repository::{
    reservation::{self, ReservationFilter},
    restaurant,
};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_email_field, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ok, ok_message};

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub restaurant_id: Option<i64>,
    pub status: Option<String>,
    pub email: Option<String>,
    /// 自然日过滤, "YYYY-MM-DD"
    pub date: Option<String>,
}

/// Parse a reservation date string into UTC millis.
/// Accepts RFC 3339 or a bare "YYYY-MM-DD" (midnight UTC).
fn parse_date_millis(value: &str) -> Result<i64, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.timestamp_millis());
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::validation("Invalid date format"))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::validation("Invalid date format"))?;
    Ok(midnight.and_utc().timestamp_millis())
}

/// GET /api/reservations - 获取预订列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<ReservationWithRestaurant>>>> {
    let (date_from, date_to) = match &query.date {
        Some(date) => {
            let from = parse_date_millis(date)?;
            (Some(from), Some(from + DAY_MILLIS))
        }
        None => (None, None),
    };
    let filter = ReservationFilter {
        restaurant_id: query.restaurant_id,
        status: query.status,
        email: query.email,
        date_from,
        date_to,
    };
    let reservations = reservation::find_all(&state.pool, &filter).await?;
    Ok(ok(reservations))
}

/// GET /api/reservations/:id - 获取单个预订
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<ReservationWithRestaurant>>> {
    let reservation = reservation::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Reservation"))?;
    Ok(ok(reservation))
}

/// POST /api/reservations - 创建预订 (status 初始为 pending)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<ApiResponse<ReservationWithRestaurant>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_email_field(&payload.email, "email")?;
    validate_required_text(&payload.time, "time", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.special_requests, "specialRequests", MAX_NOTE_LEN)?;
    if let Some(count) = payload.adult_count
        && count < 1
    {
        return Err(AppError::validation("adultCount must be at least 1"));
    }

    if restaurant::find_by_id(&state.pool, payload.restaurant_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("Restaurant"));
    }

    let date_millis = parse_date_millis(&payload.date)?;
    let reservation = reservation::create(&state.pool, payload, date_millis).await?;
    Ok(ok(reservation))
}

/// PUT /api/reservations/:id - 更新预订
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<ApiResponse<ReservationWithRestaurant>>> {
    if let Some(status) = &payload.status
        && !matches!(status.as_str(), "pending" | "confirmed" | "cancelled")
    {
        return Err(AppError::validation(
            "status must be pending, confirmed or cancelled",
        ));
    }
    if let Some(email) = &payload.email {
        validate_email_field(email, "email")?;
    }

    let date_millis = match &payload.date {
        Some(date) => Some(parse_date_millis(date)?),
        None => None,
    };
    let reservation = reservation::update(&state.pool, id, payload, date_millis).await?;
    Ok(ok(reservation))
}

/// DELETE /api/reservations/:id - 取消并删除预订
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !reservation::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Reservation"));
    }
    Ok(ok_message("Reservation deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_date_parses_to_utc_midnight() {
        let millis = parse_date_millis("2026-09-01").unwrap();
        assert_eq!(millis % DAY_MILLIS, 0);
    }

    #[test]
    fn rfc3339_is_accepted() {
        let millis = parse_date_millis("2026-09-01T19:30:00Z").unwrap();
        assert!(millis > 0);
    }

    #[test]
    fn garbage_date_is_rejected() {
        assert!(parse_date_millis("next friday").is_err());
    }
}
