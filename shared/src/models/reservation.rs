//! Reservation Model

use serde::{Deserialize, Serialize};

/// Reservation entity (预订)
///
/// Independent lifecycle from the cart. `date` is stored as UTC millis,
/// `time` as the display slot the guest picked (e.g. "19:30").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: i64,
    pub time: String,
    pub adult_count: i64,
    pub child_count: i64,
    pub special_requests: Option<String>,
    /// pending | confirmed | cancelled
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Reservation with joined restaurant display fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationWithRestaurant {
    pub id: i64,
    pub restaurant_id: i64,
    pub restaurant_name: String,
    pub restaurant_city: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: i64,
    pub time: String,
    pub adult_count: i64,
    pub child_count: i64,
    pub special_requests: Option<String>,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create reservation payload; `date` accepts "YYYY-MM-DD" or RFC 3339
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreate {
    pub restaurant_id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: String,
    pub time: String,
    pub adult_count: Option<i64>,
    pub child_count: Option<i64>,
    pub special_requests: Option<String>,
}

/// Update reservation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub adult_count: Option<i64>,
    pub child_count: Option<i64>,
    pub special_requests: Option<String>,
    pub status: Option<String>,
}
