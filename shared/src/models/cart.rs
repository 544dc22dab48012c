//! Cart Model

use serde::{Deserialize, Serialize};

/// One pending order line for a session or user
///
/// Merge key: (session_id, user_id, meal_id, restaurant_id, date).
/// `quantity` (adults) never drops below 1; removing the line is the only
/// way to zero. `child_quantity` may be 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartLine {
    pub id: i64,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    pub meal_id: i64,
    pub restaurant_id: Option<i64>,
    /// Optional reservation date, "YYYY-MM-DD"
    pub date: Option<String>,
    pub quantity: i64,
    pub child_quantity: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Cart line with live meal data joined in
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartLineWithMeal {
    pub id: i64,
    pub session_id: Option<String>,
    pub user_id: Option<String>,
    pub meal_id: i64,
    pub restaurant_id: Option<i64>,
    pub date: Option<String>,
    pub quantity: i64,
    pub child_quantity: i64,
    pub meal_title: String,
    pub meal_price: f64,
    pub meal_child_price: Option<f64>,
    pub meal_image: String,
    pub meal_type: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Add-to-cart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineCreate {
    pub session_id: String,
    pub user_id: Option<String>,
    pub meal_id: i64,
    pub restaurant_id: Option<i64>,
    pub date: Option<String>,
    pub quantity: Option<i64>,
    pub child_quantity: Option<i64>,
}

/// Update-cart-line payload; only supplied fields are overwritten
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineUpdate {
    pub quantity: Option<i64>,
    pub child_quantity: Option<i64>,
    pub restaurant_id: Option<i64>,
    pub date: Option<String>,
}

/// Live cart totals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub total: f64,
    pub item_count: i64,
}
