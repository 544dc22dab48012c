//! Meal Model

use serde::{Deserialize, Serialize};

/// Meal entity (菜品)
///
/// Cart lines reference meals by id and snapshot nothing; `price` and
/// `child_price` are always read live at render/checkout time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Meal {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub child_price: Option<f64>,
    pub image: String,
    pub badge: Option<String>,
    /// breakfast | lunch | dinner
    pub meal_type: String,
    pub category: Option<String>,
    pub is_available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create meal payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealCreate {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub child_price: Option<f64>,
    pub image: String,
    pub badge: Option<String>,
    #[serde(rename = "type")]
    pub meal_type: String,
    pub category: Option<String>,
    pub is_available: Option<bool>,
}

/// Update meal payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub child_price: Option<f64>,
    pub image: Option<String>,
    pub badge: Option<String>,
    #[serde(rename = "type")]
    pub meal_type: Option<String>,
    pub category: Option<String>,
    pub is_available: Option<bool>,
}
