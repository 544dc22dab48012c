//! Restaurant-Meal Assignment Model

use serde::{Deserialize, Serialize};

/// Meal-to-restaurant assignment (UNIQUE per restaurant/meal pair)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RestaurantMeal {
    pub id: i64,
    pub restaurant_id: i64,
    pub meal_id: i64,
    pub is_available: bool,
    pub special_price: Option<f64>,
    pub created_at: i64,
}

/// Assignment with joined display names (for list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RestaurantMealWithNames {
    pub id: i64,
    pub restaurant_id: i64,
    pub restaurant_name: String,
    pub restaurant_city: String,
    pub meal_id: i64,
    pub meal_title: String,
    pub meal_price: f64,
    pub is_available: bool,
    pub special_price: Option<f64>,
    pub created_at: i64,
}

/// Create assignment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantMealCreate {
    pub restaurant_id: i64,
    pub meal_id: i64,
    pub is_available: Option<bool>,
    pub special_price: Option<f64>,
}

/// Update assignment payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantMealUpdate {
    pub is_available: Option<bool>,
    pub special_price: Option<f64>,
}
