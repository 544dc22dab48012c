//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Restaurant entity (门店)
///
/// `gallery` is stored as a JSON array string, matching the marketing
/// pages that render it verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub subtitle: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub rating: f64,
    pub reviews: i64,
    pub image: String,
    pub gallery: Option<String>,
    pub city: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantCreate {
    pub name: String,
    pub display_name: String,
    pub subtitle: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<i64>,
    pub image: String,
    pub gallery: Option<String>,
    pub city: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}

/// Update restaurant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub subtitle: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<i64>,
    pub image: Option<String>,
    pub gallery: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
}
