//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::ApiResponse;
use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate};

use crate::core::ServerState;
use crate::db::repository::restaurant;
use crate::utils::error::AppError;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_required_text,
};
use crate::utils::{AppResult, ok, ok_message};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub city: Option<String>,
}

/// GET /api/restaurants?city=xxx - 获取餐厅列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Restaurant>>>> {
    let restaurants = restaurant::find_all(&state.pool, query.city.as_deref()).await?;
    Ok(ok(restaurants))
}

/// GET /api/restaurants/:id - 获取单个餐厅
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    let restaurant = restaurant::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant"))?;
    Ok(ok(restaurant))
}

/// POST /api/restaurants - 创建餐厅
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RestaurantCreate>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.display_name, "displayName", MAX_NAME_LEN)?;
    validate_required_text(&payload.city, "city", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.image, "image", MAX_URL_LEN)?;

    let restaurant = restaurant::create(&state.pool, payload)
        .await
        .map_err(|e| match e {
            crate::db::repository::RepoError::Duplicate(_) => {
                AppError::conflict("Restaurant with this name already exists")
            }
            other => other.into(),
        })?;
    Ok(ok(restaurant))
}

/// PUT /api/restaurants/:id - 更新餐厅
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RestaurantUpdate>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    let restaurant = restaurant::update(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            crate::db::repository::RepoError::Duplicate(_) => {
                AppError::conflict("Restaurant with this name already exists")
            }
            other => other.into(),
        })?;
    Ok(ok(restaurant))
}

/// DELETE /api/restaurants/:id - 删除餐厅 (级联删除分配和预订)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !restaurant::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Restaurant"));
    }
    Ok(ok_message("Restaurant deleted"))
}
