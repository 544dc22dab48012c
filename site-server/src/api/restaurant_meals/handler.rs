//! Restaurant-Meal Assignment API Handlers
//!
//! 分配前检查餐厅和菜品存在，重复分配返回 409。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::ApiResponse;
use shared::models::{RestaurantMealCreate, RestaurantMealUpdate, RestaurantMealWithNames};

use crate::core::ServerState;
use crate::db::repository::{
    RepoError,
    meal, restaurant,
    restaurant_meal::{self, AssignmentFilter},
};
use crate::utils::{AppError, AppResult, ok, ok_message};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub restaurant_id: Option<i64>,
    pub meal_id: Option<i64>,
    pub is_available: Option<bool>,
}

/// GET /api/restaurant-meals - 获取分配列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<RestaurantMealWithNames>>>> {
    let filter = AssignmentFilter {
        restaurant_id: query.restaurant_id,
        meal_id: query.meal_id,
        is_available: query.is_available,
    };
    let assignments = restaurant_meal::find_all(&state.pool, &filter).await?;
    Ok(ok(assignments))
}

/// GET /api/restaurant-meals/:id - 获取单个分配
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<RestaurantMealWithNames>>> {
    let assignment = restaurant_meal::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Assignment"))?;
    Ok(ok(assignment))
}

/// POST /api/restaurant-meals - 分配菜品到餐厅
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RestaurantMealCreate>,
) -> AppResult<Json<ApiResponse<RestaurantMealWithNames>>> {
    // referential existence checks before hitting the unique index
    if restaurant::find_by_id(&state.pool, payload.restaurant_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("Restaurant"));
    }
    if meal::find_by_id(&state.pool, payload.meal_id).await?.is_none() {
        return Err(AppError::not_found("Meal"));
    }

    let assignment = restaurant_meal::create(&state.pool, payload)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => {
                AppError::conflict("This meal is already assigned to this restaurant")
            }
            other => other.into(),
        })?;
    Ok(ok(assignment))
}

/// PUT /api/restaurant-meals/:id - 更新分配 (可用性/特价)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<RestaurantMealUpdate>,
) -> AppResult<Json<ApiResponse<RestaurantMealWithNames>>> {
    if let Some(price) = payload.special_price
        && price < 0.0
    {
        return Err(AppError::validation("specialPrice must not be negative"));
    }
    let assignment = restaurant_meal::update(&state.pool, id, payload).await?;
    Ok(ok(assignment))
}

/// DELETE /api/restaurant-meals/:id - 取消分配
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !restaurant_meal::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Assignment"));
    }
    Ok(ok_message("Assignment removed"))
}
