//! Meal API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::ApiResponse;
use shared::models::{Meal, MealCreate, MealUpdate};

use crate::core::ServerState;
use crate::db::repository::meal::{self, MealFilter};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_meal_type, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ok, ok_message};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// breakfast | lunch | dinner
    #[serde(rename = "type")]
    pub meal_type: Option<String>,
    pub category: Option<String>,
    pub restaurant_id: Option<i64>,
    pub is_available: Option<bool>,
}

/// GET /api/meals - 获取菜品列表 (可按类型/分类/餐厅/可用性过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Meal>>>> {
    let filter = MealFilter {
        meal_type: query.meal_type,
        category: query.category,
        restaurant_id: query.restaurant_id,
        is_available: query.is_available,
    };
    let meals = meal::find_all(&state.pool, &filter).await?;
    Ok(ok(meals))
}

/// GET /api/meals/:id - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Meal>>> {
    let meal = meal::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Meal"))?;
    Ok(ok(meal))
}

/// POST /api/meals - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MealCreate>,
) -> AppResult<Json<ApiResponse<Meal>>> {
    validate_required_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_required_text(&payload.image, "image", MAX_URL_LEN)?;
    validate_meal_type(&payload.meal_type)?;
    if payload.price < 0.0 {
        return Err(AppError::validation("price must not be negative"));
    }

    let meal = meal::create(&state.pool, payload).await?;
    Ok(ok(meal))
}

/// PUT /api/meals/:id - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MealUpdate>,
) -> AppResult<Json<ApiResponse<Meal>>> {
    if let Some(t) = &payload.meal_type {
        validate_meal_type(t)?;
    }
    if let Some(price) = payload.price
        && price < 0.0
    {
        return Err(AppError::validation("price must not be negative"));
    }
    validate_optional_text(&payload.title, "title", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let meal = meal::update(&state.pool, id, payload).await?;
    Ok(ok(meal))
}

/// DELETE /api/meals/:id - 删除菜品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !meal::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Meal"));
    }
    Ok(ok_message("Meal deleted"))
}
