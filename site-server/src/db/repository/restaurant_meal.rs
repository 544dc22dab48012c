//! Restaurant-Meal Assignment Repository

use shared::models::{RestaurantMeal, RestaurantMealCreate, RestaurantMealUpdate, RestaurantMealWithNames};
use sqlx::{QueryBuilder, SqlitePool};

use super::{RepoError, RepoResult};

const WITH_NAMES_SELECT: &str = "SELECT rm.id, rm.restaurant_id, r.display_name as restaurant_name, \
    r.city as restaurant_city, rm.meal_id, m.title as meal_title, m.price as meal_price, \
    rm.is_available, rm.special_price, rm.created_at \
    FROM restaurant_meal rm \
    JOIN restaurant r ON rm.restaurant_id = r.id \
    JOIN meal m ON rm.meal_id = m.id";

/// Equality filters for assignment listing
#[derive(Debug, Default, Clone)]
pub struct AssignmentFilter {
    pub restaurant_id: Option<i64>,
    pub meal_id: Option<i64>,
    pub is_available: Option<bool>,
}

pub async fn find_all(
    pool: &SqlitePool,
    filter: &AssignmentFilter,
) -> RepoResult<Vec<RestaurantMealWithNames>> {
    let mut qb = QueryBuilder::new(WITH_NAMES_SELECT);
    qb.push(" WHERE 1=1");
    if let Some(rid) = filter.restaurant_id {
        qb.push(" AND rm.restaurant_id = ").push_bind(rid);
    }
    if let Some(mid) = filter.meal_id {
        qb.push(" AND rm.meal_id = ").push_bind(mid);
    }
    if let Some(avail) = filter.is_available {
        qb.push(" AND rm.is_available = ").push_bind(avail);
    }
    qb.push(" ORDER BY rm.created_at ASC");

    let rows = qb
        .build_query_as::<RestaurantMealWithNames>()
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(
    pool: &SqlitePool,
    id: i64,
) -> RepoResult<Option<RestaurantMealWithNames>> {
    let sql = format!("{WITH_NAMES_SELECT} WHERE rm.id = ?");
    let row = sqlx::query_as::<_, RestaurantMealWithNames>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    data: RestaurantMealCreate,
) -> RepoResult<RestaurantMealWithNames> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO restaurant_meal (id, restaurant_id, meal_id, is_available, special_price, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(data.restaurant_id)
    .bind(data.meal_id)
    .bind(data.is_available.unwrap_or(true))
    .bind(data.special_price)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create assignment".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: RestaurantMealUpdate,
) -> RepoResult<RestaurantMealWithNames> {
    let rows = sqlx::query(
        "UPDATE restaurant_meal SET is_available = COALESCE(?1, is_available), \
         special_price = COALESCE(?2, special_price) WHERE id = ?3",
    )
    .bind(data.is_available)
    .bind(data.special_price)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Assignment {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Assignment {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM restaurant_meal WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Raw row without joins (internal checks)
pub async fn find_raw(pool: &SqlitePool, id: i64) -> RepoResult<Option<RestaurantMeal>> {
    let row = sqlx::query_as::<_, RestaurantMeal>("SELECT * FROM restaurant_meal WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}
