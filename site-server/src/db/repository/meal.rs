//! Meal Repository

use shared::models::{Meal, MealCreate, MealUpdate};
use sqlx::{QueryBuilder, SqlitePool};

use super::{RepoError, RepoResult};

/// Equality filters for meal listing
#[derive(Debug, Default, Clone)]
pub struct MealFilter {
    pub meal_type: Option<String>,
    pub category: Option<String>,
    pub restaurant_id: Option<i64>,
    pub is_available: Option<bool>,
}

pub async fn find_all(pool: &SqlitePool, filter: &MealFilter) -> RepoResult<Vec<Meal>> {
    let mut qb = QueryBuilder::new("SELECT m.* FROM meal m");
    // Restaurant filtering goes through the assignment table and only
    // considers available assignments.
    if filter.restaurant_id.is_some() {
        qb.push(" JOIN restaurant_meal rm ON rm.meal_id = m.id AND rm.is_available = 1");
    }
    qb.push(" WHERE 1=1");
    if let Some(rid) = filter.restaurant_id {
        qb.push(" AND rm.restaurant_id = ").push_bind(rid);
    }
    if let Some(t) = &filter.meal_type {
        qb.push(" AND m.meal_type = ").push_bind(t);
    }
    if let Some(c) = &filter.category {
        qb.push(" AND m.category = ").push_bind(c);
    }
    if let Some(avail) = filter.is_available {
        qb.push(" AND m.is_available = ").push_bind(avail);
    }
    qb.push(" ORDER BY m.title ASC");

    let meals = qb.build_query_as::<Meal>().fetch_all(pool).await?;
    Ok(meals)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Meal>> {
    let meal = sqlx::query_as::<_, Meal>("SELECT * FROM meal WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(meal)
}

pub async fn create(pool: &SqlitePool, data: MealCreate) -> RepoResult<Meal> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO meal (id, title, description, price, child_price, image, badge, meal_type, category, is_available, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.child_price)
    .bind(&data.image)
    .bind(&data.badge)
    .bind(&data.meal_type)
    .bind(&data.category)
    .bind(data.is_available.unwrap_or(true))
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create meal".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MealUpdate) -> RepoResult<Meal> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE meal SET title = COALESCE(?1, title), description = COALESCE(?2, description), \
         price = COALESCE(?3, price), child_price = COALESCE(?4, child_price), \
         image = COALESCE(?5, image), badge = COALESCE(?6, badge), \
         meal_type = COALESCE(?7, meal_type), category = COALESCE(?8, category), \
         is_available = COALESCE(?9, is_available), updated_at = ?10 WHERE id = ?11",
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.child_price)
    .bind(&data.image)
    .bind(&data.badge)
    .bind(&data.meal_type)
    .bind(&data.category)
    .bind(data.is_available)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Meal {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Meal {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM meal WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
