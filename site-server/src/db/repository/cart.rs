//! Cart Repository
//!
//! Row-level primitives only; merge/clamp rules live in [`crate::cart`].

use shared::models::{CartLine, CartLineWithMeal};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const WITH_MEAL_SELECT: &str = "SELECT c.id, c.session_id, c.user_id, c.meal_id, c.restaurant_id, \
    c.date, c.quantity, c.child_quantity, m.title as meal_title, m.price as meal_price, \
    m.child_price as meal_child_price, m.image as meal_image, m.meal_type as meal_type, \
    c.created_at, c.updated_at \
    FROM cart_line c JOIN meal m ON c.meal_id = m.id";

pub async fn find_for_identity(
    pool: &SqlitePool,
    session_id: Option<&str>,
    user_id: Option<&str>,
) -> RepoResult<Vec<CartLineWithMeal>> {
    let mut qb = sqlx::QueryBuilder::new(WITH_MEAL_SELECT);
    qb.push(" WHERE 1=1");
    if let Some(sid) = session_id {
        qb.push(" AND c.session_id = ").push_bind(sid);
    }
    if let Some(uid) = user_id {
        qb.push(" AND c.user_id = ").push_bind(uid);
    }
    qb.push(" ORDER BY c.created_at DESC");

    let rows = qb
        .build_query_as::<CartLineWithMeal>()
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<CartLineWithMeal>> {
    let sql = format!("{WITH_MEAL_SELECT} WHERE c.id = ?");
    let row = sqlx::query_as::<_, CartLineWithMeal>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Find the line matching the merge key (identity, meal, restaurant, date).
/// `IS` comparison so NULL restaurant/date/user match NULL, not nothing.
pub async fn find_merge_target(
    pool: &SqlitePool,
    session_id: &str,
    user_id: Option<&str>,
    meal_id: i64,
    restaurant_id: Option<i64>,
    date: Option<&str>,
) -> RepoResult<Option<CartLine>> {
    let row = sqlx::query_as::<_, CartLine>(
        "SELECT * FROM cart_line WHERE session_id = ?1 AND user_id IS ?2 \
         AND meal_id = ?3 AND restaurant_id IS ?4 AND date IS ?5",
    )
    .bind(session_id)
    .bind(user_id)
    .bind(meal_id)
    .bind(restaurant_id)
    .bind(date)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_line(
    pool: &SqlitePool,
    session_id: &str,
    user_id: Option<&str>,
    meal_id: i64,
    restaurant_id: Option<i64>,
    date: Option<&str>,
    quantity: i64,
    child_quantity: i64,
) -> RepoResult<i64> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO cart_line (id, session_id, user_id, meal_id, restaurant_id, date, quantity, child_quantity, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
    )
    .bind(id)
    .bind(session_id)
    .bind(user_id)
    .bind(meal_id)
    .bind(restaurant_id)
    .bind(date)
    .bind(quantity)
    .bind(child_quantity)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(id)
}

/// Merge a repeated add into an existing line by incrementing quantities.
pub async fn add_quantities(
    pool: &SqlitePool,
    id: i64,
    add_quantity: i64,
    add_child_quantity: i64,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE cart_line SET quantity = quantity + ?1, child_quantity = child_quantity + ?2, \
         updated_at = ?3 WHERE id = ?4",
    )
    .bind(add_quantity)
    .bind(add_child_quantity)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Cart item {id} not found")));
    }
    Ok(())
}

/// Partial overwrite; quantities are pre-clamped by the cart manager.
pub async fn update_line(
    pool: &SqlitePool,
    id: i64,
    quantity: Option<i64>,
    child_quantity: Option<i64>,
    restaurant_id: Option<i64>,
    date: Option<&str>,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE cart_line SET quantity = COALESCE(?1, quantity), \
         child_quantity = COALESCE(?2, child_quantity), \
         restaurant_id = COALESCE(?3, restaurant_id), date = COALESCE(?4, date), \
         updated_at = ?5 WHERE id = ?6",
    )
    .bind(quantity)
    .bind(child_quantity)
    .bind(restaurant_id)
    .bind(date)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Cart item {id} not found")));
    }
    Ok(())
}

pub async fn delete_line(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM cart_line WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Bulk delete for a session and/or user; the manager guarantees at
/// least one identity is present before calling.
pub async fn clear(
    pool: &SqlitePool,
    session_id: Option<&str>,
    user_id: Option<&str>,
) -> RepoResult<u64> {
    let mut qb = sqlx::QueryBuilder::new("DELETE FROM cart_line WHERE 1=1");
    if let Some(sid) = session_id {
        qb.push(" AND session_id = ").push_bind(sid);
    }
    if let Some(uid) = user_id {
        qb.push(" AND user_id = ").push_bind(uid);
    }
    let rows = qb.build().execute(pool).await?;
    Ok(rows.rows_affected())
}
