//! Cart Manager
//!
//! Business rules over the cart repository: merge repeated adds into one
//! line, clamp quantities, price the cart from live meal data.
//!
//! Totals use decimal arithmetic and round half-up to 2 places so
//! 3 x 9.99 comes out as 29.97, not a float tail.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use shared::models::{CartLineCreate, CartLineUpdate, CartLineWithMeal, CartSummary};
use sqlx::SqlitePool;

use crate::db::repository::{cart, meal};
use crate::utils::{AppError, AppResult};

/// Add a meal to the cart, merging into an existing line when the merge
/// key (session, user, meal, restaurant, date) already has one.
pub async fn add(pool: &SqlitePool, data: CartLineCreate) -> AppResult<CartLineWithMeal> {
    if data.session_id.trim().is_empty() {
        return Err(AppError::validation("Session ID is required"));
    }
    if meal::find_by_id(pool, data.meal_id).await?.is_none() {
        return Err(AppError::not_found("Meal"));
    }

    let quantity = data.quantity.unwrap_or(1).max(1);
    let child_quantity = data.child_quantity.unwrap_or(0).max(0);

    let existing = cart::find_merge_target(
        pool,
        &data.session_id,
        data.user_id.as_deref(),
        data.meal_id,
        data.restaurant_id,
        data.date.as_deref(),
    )
    .await?;

    let line_id = if let Some(line) = existing {
        cart::add_quantities(pool, line.id, quantity, child_quantity).await?;
        line.id
    } else {
        cart::insert_line(
            pool,
            &data.session_id,
            data.user_id.as_deref(),
            data.meal_id,
            data.restaurant_id,
            data.date.as_deref(),
            quantity,
            child_quantity,
        )
        .await?
    };

    cart::find_by_id(pool, line_id)
        .await?
        .ok_or_else(|| AppError::not_found("Cart item"))
}

/// Partial update of a single line. Quantities are clamped the same way
/// as on add; a line can never hold zero adults.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: CartLineUpdate,
) -> AppResult<CartLineWithMeal> {
    let quantity = data.quantity.map(|q| q.max(1));
    let child_quantity = data.child_quantity.map(|q| q.max(0));

    cart::update_line(
        pool,
        id,
        quantity,
        child_quantity,
        data.restaurant_id,
        data.date.as_deref(),
    )
    .await?;

    cart::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Cart item"))
}

pub async fn remove(pool: &SqlitePool, id: i64) -> AppResult<()> {
    if !cart::delete_line(pool, id).await? {
        return Err(AppError::not_found("Cart item"));
    }
    Ok(())
}

/// Drop every line for the given identity.
pub async fn clear(
    pool: &SqlitePool,
    session_id: Option<&str>,
    user_id: Option<&str>,
) -> AppResult<u64> {
    if session_id.is_none() && user_id.is_none() {
        return Err(AppError::validation("Session ID or User ID is required"));
    }
    Ok(cart::clear(pool, session_id, user_id).await?)
}

pub async fn list(
    pool: &SqlitePool,
    session_id: Option<&str>,
    user_id: Option<&str>,
) -> AppResult<Vec<CartLineWithMeal>> {
    Ok(cart::find_for_identity(pool, session_id, user_id).await?)
}

/// Price the given lines from their joined meal data.
/// A meal without a child price bills child seats at zero.
pub fn total(lines: &[CartLineWithMeal]) -> Decimal {
    let mut sum = Decimal::ZERO;
    for line in lines {
        let price = Decimal::from_f64(line.meal_price).unwrap_or_default();
        let child_price = line
            .meal_child_price
            .and_then(Decimal::from_f64)
            .unwrap_or(Decimal::ZERO);
        sum += price * Decimal::from(line.quantity);
        sum += child_price * Decimal::from(line.child_quantity);
    }
    sum.round_dp(2)
}

pub fn item_count(lines: &[CartLineWithMeal]) -> i64 {
    lines.iter().map(|l| l.quantity + l.child_quantity).sum()
}

pub async fn summary(
    pool: &SqlitePool,
    session_id: Option<&str>,
    user_id: Option<&str>,
) -> AppResult<CartSummary> {
    let lines = list(pool, session_id, user_id).await?;
    Ok(CartSummary {
        total: total(&lines).to_f64().unwrap_or(0.0),
        item_count: item_count(&lines),
    })
}
