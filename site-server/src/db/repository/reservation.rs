//! Reservation Repository

use shared::models::{Reservation, ReservationCreate, ReservationUpdate, ReservationWithRestaurant};
use sqlx::{QueryBuilder, SqlitePool};

use super::{RepoError, RepoResult};

const WITH_RESTAURANT_SELECT: &str = "SELECT rv.id, rv.restaurant_id, r.display_name as restaurant_name, \
    r.city as restaurant_city, rv.name, rv.email, rv.phone, rv.date, rv.time, rv.adult_count, \
    rv.child_count, rv.special_requests, rv.status, rv.created_at, rv.updated_at \
    FROM reservation rv JOIN restaurant r ON rv.restaurant_id = r.id";

/// Filters for reservation listing; `date_from`/`date_to` bound a
/// half-open [from, to) millis range (one calendar day in practice).
#[derive(Debug, Default, Clone)]
pub struct ReservationFilter {
    pub restaurant_id: Option<i64>,
    pub status: Option<String>,
    pub email: Option<String>,
    pub date_from: Option<i64>,
    pub date_to: Option<i64>,
}

pub async fn find_all(
    pool: &SqlitePool,
    filter: &ReservationFilter,
) -> RepoResult<Vec<ReservationWithRestaurant>> {
    let mut qb = QueryBuilder::new(WITH_RESTAURANT_SELECT);
    qb.push(" WHERE 1=1");
    if let Some(rid) = filter.restaurant_id {
        qb.push(" AND rv.restaurant_id = ").push_bind(rid);
    }
    if let Some(status) = &filter.status {
        qb.push(" AND rv.status = ").push_bind(status);
    }
    if let Some(email) = &filter.email {
        qb.push(" AND rv.email = ").push_bind(email);
    }
    if let Some(from) = filter.date_from {
        qb.push(" AND rv.date >= ").push_bind(from);
    }
    if let Some(to) = filter.date_to {
        qb.push(" AND rv.date < ").push_bind(to);
    }
    qb.push(" ORDER BY rv.date ASC");

    let rows = qb
        .build_query_as::<ReservationWithRestaurant>()
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(
    pool: &SqlitePool,
    id: i64,
) -> RepoResult<Option<ReservationWithRestaurant>> {
    let sql = format!("{WITH_RESTAURANT_SELECT} WHERE rv.id = ?");
    let row = sqlx::query_as::<_, ReservationWithRestaurant>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// `date` here is already parsed to UTC millis by the caller.
pub async fn create(
    pool: &SqlitePool,
    data: ReservationCreate,
    date_millis: i64,
) -> RepoResult<ReservationWithRestaurant> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO reservation (id, restaurant_id, name, email, phone, date, time, adult_count, child_count, special_requests, status, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 'pending', ?11, ?11)",
    )
    .bind(id)
    .bind(data.restaurant_id)
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(date_millis)
    .bind(&data.time)
    .bind(data.adult_count.unwrap_or(1))
    .bind(data.child_count.unwrap_or(0))
    .bind(&data.special_requests)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: ReservationUpdate,
    date_millis: Option<i64>,
) -> RepoResult<ReservationWithRestaurant> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE reservation SET name = COALESCE(?1, name), email = COALESCE(?2, email), \
         phone = COALESCE(?3, phone), date = COALESCE(?4, date), time = COALESCE(?5, time), \
         adult_count = COALESCE(?6, adult_count), child_count = COALESCE(?7, child_count), \
         special_requests = COALESCE(?8, special_requests), status = COALESCE(?9, status), \
         updated_at = ?10 WHERE id = ?11",
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(date_millis)
    .bind(&data.time)
    .bind(data.adult_count)
    .bind(data.child_count)
    .bind(&data.special_requests)
    .bind(&data.status)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM reservation WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Plain row fetch (no join), used by tests
pub async fn find_raw(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let row = sqlx::query_as::<_, Reservation>("SELECT * FROM reservation WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}
