//! Restaurant Repository

use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate};
use sqlx::{QueryBuilder, SqlitePool};

use super::{RepoError, RepoResult};

pub async fn find_all(pool: &SqlitePool, city: Option<&str>) -> RepoResult<Vec<Restaurant>> {
    let mut qb = QueryBuilder::new("SELECT * FROM restaurant WHERE 1=1");
    if let Some(city) = city {
        qb.push(" AND city = ").push_bind(city);
    }
    // best-rated first on the storefront listing
    qb.push(" ORDER BY rating DESC");

    let restaurants = qb.build_query_as::<Restaurant>().fetch_all(pool).await?;
    Ok(restaurants)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Restaurant>> {
    let restaurant = sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurant WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(restaurant)
}

pub async fn create(pool: &SqlitePool, data: RestaurantCreate) -> RepoResult<Restaurant> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO restaurant (id, name, display_name, subtitle, tagline, description, cuisine, rating, reviews, image, gallery, city, address, phone, email, website, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?17)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.display_name)
    .bind(&data.subtitle)
    .bind(&data.tagline)
    .bind(&data.description)
    .bind(&data.cuisine)
    .bind(data.rating.unwrap_or(0.0))
    .bind(data.reviews.unwrap_or(0))
    .bind(&data.image)
    .bind(&data.gallery)
    .bind(&data.city)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(&data.website)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create restaurant".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: RestaurantUpdate) -> RepoResult<Restaurant> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE restaurant SET name = COALESCE(?1, name), display_name = COALESCE(?2, display_name), \
         subtitle = COALESCE(?3, subtitle), tagline = COALESCE(?4, tagline), \
         description = COALESCE(?5, description), cuisine = COALESCE(?6, cuisine), \
         rating = COALESCE(?7, rating), reviews = COALESCE(?8, reviews), \
         image = COALESCE(?9, image), gallery = COALESCE(?10, gallery), \
         city = COALESCE(?11, city), address = COALESCE(?12, address), \
         phone = COALESCE(?13, phone), email = COALESCE(?14, email), \
         website = COALESCE(?15, website), updated_at = ?16 WHERE id = ?17",
    )
    .bind(&data.name)
    .bind(&data.display_name)
    .bind(&data.subtitle)
    .bind(&data.tagline)
    .bind(&data.description)
    .bind(&data.cuisine)
    .bind(data.rating)
    .bind(data.reviews)
    .bind(&data.image)
    .bind(&data.gallery)
    .bind(&data.city)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(&data.website)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM restaurant WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
