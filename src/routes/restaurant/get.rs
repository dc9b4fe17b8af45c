use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{db_interaction::{get_restaurant, get_restaurant_by_owner, list_restaurants}, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Get restaurants",
    skip(pool)
)]
pub async fn fetch_restaurants(
    pool: web::Data<DbPool>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    Ok(HttpResponse::Ok().json(list_restaurants(conn).await?))
}

#[tracing::instrument(
    "Get restaurant",
    skip(pool)
)]
pub async fn fetch_restaurant(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    let restaurant = get_restaurant(conn, path.into_inner()).await?
        .ok_or_else(|| ApiError::NotFound("Restaurant not found".to_string()))?;

    Ok(HttpResponse::Ok().json(restaurant))
}

#[tracing::instrument(
    "Get restaurant of owner",
    skip(pool)
)]
pub async fn fetch_restaurant_details(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    let restaurant = get_restaurant_by_owner(conn, path.into_inner()).await?
        .ok_or_else(|| ApiError::NotFound("Restaurant not found".to_string()))?;

    Ok(HttpResponse::Ok().json(restaurant))
}
