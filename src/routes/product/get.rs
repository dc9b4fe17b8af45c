use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{db_interaction::{get_food_item, list_food_items}, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Get food items",
    skip(pool)
)]
pub async fn fetch_items(
    pool: web::Data<DbPool>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    Ok(HttpResponse::Ok().json(list_food_items(conn).await?))
}

#[tracing::instrument(
    "Get food item details",
    skip(pool)
)]
pub async fn fetch_item_details(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    let item = get_food_item(conn, path.into_inner()).await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(HttpResponse::Ok().json(item))
}
