use actix_web::{web, HttpResponse};

use crate::{db_interaction::get_or_create_admin_config, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Getting global category list",
    skip(pool)
)]
pub async fn fetch_categories(
    pool: web::Data<DbPool>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;
    let config = get_or_create_admin_config(conn).await?;

    Ok(HttpResponse::Ok().json(config.categories))
}

#[tracing::instrument(
    "Getting promoted restaurant list",
    skip(pool)
)]
pub async fn fetch_promoted_list(
    pool: web::Data<DbPool>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;
    let config = get_or_create_admin_config(conn).await?;

    Ok(HttpResponse::Ok().json(config.promoted_restaurants))
}
