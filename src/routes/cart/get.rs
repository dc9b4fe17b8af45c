use actix_web::{web, HttpResponse};

use crate::{auth::extractors::{IsAdmin, IsUser}, db_interaction::{list_all_cart_lines, list_cart_lines_for_user}, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Get cart of user",
    skip(pool, uid),
    fields(user_id = %uid.0.sub)
)]
pub async fn fetch_cart(
    pool: web::Data<DbPool>,
    uid: IsUser
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    Ok(HttpResponse::Ok().json(list_cart_lines_for_user(conn, uid.0.sub).await?))
}

#[tracing::instrument(
    "Get every cart",
    skip(pool, _admin)
)]
pub async fn fetch_all_cart(
    pool: web::Data<DbPool>,
    _admin: IsAdmin
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    Ok(HttpResponse::Ok().json(list_all_cart_lines(conn).await?))
}
