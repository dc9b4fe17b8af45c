use actix_web::{web, HttpResponse};

use crate::{auth::extractors::IsUser, db_interaction::{list_orders, OrderScope}, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Get orders",
    skip(pool, uid),
    fields(user_id = %uid.0.sub, role = uid.0.role.as_str())
)]
pub async fn fetch_orders(
    pool: web::Data<DbPool>,
    uid: IsUser
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;
    let orders = list_orders(conn, OrderScope::from(&uid.0)).await?;

    Ok(HttpResponse::Ok().json(orders))
}
