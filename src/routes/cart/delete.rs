use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{auth::extractors::IsUser, db_interaction::remove_cart_line, error::{ApiError, MessageResponse}, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct CartLineIdJson{
    pub id: Uuid
}

// Removing a line that is already gone still succeeds
#[tracing::instrument(
    "Removing item from cart",
    skip(pool, uid)
)]
pub async fn remove_item(
    pool: web::Data<DbPool>,
    json: web::Json<CartLineIdJson>,
    uid: IsUser
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    if !remove_cart_line(conn, uid.0.sub, json.id).await? {
        tracing::info!(cart_line_id = %json.id, "Cart line was already absent");
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new("item removed")))
}
