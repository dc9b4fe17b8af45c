use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{auth::extractors::IsUser, db_interaction::update_cart_quantity, error::{ApiError, MessageResponse}, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug, Validate)]
pub struct CartQuantityJson{
    pub id: Uuid,
    #[validate(range(min = 1, max = 100, message = "Quantity must be between 1 and 100"))]
    pub quantity: i32
}

#[tracing::instrument(
    "Updating cart quantity",
    skip(pool, uid)
)]
pub async fn update_cart(
    pool: web::Data<DbPool>,
    json: web::Json<CartQuantityJson>,
    uid: IsUser
) -> Result<HttpResponse, ApiError> {
    json.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let conn = get_pooled_connection(&pool).await?;
    update_cart_quantity(conn, uid.0.sub, json.id, json.quantity).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Quantity updated successfully")))
}
