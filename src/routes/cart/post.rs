use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{auth::extractors::IsUser, db_interaction::{add_cart_line, NewCartLine}, error::{ApiError, MessageResponse}, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartJson{
    pub user_id: Uuid,
    pub food_item_id: Uuid,
    pub food_item_name: String,
    pub restaurant_id: Uuid,
    pub food_item_img: String,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "Discount must be between 0 and 100"))]
    pub discount: f64,
    #[validate(range(min = 1, max = 100, message = "Quantity must be between 1 and 100"))]
    pub quantity: i32
}

#[tracing::instrument(
    "Adding item to cart",
    skip(pool, uid)
)]
pub async fn add_to_cart(
    pool: web::Data<DbPool>,
    json: web::Json<AddToCartJson>,
    uid: IsUser
) -> Result<HttpResponse, ApiError> {
    json.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let json = json.into_inner();
    if !uid.0.may_act_for(json.user_id) {
        return Err(ApiError::Forbidden("Not allowed to change this cart".to_string()))
    }

    let conn = get_pooled_connection(&pool).await?;
    add_cart_line(conn, NewCartLine{
        user_id: json.user_id,
        food_item_id: json.food_item_id,
        food_item_name: json.food_item_name,
        restaurant_id: json.restaurant_id,
        food_item_img: json.food_item_img,
        price: json.price,
        discount: json.discount,
        quantity: json.quantity
    })
    .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Added to cart")))
}
