use actix_web::{web, HttpResponse};

use crate::{auth::extractors::IsRestaurant, db_interaction::{add_food_item, get_restaurant_by_owner}, error::{ApiError, MessageResponse}, utils::{get_pooled_connection, DbPool}};

use super::ProductForm;

#[tracing::instrument(
    "Adding new product",
    skip(pool, form)
)]
pub async fn add_new_product(
    pool: web::Data<DbPool>,
    form: web::Json<ProductForm>,
    owner: IsRestaurant
) -> Result<HttpResponse, ApiError> {
    let owner_id = owner.0;
    let form = form.into_inner();

    let restaurant_id = match form.restaurant_id {
        Some(restaurant_id) => restaurant_id,
        None => {
            let conn = get_pooled_connection(&pool).await?;
            get_restaurant_by_owner(conn, owner_id).await?
                .ok_or_else(|| ApiError::NotFound("Restaurant not found".to_string()))?
                .restaurant_id
        }
    };

    let (details, menu_category) = form.into_parts()?;

    let conn = get_pooled_connection(&pool).await?;
    let item = add_food_item(conn, owner_id, restaurant_id, details, menu_category).await?;

    tracing::info!(food_item_id = %item.food_item_id, "Product added");

    Ok(HttpResponse::Ok().json(MessageResponse::new("product added!!")))
}
