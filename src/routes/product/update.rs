use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{auth::extractors::IsRestaurant, db_interaction::update_food_item, error::{ApiError, MessageResponse}, utils::{get_pooled_connection, DbPool}};

use super::ProductForm;

// The item keeps its restaurant; restaurantId in the body is ignored
#[tracing::instrument(
    "Updating product",
    skip(pool, form)
)]
pub async fn update_product(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    form: web::Json<ProductForm>,
    owner: IsRestaurant
) -> Result<HttpResponse, ApiError> {
    let (details, menu_category) = form.into_inner().into_parts()?;

    let conn = get_pooled_connection(&pool).await?;
    update_food_item(conn, owner.0, path.into_inner(), details, menu_category).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("product updated!!")))
}
