use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{auth::extractors::IsUser, db_interaction::{update_order_status, OrderScope}, domain::{Approval, OrderStatus, UserType}, error::{ApiError, MessageResponse}, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct OrderIdJson{
    pub id: Uuid
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusJson{
    pub id: Uuid,
    pub update_status: OrderStatus
}

// Customers cancel their own orders; admins any order
#[tracing::instrument(
    "Cancelling order",
    skip(pool, uid)
)]
pub async fn cancel_order(
    pool: web::Data<DbPool>,
    json: web::Json<OrderIdJson>,
    uid: IsUser
) -> Result<HttpResponse, ApiError> {
    let scope = match uid.0.role {
        UserType::Admin => OrderScope::All,
        _ => OrderScope::Customer(uid.0.sub)
    };

    let conn = get_pooled_connection(&pool).await?;
    update_order_status(conn, json.id, OrderStatus::Cancelled, scope).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("order cancelled")))
}

#[tracing::instrument(
    "Updating order status",
    skip(pool, uid)
)]
pub async fn update_status(
    pool: web::Data<DbPool>,
    json: web::Json<OrderStatusJson>,
    uid: IsUser
) -> Result<HttpResponse, ApiError> {
    let claims = uid.0;

    let scope = match (claims.role, claims.approval) {
        (UserType::Admin, _) => OrderScope::All,
        (UserType::Restaurant, Approval::Approved) => OrderScope::RestaurantOwner(claims.sub),
        _ => return Err(ApiError::Forbidden("Unauthorized Role".to_string()))
    };

    let conn = get_pooled_connection(&pool).await?;
    update_order_status(conn, json.id, json.update_status, scope).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("order status updated")))
}
