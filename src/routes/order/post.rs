use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{auth::extractors::IsUser, db_interaction::{place_order, ContactDetails}, domain::{PhoneNumberDomain, Pincode, UserEmail}, error::ApiError, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderJson{
    pub user_id: Uuid,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub address: String,
    pub pincode: String,
    pub payment_method: String,
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse{
    pub message: String,
    pub order_ids: Vec<Uuid>
}

fn non_empty(value: String, field: &str) -> Result<String, ApiError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ApiError::BadRequest(format!("{} must not be empty", field)))
    }
    Ok(value)
}

impl TryFrom<PlaceOrderJson> for ContactDetails {
    type Error = ApiError;

    fn try_from(json: PlaceOrderJson) -> Result<Self, Self::Error> {
        Ok(ContactDetails{
            name: non_empty(json.name, "Name")?,
            email: UserEmail::parse(json.email).map_err(ApiError::BadRequest)?.0,
            mobile: PhoneNumberDomain::parse(json.mobile).map_err(ApiError::BadRequest)?.inner(),
            address: non_empty(json.address, "Address")?,
            pincode: Pincode::parse(json.pincode).map_err(ApiError::BadRequest)?.inner(),
            payment_method: non_empty(json.payment_method, "Payment method")?,
            order_date: json.order_date.unwrap_or_else(Utc::now)
        })
    }
}

#[tracing::instrument(
    "Placing cart order",
    skip(pool, json, uid),
    fields(user_id = %json.user_id)
)]
pub async fn place_cart_order(
    pool: web::Data<DbPool>,
    json: web::Json<PlaceOrderJson>,
    uid: IsUser
) -> Result<HttpResponse, ApiError> {
    let json = json.into_inner();
    let user_id = json.user_id;

    if !uid.0.may_act_for(user_id) {
        return Err(ApiError::Forbidden("Not allowed to order for this user".to_string()))
    }

    let contact = ContactDetails::try_from(json)?;

    let conn = get_pooled_connection(&pool).await?;
    let orders = place_order(conn, user_id, contact).await?;

    Ok(HttpResponse::Ok().json(PlaceOrderResponse{
        message: "Order placed".to_string(),
        order_ids: orders.into_iter().map(|order| order.order_id).collect()
    }))
}
