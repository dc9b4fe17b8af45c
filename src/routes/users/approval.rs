use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{auth::extractors::IsAdmin, db_interaction::set_approval, domain::Approval, error::{ApiError, MessageResponse}, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct UserIdJson{
    pub id: Uuid
}

async fn decide(
    pool: &DbPool,
    user_id: Uuid,
    approval: Approval
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(pool).await?;
    set_approval(conn, user_id, approval).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(approval.as_str())))
}

#[tracing::instrument(
    "Approving restaurant account",
    skip(pool, _admin)
)]
pub async fn approve_user(
    pool: web::Data<DbPool>,
    json: web::Json<UserIdJson>,
    _admin: IsAdmin
) -> Result<HttpResponse, ApiError> {
    decide(&pool, json.id, Approval::Approved).await
}

#[tracing::instrument(
    "Rejecting restaurant account",
    skip(pool, _admin)
)]
pub async fn reject_user(
    pool: web::Data<DbPool>,
    json: web::Json<UserIdJson>,
    _admin: IsAdmin
) -> Result<HttpResponse, ApiError> {
    decide(&pool, json.id, Approval::Rejected).await
}
