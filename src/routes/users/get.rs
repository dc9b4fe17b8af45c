use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::{auth::extractors::{IsAdmin, IsUser}, db_interaction::{get_user_by_id, list_users}, error::ApiError, models::UserRecord, utils::{get_pooled_connection, DbPool}};

#[tracing::instrument(
    "Getting list of users",
    skip(pool, _admin)
)]
pub async fn fetch_users(
    pool: web::Data<DbPool>,
    _admin: IsAdmin
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    let users = list_users(conn).await?
        .into_iter()
        .map(UserRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HttpResponse::Ok().json(users))
}

// Users may read their own record; admins may read anyone's
#[tracing::instrument(
    "Getting user details",
    skip(pool, uid)
)]
pub async fn fetch_user_details(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    uid: IsUser
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();

    if !uid.0.may_act_for(user_id) {
        return Err(ApiError::Forbidden("Not allowed to view this user".to_string()))
    }

    let conn = get_pooled_connection(&pool).await?;

    let user = get_user_by_id(conn, user_id).await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(UserRecord::try_from(user)?))
}
