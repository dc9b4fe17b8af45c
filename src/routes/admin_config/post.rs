use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{auth::extractors::IsAdmin, db_interaction::set_promoted_list, error::{ApiError, MessageResponse}, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PromoteListJson{
    pub promote_list: Vec<Uuid>
}

#[tracing::instrument(
    "Updating promoted restaurant list",
    skip(pool, _admin)
)]
pub async fn update_promote_list(
    pool: web::Data<DbPool>,
    json: web::Json<PromoteListJson>,
    _admin: IsAdmin
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;
    set_promoted_list(conn, json.into_inner().promote_list).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("approved")))
}
