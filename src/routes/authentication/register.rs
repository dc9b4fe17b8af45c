use actix_web::{web, HttpResponse};
use anyhow::Context;
use secrecy::SecretString;
use serde::Deserialize;
use validator::Validate;

use crate::{auth::{extractors::IsUser, jwt::Tokenizer}, db_interaction::{insert_user_into_database, NewAccount}, domain::{UserEmail, UserType, ValidPassword}, error::ApiError, models::UserRecord, password::hash_password, utils::{get_pooled_connection, DbPool}};

use super::AuthResponse;

#[derive(Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm{
    #[validate(length(min = 1, max = 100, message = "Username must be between 1 and 100 characters"))]
    pub username: String,
    pub email: String,
    pub usertype: UserType,
    pub password: SecretString,
    #[serde(default)]
    pub restaurant_address: Option<String>,
    #[serde(default)]
    pub restaurant_image: Option<String>
}

// Anyone may register as customer or restaurant. Admin accounts need an
// admin's token once the first admin exists
#[tracing::instrument(
    "User registration started",
    skip(pool, tokenizer, form, caller),
    fields(email = %form.email, usertype = form.usertype.as_str())
)]
pub async fn register(
    form: web::Json<RegistrationForm>,
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>,
    caller: Option<IsUser>
) -> Result<HttpResponse, ApiError> {
    form.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let form = form.into_inner();
    let username = form.username.trim().to_string();
    if username.is_empty() {
        return Err(ApiError::BadRequest("Username must not be empty".to_string()))
    }

    let email = UserEmail::parse(form.email).map_err(ApiError::BadRequest)?;
    let password = ValidPassword::parse(form.password).map_err(ApiError::BadRequest)?;

    let password_hash = hash_password(password.into_secret()).await?;

    let conn = get_pooled_connection(&pool).await?;

    let user = insert_user_into_database(conn, NewAccount{
        username,
        email,
        usertype: form.usertype,
        password_hash,
        restaurant_address: form.restaurant_address.unwrap_or_default(),
        restaurant_image: form.restaurant_image.unwrap_or_default(),
        created_by_admin: caller.is_some_and(|caller| caller.0.is_admin())
    })
    .await?;

    let user = UserRecord::try_from(user)?;
    let token = tokenizer.generate_key(&user)
        .context("Failed to issue session token")?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(HttpResponse::Created().json(AuthResponse{ user, token }))
}
