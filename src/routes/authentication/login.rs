use actix_web::{web, HttpResponse};
use anyhow::Context;
use secrecy::SecretString;
use serde::Deserialize;

use crate::{auth::jwt::Tokenizer, db_interaction::get_user_from_email, domain::UserEmail, error::ApiError, models::UserRecord, password::verify_password, utils::{get_pooled_connection, DbPool}};

use super::AuthResponse;

#[derive(Deserialize, Debug)]
pub struct LoginForm{
    pub email: String,
    pub password: SecretString
}

// Unknown email and wrong password fail the same way
#[tracing::instrument(
    "Logging in user",
    skip(pool, tokenizer, form),
    fields(email = %form.email)
)]
pub async fn login(
    form: web::Json<LoginForm>,
    pool: web::Data<DbPool>,
    tokenizer: web::Data<Tokenizer>
) -> Result<HttpResponse, ApiError>{
    let form = form.into_inner();
    let email = UserEmail::parse(form.email)
                    .map_err(|_| ApiError::AuthenticationFailure)?;

    let conn = get_pooled_connection(&pool).await?;

    let user = match get_user_from_email(conn, email.0).await? {
        Some(user) => user,
        None => {
            tracing::info!("No user registered with this email");
            return Err(ApiError::AuthenticationFailure)
        }
    };

    if !verify_password(form.password, user.password.clone()).await? {
        tracing::info!("Passwords did not match");
        return Err(ApiError::AuthenticationFailure)
    }

    let user = UserRecord::try_from(user)?;
    let token = tokenizer.generate_key(&user)
        .context("Failed to issue session token")?;

    Ok(HttpResponse::Ok().json(AuthResponse{ user, token }))
}
