use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::{domain::{Approval, UserType}, error::ApiError};

use super::jwt::{Claims, Tokenizer};

// Extractor for any logged in user
#[derive(Debug)]
pub struct IsUser(pub Claims);

// Extractor for admin role
#[derive(Debug)]
pub struct IsAdmin(pub Uuid);

// Extractor for an approved restaurant owner
#[derive(Debug)]
pub struct IsRestaurant(pub Uuid);

fn claims_from_request(req: &HttpRequest) -> Result<Claims, ApiError> {
    let tokenizer = req.app_data::<web::Data<Tokenizer>>()
        .ok_or_else(|| ApiError::StorageFault(anyhow::anyhow!("Tokenizer missing from app data")))?;

    let token = req.headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Missing session token".to_string()))?;

    tokenizer.decode_key(token)
        .ok_or_else(|| ApiError::Unauthorized("Invalid session token".to_string()))
}

impl FromRequest for IsUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(claims_from_request(req).map(IsUser))
    }
}

impl FromRequest for IsAdmin {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let res = claims_from_request(req).and_then(|claims| {
            match claims.role {
                UserType::Admin => Ok(IsAdmin(claims.sub)),
                _ => Err(ApiError::Forbidden("Unauthorized Role".to_string()))
            }
        });

        ready(res)
    }
}

impl FromRequest for IsRestaurant {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let res = claims_from_request(req).and_then(|claims| {
            match (claims.role, claims.approval) {
                (UserType::Restaurant, Approval::Approved) => Ok(IsRestaurant(claims.sub)),
                (UserType::Restaurant, _) => Err(ApiError::Forbidden("Restaurant is not approved".to_string())),
                _ => Err(ApiError::Forbidden("Unauthorized Role".to_string()))
            }
        });

        ready(res)
    }
}
