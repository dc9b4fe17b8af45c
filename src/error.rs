use std::{error::Error, fmt::Debug};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{db_interaction::{CartWriteError, FoodItemWriteError, PlaceOrderError, SetApprovalError, UpdateOrderStatusError, UserInsertError}, utils::{error_fmt_chain, PoolGetError}};

// Body of every response that only carries a status message
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct MessageResponse{
    pub message: String
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

// Error returned across the request boundary. Client errors carry their
// message verbatim; storage faults are logged and answered generically
#[derive(Error)]
pub enum ApiError{
    #[error("{0}")]
    ValidationConflict(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Invalid email or password")]
    AuthenticationFailure,
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Server Error")]
    StorageFault(#[source] anyhow::Error)
}

impl Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationConflict(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthenticationFailure | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::StorageFault(_) => StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        if let ApiError::StorageFault(_) = self {
            tracing::error!(error = ?self, "Request failed with an internal fault");
        }

        HttpResponse::build(self.status_code()).json(MessageResponse::new(self.to_string()))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::StorageFault(e)
    }
}

impl From<PoolGetError> for ApiError {
    fn from(e: PoolGetError) -> Self {
        ApiError::StorageFault(anyhow::Error::new(e).context("Failed to get connection from pool"))
    }
}

impl From<UserInsertError> for ApiError {
    fn from(e: UserInsertError) -> Self {
        match e {
            UserInsertError::EmailNotUnique(_) => ApiError::ValidationConflict("User already exists".to_string()),
            UserInsertError::AdminRegistrationClosed => ApiError::Forbidden("Admin accounts must be created by an admin".to_string()),
            other => ApiError::StorageFault(anyhow::Error::new(other))
        }
    }
}

impl From<SetApprovalError> for ApiError {
    fn from(e: SetApprovalError) -> Self {
        match e {
            SetApprovalError::NoUserIdError(_) => ApiError::NotFound("User not found".to_string()),
            other => ApiError::StorageFault(anyhow::Error::new(other))
        }
    }
}

impl From<FoodItemWriteError> for ApiError {
    fn from(e: FoodItemWriteError) -> Self {
        match e {
            FoodItemWriteError::NoRestaurantError(_) => ApiError::NotFound("Restaurant not found".to_string()),
            FoodItemWriteError::NoFoodItemError(_) => ApiError::NotFound("Product not found".to_string()),
            FoodItemWriteError::NotOwnerError(_) => ApiError::Forbidden("Restaurant belongs to another owner".to_string()),
            FoodItemWriteError::NotApprovedError(_) => ApiError::Forbidden("Restaurant is not approved".to_string()),
            other => ApiError::StorageFault(anyhow::Error::new(other))
        }
    }
}

impl From<CartWriteError> for ApiError {
    fn from(e: CartWriteError) -> Self {
        match e {
            CartWriteError::NoRestaurantError(_) => ApiError::NotFound("Restaurant not found".to_string()),
            CartWriteError::NoFoodItemError(_, _) => ApiError::NotFound("Food item not found".to_string()),
            CartWriteError::NoCartLineError(_) => ApiError::NotFound("Cart item not found".to_string()),
            e @ CartWriteError::QuantityLimitError(_) => ApiError::BadRequest(e.to_string()),
            other => ApiError::StorageFault(anyhow::Error::new(other))
        }
    }
}

impl From<PlaceOrderError> for ApiError {
    fn from(e: PlaceOrderError) -> Self {
        ApiError::StorageFault(anyhow::Error::new(e))
    }
}

impl From<UpdateOrderStatusError> for ApiError {
    fn from(e: UpdateOrderStatusError) -> Self {
        match e {
            UpdateOrderStatusError::NoOrderIdError(_) => ApiError::NotFound("Order not found".to_string()),
            UpdateOrderStatusError::NotApprovedError(_) => ApiError::Forbidden("Restaurant is not approved".to_string()),
            other => ApiError::StorageFault(anyhow::Error::new(other))
        }
    }
}
