pub mod login;
pub mod register;

use serde::{Deserialize, Serialize};

use crate::models::UserRecord;

// Body of successful register / login responses: the user record plus the
// session token to send back as `Authorization: Bearer <token>`
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse{
    #[serde(flatten)]
    pub user: UserRecord,
    pub token: String
}

pub use login::*;
pub use register::*;
