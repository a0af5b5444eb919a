pub mod error;
pub mod forgot_password;
pub mod login;
pub mod me;
pub mod register;
pub mod reset_password;
pub mod update_details;
pub mod update_password;

pub use error::{ApiError, ErrorResponse};
pub use forgot_password::forgot_password;
pub use login::login;
pub use me::me;
pub use register::register;
pub use reset_password::reset_password;
pub use update_details::update_details;
pub use update_password::update_password;

use gatehouse_core::User;
use serde::{Deserialize, Serialize};

/// Public projection of a user record as it appears in response bodies.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_owned(),
            email: user.email.as_str().to_owned(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Response for the endpoints that conclude by issuing a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

/// Response for credential changes, which re-key the session without
/// restating the profile.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
}
