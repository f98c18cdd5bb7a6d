/**
 * Authentication Handler Types
 *
 * Request and response types shared by the authentication handlers.
 * Password fields are consumed and hashed; they never appear in responses
 * or logs.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sign up request
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    /// User's email address
    pub email: String,
    /// User's password (hashed before storage)
    pub password: String,
}

/// Sign up response
#[derive(Serialize, Debug)]
pub struct SignupResponse {
    /// Id of the newly created user
    pub user_id: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    /// User's email address
    pub email: String,
    /// User's password (verified against the stored hash)
    pub password: String,
}

/// Login response
#[derive(Serialize, Debug)]
pub struct LoginResponse {
    /// Signed session token (1 hour expiry)
    pub token: String,
}

/// Current-user response (no sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    /// User's unique ID
    pub id: String,
    /// User's email address
    pub email: String,
}

/// Password reset request
#[derive(Deserialize, Serialize, Debug)]
pub struct RequestResetRequest {
    /// Email of the account to reset
    pub email: String,
}

/// Password reset response.
///
/// The token is returned directly to the requester; see DESIGN.md for why
/// this in-band delivery is preserved from the original design.
#[derive(Serialize, Debug)]
pub struct RequestResetResponse {
    /// Opaque single-use reset token
    pub token: String,
    /// Expiry instant of the token
    pub expires_at: DateTime<Utc>,
}

/// Reset token verification response
#[derive(Serialize, Debug)]
pub struct VerifyResetResponse {
    /// Always true on success (failures answer with an error body)
    pub valid: bool,
    /// Owner of the token
    pub user_id: String,
}

/// Password reset execution request
#[derive(Deserialize, Serialize, Debug)]
pub struct ResetPasswordRequest {
    /// The reset token obtained from request-reset
    pub token: String,
    /// The replacement password
    pub new_password: String,
}

/// Account deletion request
#[derive(Deserialize, Serialize, Debug)]
pub struct DeleteAccountRequest {
    /// The caller's current password, as confirmation
    pub password: String,
}

/// Generic success response
#[derive(Serialize, Debug)]
pub struct OkResponse {
    /// Always true; failures answer with an error body instead
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}
