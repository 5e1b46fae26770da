//! Client wrappers for the NAAI auth endpoints. Keeping these thin functions
//! here keeps paths and payload shapes out of the session state machine.

use crate::app_lib::{ApiClient, AppError};
use crate::features::auth::types::{AuthResponse, LoginRequest, MeResponse, SignupRequest, User};

/// Exchanges credentials for a token and profile.
pub async fn login(api: &ApiClient, request: &LoginRequest) -> Result<AuthResponse, AppError> {
    api.post("/auth/login", request).await
}

/// Registers an account; the response shape matches login.
pub async fn signup(api: &ApiClient, request: &SignupRequest) -> Result<AuthResponse, AppError> {
    api.post("/auth/signup", request).await
}

/// Fetches the profile behind the current bearer token.
pub async fn me(api: &ApiClient) -> Result<User, AppError> {
    let response: MeResponse = api.get("/auth/me").await?;
    Ok(response.user)
}
