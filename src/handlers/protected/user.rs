// handlers/protected/user.rs - GET /api/user handler

use axum::{extract::Extension, response::Json};

use crate::middleware::AuthUser;

/// GET /api/user - the identity carried by the bearer token
pub async fn user_get(Extension(user): Extension<AuthUser>) -> Json<AuthUser> {
    Json(user)
}
