use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::{
    error::Result,
    models::user::User,
    services::auth as auth_service,
    services::tokens,
    state::AppState,
    validation::auth::*,
};

/// The request payload for user registration.
#[derive(Deserialize, Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// The request payload for user login.
#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Serializes a user for a response body.
///
/// The password hash stays server-side.
fn user_json(user: &User) -> sonic_rs::Value {
    sonic_rs::json!({
        "id": user.id.to_string(),
        "username": user.username,
        "email": user.email,
        "created_at": user.created_at.to_rfc3339()
    })
}

/// Handles user registration.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Response> {
    tracing::info!("Register attempt for: {}", payload.email);
    validate_username(&payload.username)?;
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;

    let user = auth_service::register(
        &state.db,
        payload.username,
        payload.email,
        payload.password,
    )
    .await?;

    tracing::info!("User registered: {}", user.id);

    let response = sonic_rs::to_string(&sonic_rs::json!({
        "message": "User registered successfully",
        "user": user_json(&user)
    }))
    .unwrap();

    Ok((StatusCode::CREATED, response).into_response())
}

/// Handles user login.
///
/// On success the response carries the user record and a signed session
/// token expiring one hour after issuance.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response> {
    tracing::info!("Login attempt for: {}", payload.email);

    let user = auth_service::login(&state.db, payload.email, payload.password).await?;

    let token = tokens::issue(user.id, &state.config)?;

    tracing::info!("User logged in: {}", user.id);

    let response = sonic_rs::to_string(&sonic_rs::json!({
        "user": user_json(&user),
        "token": token
    }))
    .unwrap();

    Ok((StatusCode::OK, response).into_response())
}
