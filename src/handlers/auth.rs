use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    handlers::json::AppJson,
    models::user::PublicUser,
    services::auth::{self as auth_service, Registration},
    state::AppState,
};

/// The request payload for user registration.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
}

/// The request payload for user login.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// The request payload for starting a password reset.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StartResetRequest {
    #[serde(default)]
    pub email: String,
}

/// The request payload for completing a password reset.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CompleteResetRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub new_password: String,
    pub confirm_password: Option<String>,
}

/// The response payload for authentication-related requests.
#[derive(Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicUser>,
}

impl AuthResponse {
    fn ok(message: &str, user: Option<PublicUser>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.to_string(),
            user,
        })
    }
}

/// The response payload for the current session.
#[derive(Serialize)]
pub struct SessionResponse {
    pub session: Option<PublicUser>,
}

/// Handles user registration.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse> {
    state.processing_delay().await;
    let _ui = state.ui_thread().await;

    let user = auth_service::register(
        &state.store,
        Registration {
            email: payload.email,
            password: payload.password,
            firstname: payload.firstname,
            lastname: payload.lastname,
        },
    )?;

    Ok((
        StatusCode::CREATED,
        AuthResponse::ok(
            "Registration successful. Please log in.",
            Some(PublicUser::from(&user)),
        ),
    ))
}

/// Handles user login.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse> {
    state.processing_delay().await;
    let _ui = state.ui_thread().await;

    let session = auth_service::login(
        &state.store,
        &payload.email,
        &payload.password,
        state.login_options(),
    )?;

    Ok(AuthResponse::ok(
        "Login successful. Welcome back!",
        Some(PublicUser::from(session.user())),
    ))
}

/// Handles user logout. Succeeds even when nobody is logged in.
#[axum::debug_handler]
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let _ui = state.ui_thread().await;
    auth_service::logout(&state.store);
    AuthResponse::ok("Logged out successfully", None)
}

/// Returns the current session for the header profile menu.
#[axum::debug_handler]
pub async fn current_session(State(state): State<AppState>) -> impl IntoResponse {
    let _ui = state.ui_thread().await;
    let session = state
        .store
        .current_session()
        .map(|s| PublicUser::from(s.user()));
    Json(SessionResponse { session })
}

/// Handles the first step of a password reset.
#[axum::debug_handler]
pub async fn start_password_reset(
    State(state): State<AppState>,
    AppJson(payload): AppJson<StartResetRequest>,
) -> Result<impl IntoResponse> {
    state.processing_delay().await;
    let _ui = state.ui_thread().await;

    auth_service::start_password_reset(&state.store, &payload.email)?;

    Ok(AuthResponse::ok("Account found. Enter a new password.", None))
}

/// Handles the second step of a password reset.
#[axum::debug_handler]
pub async fn complete_password_reset(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CompleteResetRequest>,
) -> Result<impl IntoResponse> {
    state.processing_delay().await;
    let _ui = state.ui_thread().await;

    auth_service::complete_password_reset(
        &state.store,
        &payload.email,
        &payload.new_password,
        payload.confirm_password.as_deref(),
    )?;

    Ok(AuthResponse::ok(
        "Password updated. You can now log in.",
        None,
    ))
}
