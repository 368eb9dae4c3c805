use axum::{Json, extract::State};
use serde::Serialize;

use crate::{
    error::{AppError, Result},
    models::user::PublicUser,
    state::AppState,
};

/// The response payload for the admin users table.
#[derive(Serialize)]
pub struct UsersResponse {
    pub total: usize,
    pub users: Vec<PublicUser>,
}

/// Lists the registry for the admin dashboard, in registration order.
#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UsersResponse>> {
    let _ui = state.ui_thread().await;

    let is_admin = state
        .store
        .current_session()
        .is_some_and(|s| s.user().is_admin());
    if !is_admin {
        return Err(AppError::Unauthorized);
    }

    let users: Vec<PublicUser> = state.store.list_users().iter().map(PublicUser::from).collect();
    tracing::debug!("📋 Admin listed {} users", users.len());

    Ok(Json(UsersResponse {
        total: users.len(),
        users,
    }))
}
