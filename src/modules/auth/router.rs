use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::login_user;

/// Mounted under `/users` next to the users router.
pub fn init_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login_user))
}
