use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::users::controller::{create_user, get_users};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users).post(create_user))
        .route("/register", post(create_user))
}
