use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    calculate_tax, create_tax_type, delete_tax_type, get_tax_type, list_tax_types,
};

/// Mounted under `/tax`.
pub fn init_tax_types_router() -> Router<AppState> {
    Router::new()
        .route("/tipos", get(list_tax_types).post(create_tax_type))
        .route("/tipos/{id}", get(get_tax_type).delete(delete_tax_type))
        .route("/calculo", post(calculate_tax))
}
