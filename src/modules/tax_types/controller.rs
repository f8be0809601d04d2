use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use taxdesk_core::AppError;

use crate::docs::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{CalculateTaxRequest, CalculateTaxResponse, CreateTaxTypeDto, TaxType};
use super::service::TaxTypeService;

/// List tax types
#[utoipa::path(
    get,
    path = "/tax/tipos",
    responses(
        (status = 200, description = "All tax types", body = Vec<TaxType>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tax Types"
)]
#[instrument(skip_all)]
pub async fn list_tax_types(State(state): State<AppState>) -> Result<Json<Vec<TaxType>>, AppError> {
    let taxes = TaxTypeService::list(&state.tax_types).await?;
    Ok(Json(taxes))
}

/// Get a tax type by ID
#[utoipa::path(
    get,
    path = "/tax/tipos/{id}",
    params(
        ("id" = i64, Path, description = "Tax type ID")
    ),
    responses(
        (status = 200, description = "Tax type found", body = TaxType),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Tax type not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tax Types"
)]
#[instrument(skip(state))]
pub async fn get_tax_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TaxType>, AppError> {
    let tax = TaxTypeService::get(&state.tax_types, id).await?;
    Ok(Json(tax))
}

/// Create a tax type (admin only)
#[utoipa::path(
    post,
    path = "/tax/tipos",
    request_body = CreateTaxTypeDto,
    responses(
        (status = 201, description = "Tax type created", body = TaxType),
        (status = 401, description = "Missing token or not an admin", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tax Types"
)]
#[instrument(skip_all)]
pub async fn create_tax_type(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateTaxTypeDto>,
) -> Result<(StatusCode, Json<TaxType>), AppError> {
    let tax = TaxTypeService::create(&state.tax_types, dto).await?;
    Ok((StatusCode::CREATED, Json(tax)))
}

/// Delete a tax type (admin only)
#[utoipa::path(
    delete,
    path = "/tax/tipos/{id}",
    params(
        ("id" = i64, Path, description = "Tax type ID")
    ),
    responses(
        (status = 204, description = "Tax type deleted"),
        (status = 401, description = "Missing token or not an admin", body = ErrorResponse),
        (status = 404, description = "Tax type not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tax Types"
)]
#[instrument(skip(state))]
pub async fn delete_tax_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    TaxTypeService::delete(&state.tax_types, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Calculate the tax owed on a base value (admin only)
#[utoipa::path(
    post,
    path = "/tax/calculo",
    request_body = CalculateTaxRequest,
    responses(
        (status = 200, description = "Calculated tax", body = CalculateTaxResponse),
        (status = 401, description = "Missing token or not an admin", body = ErrorResponse),
        (status = 404, description = "Tax type not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Tax Types"
)]
#[instrument(skip_all)]
pub async fn calculate_tax(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CalculateTaxRequest>,
) -> Result<Json<CalculateTaxResponse>, AppError> {
    let result = TaxTypeService::calculate(&state.tax_types, request).await?;
    Ok(Json(result))
}
