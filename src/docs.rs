use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::modules::tax_types::model::{
    CalculateTaxRequest, CalculateTaxResponse, CreateTaxTypeDto, TaxType,
};
use crate::modules::users::model::{CreateUserDto, UserResponse, UserRole};

/// Body of every error response.
#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::tax_types::controller::list_tax_types,
        crate::modules::tax_types::controller::get_tax_type,
        crate::modules::tax_types::controller::create_tax_type,
        crate::modules::tax_types::controller::delete_tax_type,
        crate::modules::tax_types::controller::calculate_tax,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            CreateUserDto,
            UserResponse,
            UserRole,
            TaxType,
            CreateTaxTypeDto,
            CalculateTaxRequest,
            CalculateTaxResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token issuance"),
        (name = "Users", description = "User registration and listing"),
        (name = "Tax Types", description = "Tax type catalog and tax calculation")
    ),
    info(
        title = "Taxdesk API",
        version = "0.1.0",
        description = "Tax type catalog behind bearer-token authentication and role-based route rules.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
