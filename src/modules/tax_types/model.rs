use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validator::not_blank;

/// A tax type in the catalog. `rate` is a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TaxType {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub rate: f64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTaxTypeDto {
    #[serde(rename = "nome")]
    #[validate(
        custom(function = "not_blank", message = "nome is required"),
        length(max = 50, message = "nome must be at most 50 characters")
    )]
    pub name: String,
    #[serde(rename = "descricao")]
    #[validate(custom(function = "not_blank", message = "descricao is required"))]
    pub description: String,
    #[serde(rename = "aliquota")]
    #[validate(range(exclusive_min = 0.0, message = "aliquota must be greater than zero"))]
    pub rate: f64,
}

#[derive(Debug, Clone)]
pub struct NewTaxType {
    pub name: String,
    pub description: String,
    pub rate: f64,
}

impl From<CreateTaxTypeDto> for NewTaxType {
    fn from(dto: CreateTaxTypeDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            description: dto.description.trim().to_string(),
            rate: dto.rate,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculateTaxRequest {
    #[validate(range(min = 1, message = "taxId must be greater than zero"))]
    pub tax_id: i64,
    #[validate(range(exclusive_min = 0.0, message = "baseValue must be greater than zero"))]
    pub base_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculateTaxResponse {
    /// Name of the tax type applied.
    pub tax_type: String,
    pub base_value: f64,
    pub rate: f64,
    pub tax_value: f64,
}

impl CalculateTaxResponse {
    pub fn for_tax(tax: &TaxType, base_value: f64) -> Self {
        Self {
            tax_type: tax.name.clone(),
            base_value,
            rate: tax.rate,
            tax_value: base_value * tax.rate / 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icms() -> TaxType {
        TaxType {
            id: 1,
            name: "ICMS".into(),
            description: "Imposto sobre circulação de mercadorias".into(),
            rate: 18.0,
        }
    }

    #[test]
    fn test_calculation() {
        let response = CalculateTaxResponse::for_tax(&icms(), 1000.0);
        assert_eq!(response.tax_type, "ICMS");
        assert_eq!(response.rate, 18.0);
        assert!((response.tax_value - 180.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_create_dto_uses_portuguese_field_names() {
        let dto: CreateTaxTypeDto = serde_json::from_str(
            r#"{"nome": "ISS", "descricao": "Imposto sobre serviços", "aliquota": 5.0}"#,
        )
        .unwrap();
        assert_eq!(dto.name, "ISS");
        assert_eq!(dto.rate, 5.0);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_non_positive_rate() {
        let dto = CreateTaxTypeDto {
            name: "ISS".into(),
            description: "x".into(),
            rate: 0.0,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("rate"));
    }

    #[test]
    fn test_calculate_request_validation() {
        let request: CalculateTaxRequest =
            serde_json::from_str(r#"{"taxId": 0, "baseValue": -1}"#).unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("tax_id"));
        assert!(fields.contains_key("base_value"));
    }

    #[test]
    fn test_response_is_camel_case() {
        let json = serde_json::to_value(CalculateTaxResponse::for_tax(&icms(), 100.0)).unwrap();
        assert_eq!(json["taxType"], "ICMS");
        assert_eq!(json["baseValue"], 100.0);
        assert_eq!(json["taxValue"], 18.0);
    }
}
