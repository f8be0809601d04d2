use anyhow::anyhow;
use tracing::{info, instrument};

use taxdesk_core::AppError;

use super::model::{CalculateTaxRequest, CalculateTaxResponse, CreateTaxTypeDto, TaxType};
use super::repository::TaxTypeRepository;

pub const TAX_TYPE_NOT_FOUND: &str = "Tax type not found";

fn not_found() -> AppError {
    AppError::not_found(anyhow!(TAX_TYPE_NOT_FOUND))
}

pub struct TaxTypeService;

impl TaxTypeService {
    pub async fn list(repo: &TaxTypeRepository) -> Result<Vec<TaxType>, AppError> {
        repo.list().await
    }

    #[instrument(skip(repo))]
    pub async fn get(repo: &TaxTypeRepository, id: i64) -> Result<TaxType, AppError> {
        repo.find_by_id(id).await?.ok_or_else(not_found)
    }

    #[instrument(skip_all, fields(name = %dto.name))]
    pub async fn create(
        repo: &TaxTypeRepository,
        dto: CreateTaxTypeDto,
    ) -> Result<TaxType, AppError> {
        let created = repo.insert(dto.into()).await?;
        info!(tax_type_id = created.id, "Tax type created");
        Ok(created)
    }

    #[instrument(skip(repo))]
    pub async fn delete(repo: &TaxTypeRepository, id: i64) -> Result<(), AppError> {
        if !repo.delete(id).await? {
            return Err(not_found());
        }
        info!("Tax type deleted");
        Ok(())
    }

    /// `taxValue = baseValue * rate / 100`.
    #[instrument(skip_all, fields(tax_id = request.tax_id))]
    pub async fn calculate(
        repo: &TaxTypeRepository,
        request: CalculateTaxRequest,
    ) -> Result<CalculateTaxResponse, AppError> {
        let tax = Self::get(repo, request.tax_id).await?;
        Ok(CalculateTaxResponse::for_tax(&tax, request.base_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn repo_with_icms() -> TaxTypeRepository {
        let repo = TaxTypeRepository::in_memory();
        TaxTypeService::create(
            &repo,
            CreateTaxTypeDto {
                name: " ICMS ".into(),
                description: "Imposto estadual".into(),
                rate: 18.0,
            },
        )
        .await
        .unwrap();
        repo
    }

    #[tokio::test]
    async fn test_create_trims_and_get() {
        let repo = repo_with_icms().await;
        let tax = TaxTypeService::get(&repo, 1).await.unwrap();
        assert_eq!(tax.name, "ICMS");
    }

    #[tokio::test]
    async fn test_missing_tax_type() {
        let repo = repo_with_icms().await;

        let err = TaxTypeService::get(&repo, 99).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.error.to_string(), TAX_TYPE_NOT_FOUND);

        let err = TaxTypeService::delete(&repo, 99).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_calculate() {
        let repo = repo_with_icms().await;
        let result = TaxTypeService::calculate(
            &repo,
            CalculateTaxRequest {
                tax_id: 1,
                base_value: 250.0,
            },
        )
        .await
        .unwrap();

        assert_eq!(result.tax_type, "ICMS");
        assert_eq!(result.base_value, 250.0);
        assert!((result.tax_value - 45.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_calculate_unknown_tax() {
        let repo = TaxTypeRepository::in_memory();
        let err = TaxTypeService::calculate(
            &repo,
            CalculateTaxRequest {
                tax_id: 7,
                base_value: 1.0,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
