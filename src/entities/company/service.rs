//! Company operations on top of the injected store

use super::model::{Company, CompanyChanges, CompanyDetail, NewCompany};
use crate::core::error::{ApiError, ApiResult, ValidationError};
use crate::core::store::Store;
use crate::core::validation::validate_request;
use std::sync::Arc;

#[derive(Clone)]
pub struct CompanyService {
    store: Arc<dyn Store>,
}

impl CompanyService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> ApiResult<Vec<Company>> {
        self.store.list_companies().await
    }

    /// A company with its industry names and invoices
    pub async fn get(&self, code: &str) -> ApiResult<CompanyDetail> {
        let (company, industries, invoices) = tokio::try_join!(
            self.store.get_company(code),
            self.store.company_industry_names(code),
            self.store.invoices_for_company(code),
        )?;

        let company = company.ok_or_else(|| ApiError::not_found("company", code))?;
        Ok(CompanyDetail::new(company, industries, invoices))
    }

    pub async fn create(&self, new: NewCompany) -> ApiResult<Company> {
        validate_request(&new)?;

        let company = new.into_company();
        if company.code.is_empty() {
            return Err(ValidationError::FieldError {
                field: "code".to_string(),
                message: "must contain at least one letter or digit".to_string(),
            }
            .into());
        }

        let company = self.store.insert_company(company).await?;
        tracing::info!(code = %company.code, "Created company");
        Ok(company)
    }

    pub async fn update(&self, code: &str, changes: CompanyChanges) -> ApiResult<Company> {
        validate_request(&changes)?;

        let company = self
            .store
            .update_company(code, &changes)
            .await?
            .ok_or_else(|| ApiError::not_found("company", code))?;

        tracing::info!(code = %company.code, "Updated company");
        Ok(company)
    }

    pub async fn delete(&self, code: &str) -> ApiResult<()> {
        if !self.store.delete_company(code).await? {
            return Err(ApiError::not_found("company", code));
        }

        tracing::info!(code, "Deleted company");
        Ok(())
    }
}
