//! Industry operations on top of the injected store

use super::model::{AssignCompany, CompanyIndustry, Industry, IndustryWithCompanies, NewIndustry};
use crate::core::error::{ApiError, ApiResult};
use crate::core::store::Store;
use crate::core::validation::validate_request;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct IndustryService {
    store: Arc<dyn Store>,
}

impl IndustryService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Every industry with the codes of its companies
    ///
    /// Industries and assignments are fetched separately and joined here.
    pub async fn list(&self) -> ApiResult<Vec<IndustryWithCompanies>> {
        let (industries, assignments) = tokio::try_join!(
            self.store.list_industries(),
            self.store.list_assignments(),
        )?;

        let mut companies_by_industry: HashMap<String, Vec<String>> = HashMap::new();
        for assignment in assignments {
            companies_by_industry
                .entry(assignment.industry_code)
                .or_default()
                .push(assignment.company_code);
        }

        Ok(industries
            .into_iter()
            .map(|industry| {
                let companies = companies_by_industry
                    .remove(&industry.code)
                    .unwrap_or_default();
                IndustryWithCompanies::new(industry, companies)
            })
            .collect())
    }

    pub async fn get(&self, code: &str) -> ApiResult<IndustryWithCompanies> {
        let (industry, companies) = tokio::try_join!(
            self.store.get_industry(code),
            self.store.industry_company_codes(code),
        )?;

        let industry = industry.ok_or_else(|| ApiError::not_found("industry", code))?;
        Ok(IndustryWithCompanies::new(industry, companies))
    }

    pub async fn create(&self, new: NewIndustry) -> ApiResult<Industry> {
        validate_request(&new)?;

        let industry = self.store.insert_industry(new.into()).await?;
        tracing::info!(code = %industry.code, "Created industry");
        Ok(industry)
    }

    /// Assign a company to an industry; not idempotent
    pub async fn assign_company(
        &self,
        industry_code: &str,
        request: AssignCompany,
    ) -> ApiResult<CompanyIndustry> {
        validate_request(&request)?;

        let assignment = self
            .store
            .insert_assignment(CompanyIndustry {
                company_code: request.company_code,
                industry_code: industry_code.to_string(),
            })
            .await?;

        tracing::info!(
            company_code = %assignment.company_code,
            industry_code = %assignment.industry_code,
            "Assigned company to industry"
        );
        Ok(assignment)
    }

    pub async fn delete(&self, code: &str) -> ApiResult<()> {
        if !self.store.delete_industry(code).await? {
            return Err(ApiError::not_found("industry", code));
        }

        tracing::info!(code, "Deleted industry");
        Ok(())
    }
}
