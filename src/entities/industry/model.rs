//! Industry entity model and company assignments

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stored industry row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Industry {
    pub code: String,
    pub industry: String,
}

/// An industry with the codes of its assigned companies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryWithCompanies {
    pub code: String,
    pub industry: String,
    pub companies: Vec<String>,
}

impl IndustryWithCompanies {
    pub fn new(industry: Industry, companies: Vec<String>) -> Self {
        Self {
            code: industry.code,
            industry: industry.industry,
            companies,
        }
    }
}

/// One row of the company/industry association table
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct CompanyIndustry {
    pub company_code: String,
    pub industry_code: String,
}

/// Body of `POST /industries`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewIndustry {
    #[validate(custom(function = "crate::core::validation::not_blank"))]
    pub code: String,
    #[validate(custom(function = "crate::core::validation::not_blank"))]
    pub industry: String,
}

impl From<NewIndustry> for Industry {
    fn from(new: NewIndustry) -> Self {
        Industry {
            code: new.code,
            industry: new.industry,
        }
    }
}

/// Body of `POST /industries/assign-company/{industry_code}`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AssignCompany {
    #[validate(custom(function = "crate::core::validation::not_blank"))]
    pub company_code: String,
}
