//! Company entity model

use crate::core::slug::slugify;
use crate::entities::invoice::Invoice;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stored company row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: String,
}

/// A company together with its industry names and invoices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    pub code: String,
    pub name: String,
    pub description: String,
    pub industries: Vec<String>,
    pub invoices: Vec<Invoice>,
}

impl CompanyDetail {
    pub fn new(company: Company, industries: Vec<String>, invoices: Vec<Invoice>) -> Self {
        Self {
            code: company.code,
            name: company.name,
            description: company.description,
            industries,
            invoices,
        }
    }
}

/// Body of `POST /companies`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewCompany {
    #[validate(custom(function = "crate::core::validation::not_blank"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Explicit code; slugified like a name when present
    #[serde(default)]
    pub code: Option<String>,
}

impl NewCompany {
    /// The code the company will be stored under
    pub fn code(&self) -> String {
        slugify(self.code.as_deref().unwrap_or(&self.name))
    }

    pub fn into_company(self) -> Company {
        Company {
            code: self.code(),
            name: self.name,
            description: self.description,
        }
    }
}

/// Body of `PUT /companies/{code}`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CompanyChanges {
    #[validate(custom(function = "crate::core::validation::not_blank"))]
    pub name: String,
    pub description: String,
}
