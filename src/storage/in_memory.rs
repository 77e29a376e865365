//! In-memory store for testing and development
//!
//! All tables live behind a single `RwLock`, so every write observes and
//! mutates a consistent snapshot. The store enforces the same rules as the
//! PostgreSQL schema: primary keys, foreign keys, `RESTRICT` on invoices and
//! `CASCADE` on assignments.

use crate::core::error::{ApiResult, StorageError};
use crate::core::store::{CompanyStore, IndustryStore, InvoiceStore};
use crate::entities::company::{Company, CompanyChanges};
use crate::entities::industry::{CompanyIndustry, Industry};
use crate::entities::invoice::{Invoice, NewInvoice};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Tables {
    companies: BTreeMap<String, Company>,
    invoices: BTreeMap<i32, Invoice>,
    last_invoice_id: i32,
    industries: BTreeMap<String, Industry>,
    /// (industry_code, company_code)
    assignments: BTreeSet<(String, String)>,
}

/// In-memory store implementation
///
/// Cloning yields another handle on the same tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ApiResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|e| {
            StorageError::Poisoned {
                message: format!("Failed to acquire read lock: {}", e),
            }
            .into()
        })
    }

    fn write(&self) -> ApiResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|e| {
            StorageError::Poisoned {
                message: format!("Failed to acquire write lock: {}", e),
            }
            .into()
        })
    }
}

#[async_trait]
impl CompanyStore for InMemoryStore {
    async fn list_companies(&self) -> ApiResult<Vec<Company>> {
        Ok(self.read()?.companies.values().cloned().collect())
    }

    async fn get_company(&self, code: &str) -> ApiResult<Option<Company>> {
        Ok(self.read()?.companies.get(code).cloned())
    }

    async fn company_industry_names(&self, code: &str) -> ApiResult<Vec<String>> {
        let tables = self.read()?;
        Ok(tables
            .assignments
            .iter()
            .filter(|(_, company_code)| company_code == code)
            .filter_map(|(industry_code, _)| tables.industries.get(industry_code))
            .map(|industry| industry.industry.clone())
            .collect())
    }

    async fn insert_company(&self, company: Company) -> ApiResult<Company> {
        let mut tables = self.write()?;
        if tables.companies.contains_key(&company.code) {
            return Err(StorageError::unique(format!(
                "company code '{}' already exists",
                company.code
            ))
            .into());
        }
        tables
            .companies
            .insert(company.code.clone(), company.clone());
        Ok(company)
    }

    async fn update_company(
        &self,
        code: &str,
        changes: &CompanyChanges,
    ) -> ApiResult<Option<Company>> {
        let mut tables = self.write()?;
        Ok(tables.companies.get_mut(code).map(|company| {
            company.name = changes.name.clone();
            company.description = changes.description.clone();
            company.clone()
        }))
    }

    async fn delete_company(&self, code: &str) -> ApiResult<bool> {
        let mut tables = self.write()?;
        if !tables.companies.contains_key(code) {
            return Ok(false);
        }
        if tables.invoices.values().any(|inv| inv.comp_code == code) {
            return Err(StorageError::foreign_key(format!(
                "company '{}' is still referenced by invoices",
                code
            ))
            .into());
        }
        tables.companies.remove(code);
        tables
            .assignments
            .retain(|(_, company_code)| company_code != code);
        Ok(true)
    }
}

#[async_trait]
impl InvoiceStore for InMemoryStore {
    async fn list_invoices(&self) -> ApiResult<Vec<Invoice>> {
        Ok(self.read()?.invoices.values().cloned().collect())
    }

    async fn get_invoice(&self, id: i32) -> ApiResult<Option<Invoice>> {
        Ok(self.read()?.invoices.get(&id).cloned())
    }

    async fn invoices_for_company(&self, comp_code: &str) -> ApiResult<Vec<Invoice>> {
        Ok(self
            .read()?
            .invoices
            .values()
            .filter(|inv| inv.comp_code == comp_code)
            .cloned()
            .collect())
    }

    async fn insert_invoice(&self, invoice: &NewInvoice) -> ApiResult<Invoice> {
        let mut tables = self.write()?;
        if !tables.companies.contains_key(&invoice.comp_code) {
            return Err(StorageError::foreign_key(format!(
                "company '{}' does not exist",
                invoice.comp_code
            ))
            .into());
        }

        tables.last_invoice_id += 1;
        let stored = Invoice {
            id: tables.last_invoice_id,
            comp_code: invoice.comp_code.clone(),
            amt: invoice.amt,
            paid: false,
            add_date: Utc::now(),
            paid_date: None,
        };
        tables.invoices.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update_invoice(
        &self,
        id: i32,
        amt: f64,
        paid: bool,
        now: DateTime<Utc>,
    ) -> ApiResult<Option<Invoice>> {
        let mut tables = self.write()?;
        Ok(tables.invoices.get_mut(&id).map(|invoice| {
            invoice.apply_update(amt, paid, now);
            invoice.clone()
        }))
    }

    async fn delete_invoice(&self, id: i32) -> ApiResult<bool> {
        Ok(self.write()?.invoices.remove(&id).is_some())
    }
}

#[async_trait]
impl IndustryStore for InMemoryStore {
    async fn list_industries(&self) -> ApiResult<Vec<Industry>> {
        Ok(self.read()?.industries.values().cloned().collect())
    }

    async fn get_industry(&self, code: &str) -> ApiResult<Option<Industry>> {
        Ok(self.read()?.industries.get(code).cloned())
    }

    async fn list_assignments(&self) -> ApiResult<Vec<CompanyIndustry>> {
        Ok(self
            .read()?
            .assignments
            .iter()
            .map(|(industry_code, company_code)| CompanyIndustry {
                company_code: company_code.clone(),
                industry_code: industry_code.clone(),
            })
            .collect())
    }

    async fn industry_company_codes(&self, industry_code: &str) -> ApiResult<Vec<String>> {
        Ok(self
            .read()?
            .assignments
            .iter()
            .filter(|(code, _)| code == industry_code)
            .map(|(_, company_code)| company_code.clone())
            .collect())
    }

    async fn insert_industry(&self, industry: Industry) -> ApiResult<Industry> {
        let mut tables = self.write()?;
        if tables.industries.contains_key(&industry.code) {
            return Err(StorageError::unique(format!(
                "industry code '{}' already exists",
                industry.code
            ))
            .into());
        }
        tables
            .industries
            .insert(industry.code.clone(), industry.clone());
        Ok(industry)
    }

    async fn insert_assignment(&self, assignment: CompanyIndustry) -> ApiResult<CompanyIndustry> {
        let mut tables = self.write()?;
        if !tables.companies.contains_key(&assignment.company_code) {
            return Err(StorageError::foreign_key(format!(
                "company '{}' does not exist",
                assignment.company_code
            ))
            .into());
        }
        if !tables.industries.contains_key(&assignment.industry_code) {
            return Err(StorageError::foreign_key(format!(
                "industry '{}' does not exist",
                assignment.industry_code
            ))
            .into());
        }

        let key = (
            assignment.industry_code.clone(),
            assignment.company_code.clone(),
        );
        if !tables.assignments.insert(key) {
            return Err(StorageError::unique(format!(
                "company '{}' is already assigned to industry '{}'",
                assignment.company_code, assignment.industry_code
            ))
            .into());
        }
        Ok(assignment)
    }

    async fn delete_industry(&self, code: &str) -> ApiResult<bool> {
        let mut tables = self.write()?;
        if tables.industries.remove(code).is_none() {
            return Ok(false);
        }
        tables
            .assignments
            .retain(|(industry_code, _)| industry_code != code);
        Ok(true)
    }
}
