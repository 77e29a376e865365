//! Store traits for companies, invoices and industries
//!
//! A store is the single source of truth of the API. Every backend enforces the
//! same rules as the relational schema:
//!
//! - company and industry codes are unique
//! - invoices and industry assignments reference existing rows
//! - a company that still owns invoices cannot be deleted
//! - assignments disappear together with either side
//!
//! Rule violations surface as `StorageError::ConstraintViolation`; missing rows
//! are reported through `Option`/`bool` so services decide on `NotFound`.

use crate::core::error::ApiResult;
use crate::entities::company::{Company, CompanyChanges};
use crate::entities::industry::{CompanyIndustry, Industry};
use crate::entities::invoice::{Invoice, NewInvoice};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Company table access
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// All companies ordered by code
    async fn list_companies(&self) -> ApiResult<Vec<Company>>;

    async fn get_company(&self, code: &str) -> ApiResult<Option<Company>>;

    /// Names of the industries assigned to a company, ordered by industry code
    async fn company_industry_names(&self, code: &str) -> ApiResult<Vec<String>>;

    /// Insert a company; fails with a unique violation if the code is taken
    async fn insert_company(&self, company: Company) -> ApiResult<Company>;

    /// Overwrite name and description; `None` if no such company
    async fn update_company(
        &self,
        code: &str,
        changes: &CompanyChanges,
    ) -> ApiResult<Option<Company>>;

    /// Delete a company; `false` if no such company
    ///
    /// Fails with a foreign key violation while invoices reference it.
    async fn delete_company(&self, code: &str) -> ApiResult<bool>;
}

/// Invoice table access
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// All invoices ordered by id
    async fn list_invoices(&self) -> ApiResult<Vec<Invoice>>;

    async fn get_invoice(&self, id: i32) -> ApiResult<Option<Invoice>>;

    /// Invoices of one company ordered by id
    async fn invoices_for_company(&self, comp_code: &str) -> ApiResult<Vec<Invoice>>;

    /// Insert an unpaid invoice stamped with the creation time
    async fn insert_invoice(&self, invoice: &NewInvoice) -> ApiResult<Invoice>;

    /// Apply [`Invoice::apply_update`] to the stored row
    ///
    /// The read of the current `paid` flag and the write happen atomically, so
    /// concurrent updates cannot both observe the same prior state. `None` if
    /// no such invoice.
    async fn update_invoice(
        &self,
        id: i32,
        amt: f64,
        paid: bool,
        now: DateTime<Utc>,
    ) -> ApiResult<Option<Invoice>>;

    /// Delete an invoice; `false` if no such invoice
    async fn delete_invoice(&self, id: i32) -> ApiResult<bool>;
}

/// Industry and assignment table access
#[async_trait]
pub trait IndustryStore: Send + Sync {
    /// All industries ordered by code
    async fn list_industries(&self) -> ApiResult<Vec<Industry>>;

    async fn get_industry(&self, code: &str) -> ApiResult<Option<Industry>>;

    /// Every company/industry assignment ordered by (industry_code, company_code)
    async fn list_assignments(&self) -> ApiResult<Vec<CompanyIndustry>>;

    /// Codes of the companies assigned to one industry, ordered by code
    async fn industry_company_codes(&self, industry_code: &str) -> ApiResult<Vec<String>>;

    async fn insert_industry(&self, industry: Industry) -> ApiResult<Industry>;

    /// Fails with a foreign key violation if either side is missing and with a
    /// unique violation if the pair already exists
    async fn insert_assignment(&self, assignment: CompanyIndustry) -> ApiResult<CompanyIndustry>;

    /// Delete an industry and its assignments; `false` if no such industry
    async fn delete_industry(&self, code: &str) -> ApiResult<bool>;
}

/// Full store handle injected into the services
pub trait Store: CompanyStore + InvoiceStore + IndustryStore {}

impl<T> Store for T where T: CompanyStore + InvoiceStore + IndustryStore {}
