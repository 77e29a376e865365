//! PostgreSQL storage backend using sqlx.
//!
//! Provides [`PostgresStore`], an implementation of every store trait backed by
//! a `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! biztime = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Schema
//!
//! [`ensure_schema`] creates the four tables if they are missing. Uniqueness,
//! referential integrity and the non-negative amount rule are enforced by the
//! database; their violations are mapped to `StorageError::ConstraintViolation`.

use crate::core::error::{ApiResult, Constraint, StorageError};
use crate::core::store::{CompanyStore, IndustryStore, InvoiceStore};
use crate::entities::company::{Company, CompanyChanges};
use crate::entities::industry::{CompanyIndustry, Industry};
use crate::entities::invoice::{Invoice, NewInvoice, PaymentTransition};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

const BACKEND: &str = "PostgreSQL";

// ---------------------------------------------------------------------------
// Schema management
// ---------------------------------------------------------------------------

/// Apply the required tables (idempotent).
///
/// Safe to call on every startup. This is not a migration tool: existing
/// tables are left untouched.
pub async fn ensure_schema(pool: &PgPool) -> ApiResult<()> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS companies (
            code TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        )",
        "CREATE TABLE IF NOT EXISTS invoices (
            id SERIAL PRIMARY KEY,
            comp_code TEXT NOT NULL REFERENCES companies (code),
            amt DOUBLE PRECISION NOT NULL CHECK (amt >= 0),
            paid BOOLEAN NOT NULL DEFAULT false,
            add_date TIMESTAMPTZ NOT NULL DEFAULT now(),
            paid_date TIMESTAMPTZ
        )",
        "CREATE TABLE IF NOT EXISTS industries (
            code TEXT PRIMARY KEY,
            industry TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS company_industries (
            company_code TEXT NOT NULL REFERENCES companies (code) ON DELETE CASCADE,
            industry_code TEXT NOT NULL REFERENCES industries (code) ON DELETE CASCADE,
            PRIMARY KEY (company_code, industry_code)
        )",
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| query_error("Failed to create schema", e))?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

fn query_error(context: &str, err: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db_err) = &err {
        let constraint = if db_err.is_unique_violation() {
            Some(Constraint::Unique)
        } else if db_err.is_foreign_key_violation() {
            Some(Constraint::ForeignKey)
        } else if db_err.is_check_violation() {
            Some(Constraint::Check)
        } else {
            None
        };

        if let Some(constraint) = constraint {
            return StorageError::ConstraintViolation {
                constraint,
                message: db_err.message().to_string(),
            };
        }
    }

    StorageError::QueryError {
        backend: BACKEND.to_string(),
        message: format!("{}: {}", context, err),
    }
}

// ---------------------------------------------------------------------------
// PostgresStore
// ---------------------------------------------------------------------------

/// Store backed by PostgreSQL.
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new `PostgresStore` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool on `url`.
    pub async fn connect(url: &str, max_connections: u32) -> ApiResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CompanyStore for PostgresStore {
    async fn list_companies(&self) -> ApiResult<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>(
            "SELECT code, name, description FROM companies ORDER BY code",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_error("Failed to list companies", e))?;

        Ok(companies)
    }

    async fn get_company(&self, code: &str) -> ApiResult<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            "SELECT code, name, description FROM companies WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to get company", e))?;

        Ok(company)
    }

    async fn company_industry_names(&self, code: &str) -> ApiResult<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT i.industry \
             FROM company_industries ci \
             JOIN industries i ON i.code = ci.industry_code \
             WHERE ci.company_code = $1 \
             ORDER BY i.code",
        )
        .bind(code)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_error("Failed to list company industries", e))?;

        Ok(names)
    }

    async fn insert_company(&self, company: Company) -> ApiResult<Company> {
        let company = sqlx::query_as::<_, Company>(
            "INSERT INTO companies (code, name, description) VALUES ($1, $2, $3) \
             RETURNING code, name, description",
        )
        .bind(&company.code)
        .bind(&company.name)
        .bind(&company.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_error("Failed to create company", e))?;

        Ok(company)
    }

    async fn update_company(
        &self,
        code: &str,
        changes: &CompanyChanges,
    ) -> ApiResult<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            "UPDATE companies SET name = $1, description = $2 WHERE code = $3 \
             RETURNING code, name, description",
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to update company", e))?;

        Ok(company)
    }

    async fn delete_company(&self, code: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM companies WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to delete company", e))?;

        Ok(result.rows_affected() > 0)
    }
}

const INVOICE_COLUMNS: &str = "id, comp_code, amt, paid, add_date, paid_date";

#[async_trait]
impl InvoiceStore for PostgresStore {
    async fn list_invoices(&self) -> ApiResult<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_error("Failed to list invoices", e))?;

        Ok(invoices)
    }

    async fn get_invoice(&self, id: i32) -> ApiResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to get invoice", e))?;

        Ok(invoice)
    }

    async fn invoices_for_company(&self, comp_code: &str) -> ApiResult<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE comp_code = $1 ORDER BY id"
        ))
        .bind(comp_code)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_error("Failed to list company invoices", e))?;

        Ok(invoices)
    }

    async fn insert_invoice(&self, invoice: &NewInvoice) -> ApiResult<Invoice> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "INSERT INTO invoices (comp_code, amt) VALUES ($1, $2) RETURNING {INVOICE_COLUMNS}"
        ))
        .bind(&invoice.comp_code)
        .bind(invoice.amt)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_error("Failed to create invoice", e))?;

        Ok(invoice)
    }

    async fn update_invoice(
        &self,
        id: i32,
        amt: f64,
        paid: bool,
        now: DateTime<Utc>,
    ) -> ApiResult<Option<Invoice>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_error("Failed to begin transaction", e))?;

        let was_paid =
            sqlx::query_scalar::<_, bool>("SELECT paid FROM invoices WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| query_error("Failed to lock invoice", e))?;

        let Some(was_paid) = was_paid else {
            // Dropping the transaction rolls it back
            return Ok(None);
        };

        // $1 = amt, $2 = id, $3 = paid_date (only bound when marking paid)
        let transition = PaymentTransition::between(was_paid, paid);
        let sql = match transition {
            PaymentTransition::Unchanged => format!(
                "UPDATE invoices SET amt = $1 WHERE id = $2 RETURNING {INVOICE_COLUMNS}"
            ),
            PaymentTransition::MarkedPaid => format!(
                "UPDATE invoices SET amt = $1, paid = true, paid_date = $3 \
                 WHERE id = $2 RETURNING {INVOICE_COLUMNS}"
            ),
            PaymentTransition::MarkedUnpaid => format!(
                "UPDATE invoices SET amt = $1, paid = false, paid_date = NULL \
                 WHERE id = $2 RETURNING {INVOICE_COLUMNS}"
            ),
        };

        let mut query = sqlx::query_as::<_, Invoice>(&sql).bind(amt).bind(id);
        if transition == PaymentTransition::MarkedPaid {
            query = query.bind(now);
        }

        let invoice = query
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| query_error("Failed to update invoice", e))?;

        tx.commit()
            .await
            .map_err(|e| query_error("Failed to commit invoice update", e))?;

        Ok(Some(invoice))
    }

    async fn delete_invoice(&self, id: i32) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to delete invoice", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl IndustryStore for PostgresStore {
    async fn list_industries(&self) -> ApiResult<Vec<Industry>> {
        let industries =
            sqlx::query_as::<_, Industry>("SELECT code, industry FROM industries ORDER BY code")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| query_error("Failed to list industries", e))?;

        Ok(industries)
    }

    async fn get_industry(&self, code: &str) -> ApiResult<Option<Industry>> {
        let industry =
            sqlx::query_as::<_, Industry>("SELECT code, industry FROM industries WHERE code = $1")
                .bind(code)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| query_error("Failed to get industry", e))?;

        Ok(industry)
    }

    async fn list_assignments(&self) -> ApiResult<Vec<CompanyIndustry>> {
        let assignments = sqlx::query_as::<_, CompanyIndustry>(
            "SELECT company_code, industry_code FROM company_industries \
             ORDER BY industry_code, company_code",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_error("Failed to list assignments", e))?;

        Ok(assignments)
    }

    async fn industry_company_codes(&self, industry_code: &str) -> ApiResult<Vec<String>> {
        let codes = sqlx::query_scalar::<_, String>(
            "SELECT company_code FROM company_industries \
             WHERE industry_code = $1 ORDER BY company_code",
        )
        .bind(industry_code)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_error("Failed to list industry companies", e))?;

        Ok(codes)
    }

    async fn insert_industry(&self, industry: Industry) -> ApiResult<Industry> {
        let industry = sqlx::query_as::<_, Industry>(
            "INSERT INTO industries (code, industry) VALUES ($1, $2) RETURNING code, industry",
        )
        .bind(&industry.code)
        .bind(&industry.industry)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_error("Failed to create industry", e))?;

        Ok(industry)
    }

    async fn insert_assignment(&self, assignment: CompanyIndustry) -> ApiResult<CompanyIndustry> {
        let assignment = sqlx::query_as::<_, CompanyIndustry>(
            "INSERT INTO company_industries (company_code, industry_code) VALUES ($1, $2) \
             RETURNING company_code, industry_code",
        )
        .bind(&assignment.company_code)
        .bind(&assignment.industry_code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_error("Failed to assign company", e))?;

        Ok(assignment)
    }

    async fn delete_industry(&self, code: &str) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM industries WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to delete industry", e))?;

        Ok(result.rows_affected() > 0)
    }
}
