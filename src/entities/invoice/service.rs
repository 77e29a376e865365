//! Invoice operations on top of the injected store

use super::model::{Invoice, InvoiceChanges, NewInvoice};
use crate::core::error::{ApiError, ApiResult};
use crate::core::store::Store;
use crate::core::validation::validate_request;
use chrono::Utc;
use std::sync::Arc;

#[derive(Clone)]
pub struct InvoiceService {
    store: Arc<dyn Store>,
}

impl InvoiceService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> ApiResult<Vec<Invoice>> {
        self.store.list_invoices().await
    }

    pub async fn get(&self, id: i32) -> ApiResult<Invoice> {
        self.store
            .get_invoice(id)
            .await?
            .ok_or_else(|| ApiError::not_found("invoice", id))
    }

    pub async fn create(&self, new: NewInvoice) -> ApiResult<Invoice> {
        validate_request(&new)?;

        let invoice = self.store.insert_invoice(&new).await?;
        tracing::info!(id = invoice.id, comp_code = %invoice.comp_code, "Created invoice");
        Ok(invoice)
    }

    /// Change the amount and payment state of an invoice
    ///
    /// Marking an unpaid invoice paid stamps `paid_date` with the current time;
    /// marking a paid invoice unpaid clears it.
    pub async fn update(&self, id: i32, changes: InvoiceChanges) -> ApiResult<Invoice> {
        validate_request(&changes)?;

        let invoice = self
            .store
            .update_invoice(id, changes.amt, changes.paid, Utc::now())
            .await?
            .ok_or_else(|| ApiError::not_found("invoice", id))?;

        tracing::info!(id, paid = invoice.paid, "Updated invoice");
        Ok(invoice)
    }

    pub async fn delete(&self, id: i32) -> ApiResult<()> {
        if !self.store.delete_invoice(id).await? {
            return Err(ApiError::not_found("invoice", id));
        }

        tracing::info!(id, "Deleted invoice");
        Ok(())
    }
}
