//! Entity descriptor for Invoice

use super::handlers::{
    InvoiceAppState, create_invoice, delete_invoice, get_invoice, list_invoices, update_invoice,
};
use super::service::InvoiceService;
use crate::core::store::Store;
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::get};
use std::sync::Arc;

/// Descriptor for the Invoice entity
pub struct InvoiceDescriptor {
    pub store: Arc<dyn Store>,
}

impl InvoiceDescriptor {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl EntityDescriptor for InvoiceDescriptor {
    fn entity_type(&self) -> &str {
        "invoice"
    }

    fn plural(&self) -> &str {
        "invoices"
    }

    fn build_routes(&self) -> Router {
        let state = InvoiceAppState {
            service: InvoiceService::new(self.store.clone()),
        };

        let base = format!("/{}", self.plural());
        Router::new()
            .route(&base, get(list_invoices).post(create_invoice))
            .route(
                &format!("{base}/{{id}}"),
                get(get_invoice).put(update_invoice).delete(delete_invoice),
            )
            .with_state(state)
    }
}
