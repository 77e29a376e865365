//! Entity descriptor for Company

use super::handlers::{
    CompanyAppState, create_company, delete_company, get_company, list_companies, update_company,
};
use super::service::CompanyService;
use crate::core::store::Store;
use crate::server::entity_registry::EntityDescriptor;
use axum::{Router, routing::get};
use std::sync::Arc;

/// Descriptor for the Company entity
pub struct CompanyDescriptor {
    pub store: Arc<dyn Store>,
}

impl CompanyDescriptor {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl EntityDescriptor for CompanyDescriptor {
    fn entity_type(&self) -> &str {
        "company"
    }

    fn plural(&self) -> &str {
        "companies"
    }

    fn build_routes(&self) -> Router {
        let state = CompanyAppState {
            service: CompanyService::new(self.store.clone()),
        };

        let base = format!("/{}", self.plural());
        Router::new()
            .route(&base, get(list_companies).post(create_company))
            .route(
                &format!("{base}/{{code}}"),
                get(get_company).put(update_company).delete(delete_company),
            )
            .with_state(state)
    }
}
