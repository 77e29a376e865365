//! Entity descriptor for Industry

use super::handlers::{
    IndustryAppState, assign_company, create_industry, delete_industry, get_industry,
    list_industries,
};
use super::service::IndustryService;
use crate::core::store::Store;
use crate::server::entity_registry::EntityDescriptor;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Descriptor for the Industry entity
///
/// Also owns the assignment route, since assignments are created through an
/// industry.
pub struct IndustryDescriptor {
    pub store: Arc<dyn Store>,
}

impl IndustryDescriptor {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl EntityDescriptor for IndustryDescriptor {
    fn entity_type(&self) -> &str {
        "industry"
    }

    fn plural(&self) -> &str {
        "industries"
    }

    fn build_routes(&self) -> Router {
        let state = IndustryAppState {
            service: IndustryService::new(self.store.clone()),
        };

        let base = format!("/{}", self.plural());
        Router::new()
            .route(&base, get(list_industries).post(create_industry))
            .route(
                &format!("{base}/{{code}}"),
                get(get_industry).delete(delete_industry),
            )
            .route(
                &format!("{base}/assign-company/{{industry_code}}"),
                post(assign_company),
            )
            .with_state(state)
    }
}
