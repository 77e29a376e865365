//! Company entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod service;

pub use descriptor::CompanyDescriptor;
pub use model::{Company, CompanyChanges, CompanyDetail, NewCompany};
pub use service::CompanyService;
