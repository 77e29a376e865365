//! Industry entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod service;

pub use descriptor::IndustryDescriptor;
pub use model::{AssignCompany, CompanyIndustry, Industry, IndustryWithCompanies, NewIndustry};
pub use service::IndustryService;
