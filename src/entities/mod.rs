//! The three resources exposed by the API
//!
//! Each entity lives in its own module with the same layout:
//! `model` (rows and request schemas), `service` (operations against the
//! store), `handlers` (axum handlers) and `descriptor` (route registration).

pub mod company;
pub mod industry;
pub mod invoice;

pub use company::{Company, CompanyDescriptor, CompanyDetail};
pub use industry::{CompanyIndustry, Industry, IndustryDescriptor, IndustryWithCompanies};
pub use invoice::{Invoice, InvoiceDescriptor};
