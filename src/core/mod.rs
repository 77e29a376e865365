//! Core module containing the error taxonomy, store traits and shared helpers

pub mod error;
pub mod slug;
pub mod store;
pub mod validation;

pub use error::{ApiError, ApiResult, ErrorKind};
pub use slug::slugify;
pub use store::{CompanyStore, IndustryStore, InvoiceStore, Store};
pub use validation::{JsonBody, validate_request};
