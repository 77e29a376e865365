//! Invoice entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod service;

pub use descriptor::InvoiceDescriptor;
pub use model::{Invoice, InvoiceChanges, NewInvoice, PaymentTransition};
pub use service::InvoiceService;
