//! # BizTime
//!
//! A REST API over companies, the invoices they issue and the industries they
//! belong to.
//!
//! ## Features
//!
//! - **Three related resources**: companies, invoices and industries, with
//!   company/industry assignments
//! - **Slugified codes**: company codes are derived from their names
//! - **Payment tracking**: `paid_date` follows every change of `paid`
//! - **Pluggable storage**: in-memory store by default, PostgreSQL behind the
//!   `postgres` feature
//! - **Uniform errors**: every failure is rendered as `{code, message, details}`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use biztime::prelude::*;
//!
//! let store = InMemoryStore::new();
//! seed_sample_data(&store).await?;
//!
//! ServerBuilder::new()
//!     .with_store(store)
//!     .serve("127.0.0.1:3000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ApiError, ApiResult, ErrorKind, ErrorResponse},
        slug::slugify,
        store::{CompanyStore, IndustryStore, InvoiceStore, Store},
    };

    // === Entities ===
    pub use crate::entities::company::{Company, CompanyDetail, CompanyService};
    pub use crate::entities::industry::{
        CompanyIndustry, Industry, IndustryService, IndustryWithCompanies,
    };
    pub use crate::entities::invoice::{Invoice, InvoiceService, PaymentTransition};

    // === Storage ===
    pub use crate::storage::{InMemoryStore, seed_sample_data};

    #[cfg(feature = "postgres")]
    pub use crate::storage::{PostgresStore, ensure_schema};

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder};

    // === Configuration ===
    pub use crate::config::AppConfig;
}
