//! Shared test harness for store backend testing
//!
//! Provides row builders and assertion helpers used by the
//! `store_contract_tests!` suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
mod store_contract_tests;

use biztime::core::error::{ApiError, Constraint, ErrorKind, StorageError};
use biztime::entities::company::{Company, CompanyChanges};
use biztime::entities::industry::{CompanyIndustry, Industry};
use biztime::entities::invoice::NewInvoice;

// ---------------------------------------------------------------------------
// Row builders
// ---------------------------------------------------------------------------

pub fn company(code: &str, name: &str) -> Company {
    Company {
        code: code.to_string(),
        name: name.to_string(),
        description: format!("About {}", name),
    }
}

pub fn company_changes(name: &str, description: &str) -> CompanyChanges {
    CompanyChanges {
        name: name.to_string(),
        description: description.to_string(),
    }
}

pub fn new_invoice(comp_code: &str, amt: f64) -> NewInvoice {
    NewInvoice {
        comp_code: comp_code.to_string(),
        amt,
    }
}

pub fn industry(code: &str, name: &str) -> Industry {
    Industry {
        code: code.to_string(),
        industry: name.to_string(),
    }
}

pub fn assignment(company_code: &str, industry_code: &str) -> CompanyIndustry {
    CompanyIndustry {
        company_code: company_code.to_string(),
        industry_code: industry_code.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Assertions
// ---------------------------------------------------------------------------

/// Assert that `err` is a constraint violation of the given kind
pub fn assert_constraint(err: ApiError, expected: Constraint) {
    assert_eq!(err.kind(), ErrorKind::ConstraintViolation, "got {:?}", err);
    match err {
        ApiError::Storage(StorageError::ConstraintViolation { constraint, .. }) => {
            assert_eq!(constraint, expected)
        }
        other => panic!("Expected ConstraintViolation({:?}), got {:?}", expected, other),
    }
}

pub fn assert_amount(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < f64::EPSILON,
        "Expected amount {}, got {}",
        expected,
        actual
    );
}
