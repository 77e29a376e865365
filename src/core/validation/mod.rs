//! Request validation
//!
//! Request bodies are decoded into explicit per-operation schemas by the
//! [`JsonBody`] extractor and checked with `validator` rules by the resource
//! services before any store call.

pub mod extractor;

pub use extractor::{JsonBody, parse_invoice_id};

use crate::core::error::ApiResult;
use validator::Validate;

/// Run the `validator` rules of a request schema
pub fn validate_request<T: Validate>(request: &T) -> ApiResult<()> {
    request.validate()?;
    Ok(())
}

/// Validator: string must contain something other than whitespace
pub fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}
