//! Invoice entity model and its payment state machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stored invoice row
///
/// `paid_date` is set when `paid` flips to true and cleared when it flips back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
}

/// What an update did to the `paid` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentTransition {
    /// `paid` kept its value; only `amt` changed
    Unchanged,
    MarkedPaid,
    MarkedUnpaid,
}

impl PaymentTransition {
    pub fn between(was_paid: bool, paid: bool) -> Self {
        match (was_paid, paid) {
            (false, true) => PaymentTransition::MarkedPaid,
            (true, false) => PaymentTransition::MarkedUnpaid,
            _ => PaymentTransition::Unchanged,
        }
    }
}

impl Invoice {
    /// Set the amount and payment flag, keeping `paid_date` coupled to `paid`
    pub fn apply_update(&mut self, amt: f64, paid: bool, now: DateTime<Utc>) -> PaymentTransition {
        let transition = PaymentTransition::between(self.paid, paid);
        self.amt = amt;
        match transition {
            PaymentTransition::MarkedPaid => {
                self.paid = true;
                self.paid_date = Some(now);
            }
            PaymentTransition::MarkedUnpaid => {
                self.paid = false;
                self.paid_date = None;
            }
            PaymentTransition::Unchanged => {}
        }
        transition
    }
}

/// Body of `POST /invoices`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewInvoice {
    #[validate(custom(function = "crate::core::validation::not_blank"))]
    pub comp_code: String,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub amt: f64,
}

/// Body of `PUT /invoices/{id}`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct InvoiceChanges {
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub amt: f64,
    pub paid: bool,
}
