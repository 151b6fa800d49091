//! Invoice and customer records as the dashboard sees them

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Path of the invoice listing; every mutating action revalidates it and
/// redirects to it.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Payment state of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// Every accepted status, in the order forms present them
    pub const ALL: [InvoiceStatus; 2] = [InvoiceStatus::Pending, InvoiceStatus::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(format!("unknown invoice status '{}'", other)),
        }
    }
}

/// A stored invoice row
///
/// `amount` is kept in cents; `date` is assigned once at creation and never
/// rewritten by updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Customer as consumed by the dashboard (owned elsewhere, read-only here)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Values needed to insert a new invoice
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Values written by the update action; `date` is deliberately absent
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceUpdate {
    pub id: String,
    pub customer_id: String,
    pub amount_in_cents: i64,
    pub status: InvoiceStatus,
}

/// Read model that pre-fills the edit form. `amount` is in dollars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceForm {
    pub id: String,
    pub customer_id: String,
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl From<&Invoice> for InvoiceForm {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id.clone(),
            customer_id: invoice.customer_id.clone(),
            amount: cents_to_dollars(invoice.amount),
            status: invoice.status,
        }
    }
}

/// One line of the invoice listing, joined with its customer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceRow {
    pub id: String,
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Largest dollar amount accepted by the forms
///
/// Its cents value is an exact integer in both `f64` and `i64`, so
/// [`dollars_to_cents`] never saturates on validated input.
pub const MAX_AMOUNT: f64 = 90_071_992_547_409.0;

/// Convert a validated dollar amount into whole cents.
///
/// Input must already be checked against [`MAX_AMOUNT`]. Rounds to the
/// nearest cent so that inputs like `"49.99"` (which are not
/// exactly representable as `f64`) land on `4999` and not `4998`.
pub fn dollars_to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

pub fn cents_to_dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Today's calendar date (UTC)
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dollars_to_cents_rounds_binary_fractions() {
        assert_eq!(dollars_to_cents(49.99), 4999);
        assert_eq!(dollars_to_cents(0.29), 29);
        assert_eq!(dollars_to_cents(19.99), 1999);
        assert_eq!(dollars_to_cents(120.0), 12000);
    }

    #[test]
    fn test_dollars_to_cents_is_exact_at_max_amount() {
        assert_eq!(dollars_to_cents(MAX_AMOUNT), 9_007_199_254_740_900);
        assert!(dollars_to_cents(MAX_AMOUNT) < i64::MAX);
    }

    #[test]
    fn test_cents_to_dollars() {
        assert_eq!(cents_to_dollars(4999), 49.99);
        assert_eq!(cents_to_dollars(100), 1.0);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("paid".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Paid));
        assert_eq!(
            "pending".parse::<InvoiceStatus>(),
            Ok(InvoiceStatus::Pending)
        );
        assert!("Paid".parse::<InvoiceStatus>().is_err());
        assert!("overdue".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&InvoiceStatus::Paid).unwrap();
        assert_eq!(json, "\"paid\"");
    }

    #[test]
    fn test_invoice_form_from_invoice_converts_cents() {
        let invoice = Invoice {
            id: "inv-1".to_string(),
            customer_id: "cus-1".to_string(),
            amount: 15795,
            status: InvoiceStatus::Pending,
            date: NaiveDate::from_ymd_opt(2022, 12, 6).unwrap(),
        };
        let form = InvoiceForm::from(&invoice);
        assert_eq!(form.amount, 157.95);
        assert_eq!(form.customer_id, "cus-1");
    }
}
