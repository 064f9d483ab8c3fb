//! Core data models for the account listings

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{Side, TransactionStatus, TransactionType};

/// One vendor or customer row in a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterpartySummary {
    /// Opaque identifier, unique within one side
    pub id: String,
    /// Human-facing code (e.g., "VEND2025001")
    pub external_code: String,
    /// Display name
    pub name: String,
    /// Number of invoices on record
    pub invoice_count: u32,
    /// Total payable (debit) or receivable (credit)
    pub gross_amount: Decimal,
    /// Total paid (debit) or received (credit)
    pub settled_amount: Decimal,
    /// Amount still open, stored as supplied
    pub outstanding_balance: Decimal,
}

impl CounterpartySummary {
    /// Case-insensitive substring match on name or external code.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.name.to_lowercase().contains(needle_lower)
            || self.external_code.to_lowercase().contains(needle_lower)
    }

    /// Outstanding balance derived from the gross and settled amounts
    pub fn expected_outstanding(&self) -> Decimal {
        self.gross_amount - self.settled_amount
    }

    /// Whether the stored outstanding balance equals gross minus settled
    pub fn is_consistent(&self) -> bool {
        self.outstanding_balance == self.expected_outstanding()
    }

    pub fn is_settled(&self) -> bool {
        self.outstanding_balance.is_zero()
    }
}

/// Document line shown in the counterparty detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_type: TransactionType,
    #[serde(with = "display_date")]
    pub date: NaiveDate,
    pub document_number: String,
    pub paid_amount: Decimal,
    pub remaining_balance: Decimal,
    /// Payment reference, if the document has been settled against one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    pub status: TransactionStatus,
}

impl TransactionRecord {
    pub fn is_return(&self) -> bool {
        self.transaction_type.is_return()
    }

    /// Paid amount with returns counted negative
    pub fn signed_paid_amount(&self) -> Decimal {
        if self.is_return() {
            -self.paid_amount.abs()
        } else {
            self.paid_amount.abs()
        }
    }

    /// Returns are always shown as settled
    pub fn is_settled(&self) -> bool {
        self.status == TransactionStatus::Paid || self.is_return()
    }

    /// Date as shown in the detail table (dd/mm/yyyy)
    pub fn date_display(&self) -> String {
        self.date.format(display_date::FORMAT).to_string()
    }

    pub fn reference_display(&self) -> &str {
        self.reference_number.as_deref().unwrap_or("-")
    }
}

/// Counterparty plus the transaction set opened from its row
#[derive(Debug, Clone, Serialize)]
pub struct CounterpartyDetail {
    pub side: Side,
    pub counterparty: CounterpartySummary,
    pub transactions: Vec<TransactionRecord>,
}

/// Serde adapter for dd/mm/yyyy dates
pub mod display_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d/%m/%Y";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
