//! Basic types for the account listings

use serde::{Deserialize, Serialize};

/// Which side of the books a listing covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Vendors we owe (payables)
    Debit,
    /// Customers who owe us (receivables)
    Credit,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Debit, Side::Credit];

    /// Page heading
    pub fn title(&self) -> &'static str {
        match self {
            Side::Debit => "Debit Accounts",
            Side::Credit => "Credit Accounts",
        }
    }

    /// Singular label for one counterparty
    pub fn counterparty_label(&self) -> &'static str {
        match self {
            Side::Debit => "Vendor",
            Side::Credit => "Customer",
        }
    }

    pub fn counterparty_plural(&self) -> &'static str {
        match self {
            Side::Debit => "vendors",
            Side::Credit => "customers",
        }
    }

    pub fn gross_label(&self) -> &'static str {
        match self {
            Side::Debit => "Total Payable",
            Side::Credit => "Total Receivable",
        }
    }

    pub fn settled_label(&self) -> &'static str {
        match self {
            Side::Debit => "Total Paid",
            Side::Credit => "Total Received",
        }
    }

    pub fn outstanding_label(&self) -> &'static str {
        match self {
            Side::Debit => "Outstanding",
            Side::Credit => "Outstanding Receivable",
        }
    }

    /// Transaction types that belong to this side
    pub fn transaction_types(&self) -> [TransactionType; 2] {
        match self {
            Side::Debit => [TransactionType::PurchaseInvoice, TransactionType::PurchaseReturn],
            Side::Credit => [TransactionType::SalesInvoice, TransactionType::SalesReturn],
        }
    }
}

impl std::str::FromStr for Side {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debit" => Ok(Side::Debit),
            "credit" => Ok(Side::Credit),
            _ => Err(format!("Invalid side: {}", s)),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Debit => write!(f, "debit"),
            Side::Credit => write!(f, "credit"),
        }
    }
}

/// Document type shown in the transaction detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "Purchase Invoice")]
    PurchaseInvoice,
    #[serde(rename = "Purchase Return")]
    PurchaseReturn,
    #[serde(rename = "Sales Invoice")]
    SalesInvoice,
    #[serde(rename = "Sales Return")]
    SalesReturn,
}

impl TransactionType {
    pub fn is_return(&self) -> bool {
        matches!(self, TransactionType::PurchaseReturn | TransactionType::SalesReturn)
    }

    pub fn side(&self) -> Side {
        match self {
            TransactionType::PurchaseInvoice | TransactionType::PurchaseReturn => Side::Debit,
            TransactionType::SalesInvoice | TransactionType::SalesReturn => Side::Credit,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::PurchaseInvoice => write!(f, "Purchase Invoice"),
            TransactionType::PurchaseReturn => write!(f, "Purchase Return"),
            TransactionType::SalesInvoice => write!(f, "Sales Invoice"),
            TransactionType::SalesReturn => write!(f, "Sales Return"),
        }
    }
}

/// Settlement status of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Paid,
    Unpaid,
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Paid => write!(f, "Paid"),
            TransactionStatus::Unpaid => write!(f, "Unpaid"),
            TransactionStatus::PartiallyPaid => write!(f, "Partially Paid"),
        }
    }
}
