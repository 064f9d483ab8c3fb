//! Built-in sample book used when no data file is configured

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{CounterpartySummary, TransactionRecord};
use crate::types::{TransactionStatus, TransactionType};

fn counterparty(
    id: &str,
    code: &str,
    name: &str,
    invoices: u32,
    gross: Decimal,
    settled: Decimal,
    outstanding: Decimal,
) -> CounterpartySummary {
    CounterpartySummary {
        id: id.to_string(),
        external_code: code.to_string(),
        name: name.to_string(),
        invoice_count: invoices,
        gross_amount: gross,
        settled_amount: settled,
        outstanding_balance: outstanding,
    }
}

fn transaction(
    transaction_type: TransactionType,
    (year, month, day): (i32, u32, u32),
    document_number: &str,
    paid: Decimal,
    remaining: Decimal,
    reference: Option<&str>,
    status: TransactionStatus,
) -> TransactionRecord {
    TransactionRecord {
        transaction_type,
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN),
        document_number: document_number.to_string(),
        paid_amount: paid,
        remaining_balance: remaining,
        reference_number: reference.map(str::to_string),
        status,
    }
}

/// Debit side: vendors
pub fn vendors() -> Vec<CounterpartySummary> {
    vec![
        counterparty(
            "1", "VEND2025001", "ABC Bullion Trading LLC", 12,
            Decimal::new(1845075, 2), Decimal::new(1527528, 2), Decimal::new(317547, 2),
        ),
        counterparty(
            "2", "VEND2025002", "Global Suppliers Ltd", 8,
            Decimal::new(987500, 2), Decimal::new(987500, 2), Decimal::ZERO,
        ),
        counterparty(
            "3", "VEND2025003", "Premier Electronics", 15,
            Decimal::new(4567890, 2), Decimal::new(3210000, 2), Decimal::new(1357890, 2),
        ),
    ]
}

/// Credit side: customers
pub fn customers() -> Vec<CounterpartySummary> {
    vec![
        counterparty(
            "1", "CUST2025001", "Diamond Jewellers LLC", 18,
            Decimal::new(2845000, 2), Decimal::new(1980050, 2), Decimal::new(864950, 2),
        ),
        counterparty(
            "2", "CUST2025002", "Elite Retail Chain", 9,
            Decimal::new(1567800, 2), Decimal::new(1567800, 2), Decimal::ZERO,
        ),
        counterparty(
            "3", "CUST2025003", "Luxury Watches Dubai", 22,
            Decimal::new(6789075, 2), Decimal::new(4200000, 2), Decimal::new(2589075, 2),
        ),
    ]
}

/// Detail set shown for every vendor
pub fn purchase_transactions() -> Vec<TransactionRecord> {
    use TransactionStatus::*;
    use TransactionType::*;
    vec![
        transaction(PurchaseInvoice, (2025, 10, 17), "PURV-20251017-059",
            Decimal::new(735000, 2), Decimal::new(735000, 2), None, Unpaid),
        transaction(PurchaseInvoice, (2025, 10, 17), "PURV-20251017-510",
            Decimal::new(400000, 2), Decimal::new(400000, 2), None, Unpaid),
        transaction(PurchaseReturn, (2025, 10, 15), "PRTN-20251015-214",
            Decimal::new(61997, 2), Decimal::ZERO, Some("PYMT-001"), Paid),
        transaction(PurchaseInvoice, (2025, 10, 10), "PURV-20251010-971",
            Decimal::new(500000, 2), Decimal::ZERO, Some("PYMT-003"), Paid),
        transaction(PurchaseReturn, (2025, 10, 8), "PRTN-20251008-105",
            Decimal::new(120000, 2), Decimal::ZERO, Some("PYMT-002"), Paid),
    ]
}

/// Detail set shown for every customer
pub fn sales_transactions() -> Vec<TransactionRecord> {
    use TransactionStatus::*;
    use TransactionType::*;
    vec![
        transaction(SalesInvoice, (2025, 11, 28), "SINV-20251128-001",
            Decimal::new(850000, 2), Decimal::new(850000, 2), None, Unpaid),
        transaction(SalesInvoice, (2025, 11, 25), "SINV-20251125-115",
            Decimal::new(420000, 2), Decimal::ZERO, Some("RCVD-001"), Paid),
        transaction(SalesReturn, (2025, 11, 22), "SRTN-20251122-003",
            Decimal::new(125000, 2), Decimal::ZERO, Some("RCVD-002"), Paid),
        transaction(SalesInvoice, (2025, 11, 18), "SINV-20251118-087",
            Decimal::new(980000, 2), Decimal::new(314950, 2), None, PartiallyPaid),
    ]
}
