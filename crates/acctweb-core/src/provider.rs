//! Data providers for the book
//!
//! The listing transform never reads data itself; a provider hands over the
//! collections for both sides as one [`BookData`] snapshot when the book is
//! (re)loaded.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::models::{CounterpartySummary, TransactionRecord};
use crate::sample;
use crate::types::Side;

/// Provider reference type
pub type ProviderRef = Arc<dyn DataProvider>;

/// Collections of one side
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SideData {
    #[serde(default)]
    pub counterparties: Vec<CounterpartySummary>,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

/// Both sides taken from the same version of the source
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookData {
    #[serde(default)]
    pub debit: SideData,
    #[serde(default)]
    pub credit: SideData,
}

impl BookData {
    pub fn side(&self, side: Side) -> &SideData {
        match side {
            Side::Debit => &self.debit,
            Side::Credit => &self.credit,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut SideData {
        match side {
            Side::Debit => &mut self.debit,
            Side::Credit => &mut self.credit,
        }
    }

    pub fn into_side(self, side: Side) -> SideData {
        match side {
            Side::Debit => self.debit,
            Side::Credit => self.credit,
        }
    }
}

/// Source of counterparties and their detail transactions
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Counterparty summaries for one side, in display order
    async fn counterparties(&self, side: Side) -> CoreResult<Vec<CounterpartySummary>>;

    /// Transaction set shown in the detail view of every counterparty on `side`
    async fn transactions(&self, side: Side) -> CoreResult<Vec<TransactionRecord>>;

    /// Both sides in one go. Providers backed by mutable storage override
    /// this so a load never mixes two versions of the source.
    async fn load_book(&self) -> CoreResult<BookData> {
        let mut book = BookData::default();
        for side in Side::ALL {
            let data = book.side_mut(side);
            data.counterparties = self.counterparties(side).await?;
            data.transactions = self.transactions(side).await?;
        }
        Ok(book)
    }

    /// Short description for logs
    fn describe(&self) -> String;
}

/// Built-in sample data
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleProvider;

#[async_trait]
impl DataProvider for SampleProvider {
    async fn counterparties(&self, side: Side) -> CoreResult<Vec<CounterpartySummary>> {
        Ok(match side {
            Side::Debit => sample::vendors(),
            Side::Credit => sample::customers(),
        })
    }

    async fn transactions(&self, side: Side) -> CoreResult<Vec<TransactionRecord>> {
        Ok(match side {
            Side::Debit => sample::purchase_transactions(),
            Side::Credit => sample::sales_transactions(),
        })
    }

    fn describe(&self) -> String {
        "built-in sample data".to_string()
    }
}

/// Reads counterparties and transactions from a YAML file
///
/// ```yaml
/// debit:
///   counterparties:
///     - id: "1"
///       external_code: VEND2025001
///       name: ABC Bullion Trading LLC
///       invoice_count: 12
///       gross_amount: "18450.75"
///       settled_amount: "15275.28"
///       outstanding_balance: "3175.47"
///   transactions:
///     - transaction_type: Purchase Invoice
///       date: 17/10/2025
///       document_number: PURV-20251017-059
///       paid_amount: "7350.00"
///       remaining_balance: "7350.00"
///       status: Unpaid
/// credit:
///   counterparties: []
/// ```
#[derive(Debug, Clone)]
pub struct YamlFileProvider {
    path: PathBuf,
}

impl YamlFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole file once
    async fn read_book(&self) -> CoreResult<BookData> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::FileNotFound {
                path: self.path.display().to_string(),
            },
            _ => CoreError::IoError,
        })?;

        if content.trim().is_empty() {
            return Ok(BookData::default());
        }

        Ok(serde_yaml::from_str(&content)?)
    }
}

#[async_trait]
impl DataProvider for YamlFileProvider {
    async fn counterparties(&self, side: Side) -> CoreResult<Vec<CounterpartySummary>> {
        Ok(self.read_book().await?.into_side(side).counterparties)
    }

    async fn transactions(&self, side: Side) -> CoreResult<Vec<TransactionRecord>> {
        Ok(self.read_book().await?.into_side(side).transactions)
    }

    async fn load_book(&self) -> CoreResult<BookData> {
        self.read_book().await
    }

    fn describe(&self) -> String {
        format!("data file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BOOK_YAML: &str = r#"
debit:
  counterparties:
    - id: "v1"
      external_code: VEND0001
      name: Harbour Metals
      invoice_count: 2
      gross_amount: "1200.50"
      settled_amount: "200.50"
      outstanding_balance: "1000.00"
  transactions:
    - transaction_type: Purchase Invoice
      date: 01/09/2025
      document_number: PURV-1
      paid_amount: "200.50"
      remaining_balance: "1000.00"
      status: Partially Paid
credit:
  counterparties:
    - id: "c1"
      external_code: CUST0001
      name: Marina Gold
      invoice_count: 1
      gross_amount: 500
      settled_amount: 0
      outstanding_balance: 500
"#;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("acctweb-{}-{}.yaml", name, std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_sample_provider() {
        let provider = SampleProvider;
        let vendors = provider.counterparties(Side::Debit).await.unwrap();
        assert_eq!(vendors.len(), 3);
        assert_eq!(vendors[1].external_code, "VEND2025002");
        let sales = provider.transactions(Side::Credit).await.unwrap();
        assert_eq!(sales.len(), 4);
    }

    #[tokio::test]
    async fn test_yaml_provider_reads_both_sides() {
        let path = write_temp("book", BOOK_YAML);
        let provider = YamlFileProvider::new(&path);

        let debit = provider.counterparties(Side::Debit).await.unwrap();
        assert_eq!(debit.len(), 1);
        assert_eq!(debit[0].name, "Harbour Metals");
        assert!(debit[0].is_consistent());

        let credit = provider.counterparties(Side::Credit).await.unwrap();
        assert_eq!(credit[0].outstanding_balance, rust_decimal::Decimal::new(500, 0));

        let debit_tx = provider.transactions(Side::Debit).await.unwrap();
        assert_eq!(debit_tx[0].reference_display(), "-");
        assert!(provider.transactions(Side::Credit).await.unwrap().is_empty());

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_yaml_load_book_is_one_snapshot() {
        let path = write_temp("snapshot", BOOK_YAML);
        let provider = YamlFileProvider::new(&path);

        let first = provider.load_book().await.unwrap();
        assert_eq!(first.debit.counterparties[0].name, "Harbour Metals");
        assert_eq!(first.debit.transactions.len(), 1);
        assert_eq!(first.side(Side::Credit).counterparties[0].name, "Marina Gold");

        std::fs::write(&path, "debit:\n  counterparties: []\n").unwrap();
        assert_eq!(first.debit.counterparties.len(), 1);

        let second = provider.load_book().await.unwrap();
        assert!(second.debit.counterparties.is_empty());
        assert!(second.debit.transactions.is_empty());
        assert!(second.credit.counterparties.is_empty());

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_default_load_book_collects_both_sides() {
        let book = SampleProvider.load_book().await.unwrap();
        assert_eq!(book.debit.counterparties.len(), 3);
        assert_eq!(book.debit.transactions.len(), 5);
        assert_eq!(book.credit.transactions.len(), 4);
    }

    #[tokio::test]
    async fn test_yaml_provider_missing_file() {
        let provider = YamlFileProvider::new("/nonexistent/acctweb-book.yaml");
        let err = provider.counterparties(Side::Debit).await.unwrap_err();
        assert!(matches!(err, CoreError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_yaml_provider_malformed_file() {
        let path = write_temp("broken", "debit:\n  counterparties:\n    - id: [\n");
        let provider = YamlFileProvider::new(&path);
        let err = provider.counterparties(Side::Debit).await.unwrap_err();
        assert!(matches!(err, CoreError::ParseError { .. }));
        std::fs::remove_file(path).ok();
    }
}
