//! Counterparty listings: data model, listing transform, view state and the book
//!
//! A [`Book`] holds the debit (vendor) and credit (customer) collections
//! loaded from a [`DataProvider`]. Listing a side applies a [`ViewState`]
//! through the pure functions in [`listing`].

pub mod error;
pub mod listing;
pub mod models;
pub mod provider;
pub mod sample;
pub mod types;
pub mod view;

use std::collections::HashSet;

pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use listing::{AccountSummary, Listing, DEFAULT_PAGE_WINDOW};
pub use models::{CounterpartyDetail, CounterpartySummary, TransactionRecord};
pub use provider::{BookData, DataProvider, ProviderRef, SampleProvider, SideData, YamlFileProvider};
pub use types::{Side, TransactionStatus, TransactionType};
pub use view::{PageSize, PageSizes, ViewState};

/// Loaded data for one side of the book
#[derive(Debug, Clone)]
pub struct SideBook {
    side: Side,
    counterparties: Vec<CounterpartySummary>,
    transactions: Vec<TransactionRecord>,
}

impl SideBook {
    fn empty(side: Side) -> Self {
        Self {
            side,
            counterparties: Vec::new(),
            transactions: Vec::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// All counterparties in original order
    pub fn counterparties(&self) -> &[CounterpartySummary] {
        &self.counterparties
    }

    /// Static detail transaction set for this side
    pub fn transactions(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    pub fn counterparty(&self, id: &str) -> CoreResult<&CounterpartySummary> {
        self.counterparties
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::CounterpartyNotFound {
                side: self.side,
                id: id.to_string(),
            })
    }

    /// Detail view for a counterparty row.
    ///
    /// Every counterparty on a side opens the same transaction set.
    pub fn detail(&self, id: &str) -> CoreResult<CounterpartyDetail> {
        let counterparty = self.counterparty(id)?.clone();
        Ok(CounterpartyDetail {
            side: self.side,
            counterparty,
            transactions: self.transactions.clone(),
        })
    }

    pub fn listing(&self, view: &ViewState, window: usize) -> Listing {
        listing::listing(&self.counterparties, view, window)
    }

    /// Totals over every counterparty, independent of any search or page
    pub fn summary(&self) -> AccountSummary {
        listing::aggregate(&self.counterparties)
    }
}

/// Both sides of the book plus the provider they came from
pub struct Book {
    provider: ProviderRef,
    debit: SideBook,
    credit: SideBook,
    loaded: bool,
}

impl Book {
    /// Create an empty book; call [`Book::load`] to fill it
    pub fn new(provider: ProviderRef) -> Self {
        Self {
            provider,
            debit: SideBook::empty(Side::Debit),
            credit: SideBook::empty(Side::Credit),
            loaded: false,
        }
    }

    /// Load both sides from one provider snapshot.
    ///
    /// Nothing is replaced unless the snapshot loads successfully.
    pub async fn load(&mut self) -> CoreResult<()> {
        let data = self.provider.load_book().await?;
        let debit = Self::build_side(Side::Debit, data.debit);
        let credit = Self::build_side(Side::Credit, data.credit);

        log::info!(
            "Loaded {} vendors and {} customers from {}",
            debit.counterparties.len(),
            credit.counterparties.len(),
            self.provider.describe()
        );

        self.debit = debit;
        self.credit = credit;
        self.loaded = true;
        Ok(())
    }

    /// Re-read both sides; on failure the previous data stays in place
    pub async fn reload(&mut self) -> CoreResult<()> {
        log::info!("Reloading book from {}", self.provider.describe());
        if let Err(e) = self.load().await {
            log::error!("Reload failed, keeping previous data: {}", e);
            return Err(e);
        }
        Ok(())
    }

    fn build_side(side: Side, data: SideData) -> SideBook {
        let SideData { counterparties, transactions } = data;

        let mut seen = HashSet::new();
        for c in &counterparties {
            if !seen.insert(c.id.as_str()) {
                log::warn!("Duplicate {} counterparty id '{}'", side, c.id);
            }
            if !c.is_consistent() {
                log::warn!(
                    "{} {}: outstanding balance {} does not equal gross {} minus settled {}",
                    side.counterparty_label(),
                    c.external_code,
                    c.outstanding_balance,
                    c.gross_amount,
                    c.settled_amount
                );
            }
        }
        for tx in &transactions {
            if tx.transaction_type.side() != side {
                log::warn!("{} transaction {} listed under {}", tx.transaction_type, tx.document_number, side);
            }
        }

        SideBook {
            side,
            counterparties,
            transactions,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// One side of the book; `NotLoaded` until the first successful load
    pub fn side(&self, side: Side) -> CoreResult<&SideBook> {
        if !self.loaded {
            return Err(CoreError::NotLoaded);
        }
        Ok(match side {
            Side::Debit => &self.debit,
            Side::Credit => &self.credit,
        })
    }

    pub fn source(&self) -> String {
        self.provider.describe()
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn sample_book() -> Book {
        let mut book = Book::new(Arc::new(SampleProvider));
        book.load().await.unwrap();
        book
    }

    /// Serves sample data until switched to failing
    struct FlakyProvider {
        fail: AtomicBool,
    }

    #[async_trait]
    impl DataProvider for FlakyProvider {
        async fn counterparties(&self, side: Side) -> CoreResult<Vec<CounterpartySummary>> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(CoreError::IoError);
            }
            SampleProvider.counterparties(side).await
        }

        async fn transactions(&self, side: Side) -> CoreResult<Vec<TransactionRecord>> {
            SampleProvider.transactions(side).await
        }

        fn describe(&self) -> String {
            "flaky".to_string()
        }
    }

    /// Only answers whole-book snapshots and counts them
    struct SnapshotProvider {
        loads: AtomicUsize,
    }

    #[async_trait]
    impl DataProvider for SnapshotProvider {
        async fn counterparties(&self, _side: Side) -> CoreResult<Vec<CounterpartySummary>> {
            Err(CoreError::IoError)
        }

        async fn transactions(&self, _side: Side) -> CoreResult<Vec<TransactionRecord>> {
            Err(CoreError::IoError)
        }

        async fn load_book(&self) -> CoreResult<BookData> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            SampleProvider.load_book().await
        }

        fn describe(&self) -> String {
            "snapshot".to_string()
        }
    }

    #[tokio::test]
    async fn test_new_book_is_not_loaded() {
        let book = Book::new(Arc::new(SampleProvider));
        assert!(!book.is_loaded());
        assert!(matches!(book.side(Side::Debit), Err(CoreError::NotLoaded)));
        assert!(matches!(book.side(Side::Credit), Err(CoreError::NotLoaded)));
    }

    #[tokio::test]
    async fn test_load_sample_book() {
        let book = sample_book().await;
        assert!(book.is_loaded());
        assert_eq!(book.source(), "built-in sample data");

        let debit = book.side(Side::Debit).unwrap();
        assert_eq!(debit.summary().gross_total, Decimal::new(7400465, 2));
        assert_eq!(debit.transactions().len(), 5);

        let credit = book.side(Side::Credit).unwrap();
        assert_eq!(credit.summary().count, 3);
        assert_eq!(credit.summary().outstanding_total, Decimal::new(3454025, 2));
    }

    #[tokio::test]
    async fn test_load_takes_a_single_snapshot() {
        let provider = Arc::new(SnapshotProvider { loads: AtomicUsize::new(0) });
        let mut book = Book::new(provider.clone());
        book.load().await.unwrap();
        assert_eq!(provider.loads.load(Ordering::SeqCst), 1);
        assert_eq!(book.side(Side::Credit).unwrap().counterparties().len(), 3);

        book.reload().await.unwrap();
        assert_eq!(provider.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_listing_by_code() {
        let book = sample_book().await;
        let view = ViewState::new(PageSizes::default().default_size()).with_search("VEND2025002");
        let listing = book.side(Side::Debit).unwrap().listing(&view, DEFAULT_PAGE_WINDOW);
        assert_eq!(listing.rows.len(), 1);
        assert_eq!(listing.rows[0].id, "2");
        assert_eq!(listing.summary.gross_total, Decimal::new(7400465, 2));
    }

    #[tokio::test]
    async fn test_detail_is_same_for_every_counterparty() {
        let book = sample_book().await;
        let credit = book.side(Side::Credit).unwrap();
        let first = credit.detail("1").unwrap();
        let third = credit.detail("3").unwrap();
        assert_eq!(first.counterparty.name, "Diamond Jewellers LLC");
        assert_eq!(first.transactions, third.transactions);
        assert_eq!(first.side, Side::Credit);
    }

    #[tokio::test]
    async fn test_unknown_counterparty() {
        let book = sample_book().await;
        let err = book.side(Side::Debit).unwrap().detail("missing").unwrap_err();
        assert!(matches!(err, CoreError::CounterpartyNotFound { side: Side::Debit, .. }));
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_data() {
        let provider = Arc::new(FlakyProvider { fail: AtomicBool::new(false) });
        let mut book = Book::new(provider.clone());
        book.load().await.unwrap();

        provider.fail.store(true, Ordering::SeqCst);
        assert!(book.reload().await.is_err());
        assert_eq!(book.side(Side::Debit).unwrap().counterparties().len(), 3);
        assert!(book.is_loaded());
    }
}
