//! Account routes - Vendor (debit) and customer (credit) listings
//!
//! Features:
//! - Summary cards over the whole side
//! - Case-insensitive search on name and external code
//! - Page size selector and a sliding page window
//! - Transaction modal per counterparty
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page and fragment rendering

pub mod api;
pub mod page;

pub use api::{
    api_counterparty_detail,
    api_listing,
    api_summary,
    htmx_accounts_list,
    htmx_counterparty_detail,
    ListingResponse,
};
pub use page::{
    page_accounts,
    render_detail_modal,
    render_listing,
    render_summary_cards,
};
