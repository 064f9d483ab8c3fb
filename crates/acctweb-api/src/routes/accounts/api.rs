//! Account listing endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_listing: One page of counterparties with totals (JSON)
//! - api_summary: Totals over the whole side (JSON)
//! - api_counterparty_detail: Counterparty with its transactions (JSON)
//! - htmx_accounts_list: Table and pagination (HTML fragment)
//! - htmx_counterparty_detail: Transaction modal (HTML fragment)

use crate::{ApiError, AppState};
use acctweb_core::{AccountSummary, CoreError, CounterpartyDetail, Listing, Side, ViewState};
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::collections::HashMap;

/// Listing page for API response
#[derive(Debug, Clone, Serialize)]
pub struct ListingResponse {
    pub side: Side,
    #[serde(flatten)]
    pub listing: Listing,
}

/// Get one page of counterparties (JSON API)
///
/// Query: `q` search text, `page` (1-based), `size` (one of the allowed sizes)
pub async fn api_listing(
    state: State<AppState>,
    Path(side): Path<Side>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ListingResponse>, ApiError> {
    let view = ViewState::from_query(&params, &state.page_sizes);
    let book = state.book.read().await;
    let listing = book.side(side)?.listing(&view, state.config.pagination.page_window);
    log::debug!(
        "{} listing q={:?} page={}/{} rows={}",
        side, listing.search, listing.page, listing.total_pages, listing.rows.len()
    );
    Ok(Json(ListingResponse { side, listing }))
}

/// Get totals for one side (JSON API)
pub async fn api_summary(
    state: State<AppState>,
    Path(side): Path<Side>,
) -> Result<Json<AccountSummary>, ApiError> {
    let book = state.book.read().await;
    Ok(Json(book.side(side)?.summary()))
}

/// Get a counterparty and its transactions (JSON API)
pub async fn api_counterparty_detail(
    state: State<AppState>,
    Path((side, id)): Path<(Side, String)>,
) -> Result<Json<CounterpartyDetail>, ApiError> {
    let book = state.book.read().await;
    Ok(Json(book.side(side)?.detail(&id)?))
}

/// Error message fragment with the status the JSON API would use
fn fragment_error(err: CoreError) -> Response {
    log::debug!("Fragment request failed: {}", err);
    let message = err.to_string();
    let status = ApiError::from(err).status();
    (
        status,
        Html(format!(
            "<div class='text-center py-8 text-red-500'>{}</div>",
            acctweb_utils::escape_html(&message)
        )),
    )
        .into_response()
}

/// HTMX: Counterparty table with pagination controls
pub async fn htmx_accounts_list(
    state: State<AppState>,
    Path(side): Path<Side>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let view = ViewState::from_query(&params, &state.page_sizes);
    let book = state.book.read().await;
    match book.side(side) {
        Ok(side_book) => {
            let listing = side_book.listing(&view, state.config.pagination.page_window);
            Html(super::page::render_listing(side, &view, &listing, &state)).into_response()
        }
        Err(e) => fragment_error(e),
    }
}

/// HTMX: Transaction modal for one counterparty row
pub async fn htmx_counterparty_detail(
    state: State<AppState>,
    Path((side, id)): Path<(Side, String)>,
) -> Response {
    let book = state.book.read().await;
    match book.side(side).and_then(|s| s.detail(&id)) {
        Ok(detail) => Html(super::page::render_detail_modal(&detail, &state.config.currency)).into_response(),
        Err(e) => fragment_error(e),
    }
}
