//! Account listing page rendering - Full page and fragment helpers
//!
//! Helper functions:
//! - render_summary_cards: Totals over the whole side
//! - render_listing: Counterparty table with pagination
//! - render_detail_modal: Transaction modal for one counterparty

use crate::format::{money, signed_money};
use crate::AppState;
use acctweb_config::CurrencyConfig;
use acctweb_core::{AccountSummary, CounterpartyDetail, Listing, Side, ViewState};
use acctweb_utils::escape_html;
use axum::extract::{Path, State};
use axum::response::Html;

/// Listing page - Summary cards, search box, size selector and the table container
pub async fn page_accounts(
    state: State<AppState>,
    Path(side): Path<Side>,
    headers: axum::http::HeaderMap,
) -> Html<String> {
    let book = state.book.read().await;
    let summary = book.side(side).map(|s| s.summary()).unwrap_or_default();
    let default_size = state.page_sizes.default_size().get();

    let size_options: String = state
        .page_sizes
        .allowed()
        .iter()
        .map(|size| {
            format!(
                "<option value='{size}'{}>{size} per page</option>",
                if *size == default_size { " selected" } else { "" }
            )
        })
        .collect();

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-6'>
            <div>
                <h2 class='text-2xl font-bold'>{title}</h2>
                <p class='text-sm text-gray-500'>{count} total {plural}</p>
            </div>
            <button onclick='reloadBook()' class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200' title='Reload data'>Reload</button>
        </div>
        {cards}
        <div class='flex flex-wrap items-center gap-3 mb-4'>
            <input type='text' name='q' placeholder='Search by {label_lower} name or ID...'
                hx-get='/accounts/{side}/list' hx-target='#accounts-content' hx-trigger='keyup changed delay:300ms'
                hx-include='[name=size]'
                class='px-4 py-2 border rounded-lg flex-1 min-w-64'>
            <select name='size' hx-get='/accounts/{side}/list' hx-target='#accounts-content' hx-trigger='change'
                hx-include='[name=q]' class='px-4 py-2 border rounded-lg'>
                {size_options}
            </select>
        </div>
        <div class='bg-white rounded-xl shadow-sm'>
            <div class='p-4 border-b'>
                <h3 class='text-lg font-semibold'>{label} {side_word} Summary</h3>
                <p class='text-sm text-gray-500'>Click any {label_lower} to view transaction history</p>
            </div>
            <div id='accounts-content' hx-get='/accounts/{side}/list?size={default_size}' hx-trigger='load'>
                <p class='text-gray-500 text-center py-8'>Loading...</p>
            </div>
        </div>
        <div id='modal-root'></div>
        <script>
        function closeModal() {{
            document.getElementById('modal-root').innerHTML = '';
        }}
        function reloadBook() {{
            fetch('/api/reload', {{method: 'POST'}})
                .then(r => r.json())
                .then(data => {{
                    if (data.success) {{
                        window.location.reload();
                    }} else {{
                        alert('Reload failed: ' + data.message);
                    }}
                }})
                .catch(e => alert('Reload failed: ' + e));
        }}
        </script>"#,
        title = side.title(),
        count = summary.count,
        plural = side.counterparty_plural(),
        cards = render_summary_cards(side, &summary, &state.config.currency),
        label = side.counterparty_label(),
        label_lower = side.counterparty_label().to_lowercase(),
        side_word = match side {
            Side::Debit => "Debit",
            Side::Credit => "Credit",
        },
        side = side,
        size_options = size_options,
        default_size = default_size,
    );

    Html(crate::page_response(&headers, side.title(), &format!("/accounts/{}", side), &inner_content))
}

fn stat_card(color: &str, title: &str, value: &str, sub_text: &str) -> String {
    format!(
        "<div class='bg-{color}-50 p-4 rounded-lg border border-{color}-200'>\
            <p class='text-xs font-semibold uppercase text-{color}-700'>{title}</p>\
            <p class='text-2xl font-bold text-gray-900'>{value}</p>\
            <p class='text-xs text-gray-600'>{sub_text}</p>\
        </div>"
    )
}

/// Summary cards - always reflect the whole side, never the current search
pub fn render_summary_cards(side: Side, summary: &AccountSummary, currency: &CurrencyConfig) -> String {
    let (count_sub, gross_sub, settled_sub) = match side {
        Side::Debit => ("Active suppliers", "All invoices", "Cleared amount"),
        Side::Credit => ("Active buyers", "All sales", "Collected amount"),
    };
    format!(
        "<div class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4 mb-6'>{}{}{}{}</div>",
        stat_card("emerald", &format!("Total {}", side.counterparty_plural()), &summary.count.to_string(), count_sub),
        stat_card("purple", side.gross_label(), &money(summary.gross_total, currency), gross_sub),
        stat_card("blue", side.settled_label(), &money(summary.settled_total, currency), settled_sub),
        stat_card("red", side.outstanding_label(), &money(summary.outstanding_total, currency), "Due balance"),
    )
}

/// Fragment URL that reproduces `view`
fn list_url(side: Side, view: &ViewState) -> String {
    format!(
        "/accounts/{}/list?q={}&page={}&size={}",
        side,
        urlencoding::encode(view.search()),
        view.page(),
        view.page_size().get()
    )
}

fn page_button(side: Side, target: &ViewState, label: &str, enabled: bool, active: bool) -> String {
    if !enabled {
        return format!(
            "<button disabled class='px-3 py-1 border rounded text-gray-400 cursor-not-allowed'>{}</button>",
            label
        );
    }
    let class = if active {
        "px-3 py-1 border rounded bg-purple-600 text-white border-purple-600"
    } else {
        "px-3 py-1 border rounded bg-white text-gray-600 hover:bg-gray-100"
    };
    format!(
        "<button hx-get='{}' hx-target='#accounts-content' class='{}'>{}</button>",
        escape_html(&list_url(side, target)),
        class,
        label
    )
}

/// Counterparty table plus pagination controls.
///
/// Every pagination link is the state reached from `view` by the matching
/// transition, so links always land on a page that exists.
pub fn render_listing(side: Side, view: &ViewState, listing: &Listing, state: &AppState) -> String {
    let currency = &state.config.currency;
    let label = side.counterparty_label();

    let mut html = String::from("<div class='overflow-x-auto'><table class='w-full text-sm'><thead class='bg-gray-50'><tr>");
    for header in [
        format!("{} ID", label),
        format!("{} Name", label),
        "No of Invoices".to_string(),
        side.gross_label().to_string(),
        side.settled_label().to_string(),
        "Balance".to_string(),
        "Actions".to_string(),
    ] {
        html.push_str(&format!("<th class='px-6 py-3 text-left font-semibold text-gray-600'>{}</th>", header));
    }
    html.push_str("</tr></thead><tbody class='divide-y'>");

    if listing.rows.is_empty() {
        html.push_str(&format!(
            "<tr><td colspan='7' class='px-6 py-8 text-center text-gray-500'>No {} found</td></tr>",
            side.counterparty_plural()
        ));
    }

    for row in &listing.rows {
        let detail_url = format!("/accounts/{}/{}/detail", side, urlencoding::encode(&row.id));
        html.push_str(&format!(
            r#"<tr class='hover:bg-purple-50 cursor-pointer' hx-get='{}' hx-target='#modal-root'>
                <td class='px-6 py-4 font-mono'>{}</td>
                <td class='px-6 py-4 font-medium'>{}</td>
                <td class='px-6 py-4 text-center'>{}</td>
                <td class='px-6 py-4'>{}</td>
                <td class='px-6 py-4 text-emerald-600'>{}</td>
                <td class='px-6 py-4 text-red-600 font-bold'>{}</td>
                <td class='px-6 py-4'><span class='text-purple-600 font-semibold'>View</span></td>
            </tr>"#,
            escape_html(&detail_url),
            escape_html(&row.external_code),
            escape_html(&row.name),
            row.invoice_count,
            money(row.gross_amount, currency),
            money(row.settled_amount, currency),
            money(row.outstanding_balance, currency),
        ));
    }
    html.push_str("</tbody></table></div>");

    let filtered = listing.filtered_count;
    let current = view.clone().with_page(view.page(), filtered);

    let mut pages = String::new();
    pages.push_str(&page_button(side, &current.clone().prev_page(filtered), "&lsaquo;", listing.has_prev, false));
    for page in &listing.page_window {
        let target = current.clone().with_page(*page, filtered);
        pages.push_str(&page_button(side, &target, &page.to_string(), true, *page == listing.page));
    }
    pages.push_str(&page_button(side, &current.next_page(filtered), "&rsaquo;", listing.has_next, false));

    html.push_str(&format!(
        "<div class='flex flex-wrap items-center justify-between gap-4 p-4 bg-gray-50 border-t'>\
            <span class='text-sm text-gray-500'>Showing {} of {} {} (page {} / {})</span>\
            <div class='flex items-center gap-2'>{}</div>\
        </div>",
        listing.rows.len(),
        listing.filtered_count,
        side.counterparty_plural(),
        listing.page,
        listing.total_pages,
        pages
    ));
    html
}

/// Transaction modal for one counterparty.
///
/// The filter inputs are shown but not wired to anything.
pub fn render_detail_modal(detail: &CounterpartyDetail, currency: &CurrencyConfig) -> String {
    let side = detail.side;
    let counterparty = &detail.counterparty;

    let status_options: String = ["All Status", "Paid", "Unpaid", "Partially Paid"]
        .iter()
        .map(|s| format!("<option>{}</option>", s))
        .collect();
    let type_options: String = std::iter::once("All Types".to_string())
        .chain(side.transaction_types().iter().map(|t| t.to_string()))
        .map(|s| format!("<option>{}</option>", s))
        .collect();

    let mut rows = String::new();
    for tx in &detail.transactions {
        let type_class = if tx.is_return() { "bg-red-100 text-red-700" } else { "bg-emerald-100 text-emerald-700" };
        let amount_class = if tx.is_return() { "text-red-600" } else { "text-emerald-600" };
        let status_class = if tx.is_settled() { "bg-emerald-500" } else { "bg-red-500" };
        rows.push_str(&format!(
            r#"<tr class='hover:bg-purple-50'>
                <td class='px-6 py-4'><span class='px-3 py-1 rounded-full text-xs font-bold {}'>{}</span></td>
                <td class='px-6 py-4'>{}</td>
                <td class='px-6 py-4 font-mono font-bold'>{}</td>
                <td class='px-6 py-4 font-bold {}'>{}</td>
                <td class='px-6 py-4 text-red-600 font-bold'>{}</td>
                <td class='px-6 py-4 text-gray-600'>{}</td>
                <td class='px-6 py-4'><span class='px-3 py-1 rounded-full text-xs font-bold text-white {}'>{}</span></td>
            </tr>"#,
            type_class,
            tx.transaction_type,
            tx.date_display(),
            escape_html(&tx.document_number),
            amount_class,
            signed_money(tx.signed_paid_amount(), currency),
            money(tx.remaining_balance, currency),
            escape_html(tx.reference_display()),
            status_class,
            tx.status,
        ));
    }
    if detail.transactions.is_empty() {
        rows.push_str("<tr><td colspan='7' class='px-6 py-8 text-center text-gray-500'>No transactions</td></tr>");
    }

    format!(
        r#"<div class='fixed inset-0 bg-black/30 flex items-center justify-center z-50 p-4'>
    <div class='bg-white rounded-3xl shadow-2xl max-w-6xl w-full max-h-[90vh] overflow-hidden'>
        <div class='bg-gradient-to-r from-purple-600 to-blue-600 p-6 text-white flex justify-between items-center'>
            <div>
                <h3 class='text-2xl font-bold'>{name}</h3>
                <p class='text-purple-100 mt-1'>{label} ID: {code}</p>
                <p class='text-xl font-bold mt-3'>{outstanding_label}: <span class='text-red-200'>{outstanding}</span></p>
            </div>
            <button onclick='closeModal()' class='text-white text-2xl px-3'>&times;</button>
        </div>
        <div class='p-6 bg-gray-50 border-b'>
            <h3 class='text-lg font-bold text-gray-800 mb-3'>Filters</h3>
            <div class='grid grid-cols-1 md:grid-cols-4 gap-4'>
                <input type='date' class='px-4 py-2 border rounded-lg'>
                <input type='date' class='px-4 py-2 border rounded-lg'>
                <select class='px-4 py-2 border rounded-lg'>{status_options}</select>
                <select class='px-4 py-2 border rounded-lg'>{type_options}</select>
            </div>
        </div>
        <div class='overflow-y-auto max-h-96 p-6'>
            <table class='w-full text-sm'>
                <thead class='bg-purple-50'><tr>
                    <th class='px-6 py-3 text-left'>Invoice Type</th>
                    <th class='px-6 py-3 text-left'>Inv Date</th>
                    <th class='px-6 py-3 text-left'>Inv No</th>
                    <th class='px-6 py-3 text-left'>Paid Amnt</th>
                    <th class='px-6 py-3 text-left'>Balance Amnt</th>
                    <th class='px-6 py-3 text-left'>Ref No</th>
                    <th class='px-6 py-3 text-left'>Status</th>
                </tr></thead>
                <tbody class='divide-y'>{rows}</tbody>
            </table>
        </div>
    </div>
</div>"#,
        name = escape_html(&counterparty.name),
        label = side.counterparty_label(),
        code = escape_html(&counterparty.external_code),
        outstanding_label = side.outstanding_label(),
        outstanding = money(counterparty.outstanding_balance, currency),
        status_options = status_options,
        type_options = type_options,
        rows = rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use acctweb_core::{Book, CounterpartySummary, PageSizes, SampleProvider, DEFAULT_PAGE_WINDOW};
    use std::sync::Arc;

    #[test]
    fn test_summary_cards_use_side_labels() {
        let summary = AccountSummary {
            count: 3,
            gross_total: rust_decimal::Decimal::new(7400465, 2),
            ..AccountSummary::default()
        };
        let html = render_summary_cards(Side::Debit, &summary, &CurrencyConfig::default());
        assert!(html.contains("Total Payable"));
        assert!(html.contains("AED 74,004.65"));
        assert!(html.contains("Total vendors"));
    }

    #[tokio::test]
    async fn test_detail_modal_renders_return_negative() {
        let mut book = Book::new(Arc::new(SampleProvider));
        book.load().await.unwrap();
        let detail = book.side(Side::Debit).unwrap().detail("1").unwrap();
        let html = render_detail_modal(&detail, &CurrencyConfig::default());
        assert!(html.contains("ABC Bullion Trading LLC"));
        assert!(html.contains("Vendor ID: VEND2025001"));
        assert!(html.contains("-AED 619.97"));
        assert!(html.contains("+AED 7,350.00"));
        assert!(html.contains("Purchase Return"));
        assert!(!html.contains("Sales Return"));
    }

    #[tokio::test]
    async fn test_listing_escapes_and_paginates() {
        let state = crate::tests::sample_state().await;
        let book = state.book.read().await;
        let view = ViewState::new(PageSizes::default().default_size()).with_search("<b>");
        let listing = book.side(Side::Credit).unwrap().listing(&view, DEFAULT_PAGE_WINDOW);
        let html = render_listing(Side::Credit, &view, &listing, &state);
        assert!(html.contains("No customers found"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("q=%3Cb%3E"));
    }

    #[tokio::test]
    async fn test_pagination_links_follow_view_transitions() {
        let state = crate::tests::sample_state().await;
        let records: Vec<CounterpartySummary> = (1..=30)
            .map(|i| CounterpartySummary {
                id: i.to_string(),
                external_code: format!("CUST{:04}", i),
                name: format!("Customer {}", i),
                invoice_count: 1,
                gross_amount: rust_decimal::Decimal::new(10, 0),
                settled_amount: rust_decimal::Decimal::ZERO,
                outstanding_balance: rust_decimal::Decimal::new(10, 0),
            })
            .collect();

        let sizes = PageSizes::default();
        let params: std::collections::HashMap<String, String> = [("page", "9"), ("q", "customer ")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let view = ViewState::from_query(&params, &sizes);
        let listing = acctweb_core::listing::listing(&records, &view, DEFAULT_PAGE_WINDOW);
        assert_eq!(listing.page, 3);

        let html = render_listing(Side::Credit, &view, &listing, &state);
        assert!(html.contains("q=customer%20&amp;page=2&amp;size=10"));
        assert!(html.contains("q=customer%20&amp;page=1&amp;size=10"));
        assert!(!html.contains("page=4"));
        assert!(!html.contains("page=9"));
        assert!(html.contains("Showing 10 of 30 customers (page 3 / 3)"));
    }
}
