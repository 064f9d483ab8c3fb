//! HTTP API server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::accounts: Vendor and customer listings, transaction modal

pub mod error;
pub mod format;
pub mod routes;

use acctweb_config::Config;
use acctweb_core::{Book, PageSizes, Side};
use axum::{
    extract::State,
    http::{HeaderMap, Uri},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub book: Arc<RwLock<Book>>,
    pub config: Config,
    pub page_sizes: PageSizes,
}

impl AppState {
    pub fn new(config: Config, book: Arc<RwLock<Book>>) -> Self {
        let page_sizes = PageSizes::from_config(&config.pagination);
        Self { book, config, page_sizes }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::{
        api_counterparty_detail, api_listing, api_summary, htmx_accounts_list,
        htmx_counterparty_detail, page_accounts,
    };

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/accounts/:side", get(api_listing))
        .route("/api/accounts/:side/summary", get(api_summary))
        .route("/api/accounts/:side/:id", get(api_counterparty_detail))
        .route("/api/reload", post(api_reload))
        // HTMX page routes
        .route("/", get(index_page))
        .route("/accounts/:side", get(page_accounts))
        // HTMX partial routes
        .route("/accounts/:side/list", get(htmx_accounts_list))
        .route("/accounts/:side/:id/detail", get(htmx_counterparty_detail))
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        resource: uri.path().to_string(),
    }
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - acctweb</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let debit = format!("/accounts/{}", Side::Debit);
    let credit = format!("/accounts/{}", Side::Credit);
    let links = [
        ("/", "Dashboard", "📊"),
        (debit.as_str(), Side::Debit.title(), "📤"),
        (credit.as_str(), Side::Credit.title(), "📥"),
    ];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-purple-600'>acctweb</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label, icon) in &links {
        let is_active = if *path == "/" {
            current_path == "/"
        } else {
            current_path.starts_with(path)
        };
        let active_class = if is_active { "bg-purple-50 text-purple-600" } else { "text-gray-600 hover:bg-gray-50" };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            inner_content)
    } else {
        base_html(title, &format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            nav_sidebar(current_path), inner_content))
    }
}

/// Dashboard with the totals of both sides
async fn index_page(state: State<AppState>, headers: HeaderMap) -> Html<String> {
    let book = state.book.read().await;

    let sections: String = Side::ALL
        .iter()
        .map(|side| {
            let summary = book.side(*side).map(|s| s.summary()).unwrap_or_default();
            format!(
                r#"<div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
                <div class='flex items-center justify-between mb-4'>
                    <h3 class='text-lg font-semibold'>{}</h3>
                    <a href='/accounts/{}' class='text-sm text-purple-600 hover:underline'>View {}</a>
                </div>
                {}
            </div>"#,
                side.title(),
                side,
                side.counterparty_plural(),
                routes::accounts::render_summary_cards(*side, &summary, &state.config.currency)
            )
        })
        .collect();

    let status = if book.is_loaded() {
        format!("Data source: {}", acctweb_utils::escape_html(&book.source()))
    } else {
        "No data loaded".to_string()
    };

    let inner_content = format!(
        r#"<div class='mb-6'>
            <h2 class='text-2xl font-bold'>Dashboard</h2>
            <p class='text-sm text-gray-500'>{}</p>
        </div>
        {}"#,
        status, sections
    );

    Html(page_response(&headers, "Dashboard", "/", &inner_content))
}

/// Reload book API endpoint
async fn api_reload(state: State<AppState>) -> Json<serde_json::Value> {
    let mut book = state.book.write().await;
    match book.reload().await {
        Ok(()) => Json(serde_json::json!({
            "success": true,
            "message": format!("Reloaded from {}", book.source()),
        })),
        Err(e) => Json(serde_json::json!({
            "success": false,
            "message": e.to_string(),
        })),
    }
}

/// Start the HTTP server
///
/// Builds the router over the shared book, binds `server.host:server.port`
/// and serves until the listener fails.
pub async fn start_server(config: Config, book: Arc<RwLock<Book>>) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, book);
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting acctweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Dashboard)");
    log::info!("  - /accounts/debit (Vendor accounts)");
    log::info!("  - /accounts/credit (Customer accounts)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped");
    Ok(())
}

// ==================== Tests ====================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use acctweb_core::SampleProvider;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    pub(crate) async fn sample_state() -> AppState {
        let mut book = Book::new(Arc::new(SampleProvider));
        book.load().await.unwrap();
        AppState::new(Config::default(), Arc::new(RwLock::new(book)))
    }

    async fn get(uri: &str) -> (StatusCode, String) {
        let router = create_router(sample_state().await);
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = get("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_api_listing_search_by_code() {
        let (status, body) = get("/api/accounts/debit?q=vend2025002").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["side"], "debit");
        assert_eq!(json["rows"].as_array().unwrap().len(), 1);
        assert_eq!(json["rows"][0]["name"], "Global Suppliers Ltd");
        assert_eq!(json["filtered_count"], 1);
        assert_eq!(json["total_count"], 3);
        assert_eq!(json["summary"]["count"], 3);
    }

    #[tokio::test]
    async fn test_api_listing_clamps_page_and_ignores_bad_size() {
        let (_, body) = get("/api/accounts/credit?page=9&size=7").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["page"], 1);
        assert_eq!(json["page_size"], 10);
        assert_eq!(json["total_pages"], 1);
        assert_eq!(json["page_window"], serde_json::json!([1]));
    }

    #[tokio::test]
    async fn test_api_summary() {
        let (status, body) = get("/api/accounts/credit/summary").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["count"], 3);
    }

    #[tokio::test]
    async fn test_api_detail_and_missing_counterparty() {
        let (status, body) = get("/api/accounts/debit/1").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["counterparty"]["external_code"], "VEND2025001");
        assert_eq!(json["transactions"].as_array().unwrap().len(), 5);

        let (status, body) = get("/api/accounts/debit/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("COUNTERPARTY_NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_unloaded_book_is_unavailable() {
        let book = Book::new(Arc::new(SampleProvider));
        let state = AppState::new(Config::default(), Arc::new(RwLock::new(book)));

        for uri in ["/api/accounts/debit", "/api/accounts/credit/summary", "/accounts/debit/list"] {
            let response = create_router(state.clone())
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE, "{}", uri);
        }

        let response = create_router(state)
            .oneshot(Request::builder().uri("/api/accounts/debit/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["code"], "NOT_LOADED");
    }

    #[tokio::test]
    async fn test_api_listing_keeps_search_whitespace() {
        let (_, body) = get("/api/accounts/debit?q=ltd%20").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["search"], "ltd ");
        assert_eq!(json["rows"].as_array().unwrap().len(), 0);
        assert_eq!(json["filtered_count"], 0);
    }

    #[tokio::test]
    async fn test_unknown_side_is_bad_request() {
        let (status, _) = get("/api/accounts/sideways").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = get("/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_htmx_list_fragment() {
        let (status, body) = get("/accounts/credit/list?q=elite").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Elite Retail Chain"));
        assert!(!body.contains("Diamond Jewellers LLC"));
        assert!(body.contains("Showing 1 of 1 customers"));
    }

    #[tokio::test]
    async fn test_full_page_and_partial() {
        let (status, body) = get("/accounts/debit").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<!DOCTYPE html>"));
        assert!(body.contains("Total Payable"));

        let router = create_router(sample_state().await);
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/accounts/debit")
                    .header("hx-request", "true")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!body.contains("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_detail_modal_fragment() {
        let (status, body) = get("/accounts/credit/3/detail").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Luxury Watches Dubai"));
        assert!(body.contains("SINV-20251118-087"));

        let (status, _) = get("/accounts/credit/404/detail").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reload() {
        let router = create_router(sample_state().await);
        let response = router
            .oneshot(Request::builder().method("POST").uri("/api/reload").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], true);
    }

    #[tokio::test]
    async fn test_dashboard() {
        let (status, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Total Receivable"));
        assert!(body.contains("built-in sample data"));
    }
}
