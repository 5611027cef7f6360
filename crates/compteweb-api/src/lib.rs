//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::accounts: Account list, type filter, creation and deletion
//! - routes::transactions: Account detail and transaction form, both variants
//!
//! Pages render a `Loading...` placeholder that pulls its view fragment on
//! load; the fragment carries the `Ready` or `Failed` state.

pub mod error;
pub mod routes;

use axum::{
    http::HeaderMap,
    routing::get,
    Router,
};
use compteweb_config::Config;
use compteweb_core::views::{Notification, NotificationKind};
use compteweb_core::DataClient;
use compteweb_utils::escape_html;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<DataClient>,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::{
        api_account, api_accounts, htmx_account_delete, htmx_account_delete_confirm, htmx_account_store,
        htmx_accounts_table, htmx_accounts_view, page_accounts,
    };
    use routes::transactions::{
        api_account_transactions, htmx_account_page_store, htmx_account_page_view, htmx_manager_store,
        htmx_manager_view, page_account, page_transaction_manager,
    };

    let api = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/accounts", get(api_accounts))
        .route("/api/accounts/:id", get(api_account))
        .route("/api/accounts/:id/transactions", get(api_account_transactions))
        .layer(CorsLayer::permissive());

    Router::new()
        // HTMX page routes
        .route("/", get(page_accounts))
        .route("/account/:account_id", get(page_account).post(htmx_account_page_store))
        .route("/transactions/:account_id", get(page_transaction_manager).post(htmx_manager_store))
        // HTMX partial routes
        .route("/accounts", axum::routing::post(htmx_account_store))
        .route("/accounts/view", get(htmx_accounts_view))
        .route("/accounts/table", get(htmx_accounts_table))
        .route("/accounts/:id/delete", get(htmx_account_delete_confirm).post(htmx_account_delete))
        .route("/account/:account_id/view", get(htmx_account_page_view))
        .route("/transactions/:account_id/view", get(htmx_manager_view))
        .merge(api)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
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
    <title>{} - 7di Raz9ak</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-100 text-gray-900">
    {}
</body>
</html>"#,
        escape_html(title),
        content
    )
}

/// Static header shown on every page
pub fn header_bar() -> &'static str {
    r#"<header class='bg-gray-800 text-white p-6 rounded-lg shadow-md mb-8'>
        <a href='/'><h1 class='text-3xl font-bold text-center'>7di Raz9ak</h1></a>
    </header>"#
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &HeaderMap, title: &str, inner_content: &str) -> String {
    let main = format!(
        r#"<main class='p-8 min-h-screen'>{}{}</main>"#,
        header_bar(),
        inner_content
    );
    if is_htmx_request(headers) {
        main
    } else {
        base_html(title, &main)
    }
}

/// Placeholder of a view in its `Loading` state; replaces itself with the
/// fragment served at `source`
pub fn loader(id: &str, source: &str) -> String {
    format!(
        r#"<div id='{}' hx-get='{}' hx-trigger='load' hx-swap='outerHTML'><p class='text-gray-600'>Loading...</p></div>"#,
        id,
        escape_html(source)
    )
}

/// One-line body of a view in its `Failed` state
pub fn render_failure(id: &str, message: &str) -> String {
    format!(
        r#"<div id='{}'><p class='text-red-600'>Error: {}</p></div>"#,
        id,
        escape_html(message)
    )
}

/// Dismissable notification banner
pub fn render_notification(notification: Option<&Notification>) -> String {
    let Some(notification) = notification else {
        return String::new();
    };
    let (box_class, text_class) = match notification.kind {
        NotificationKind::Success => ("bg-green-50 border-green-200", "text-green-800"),
        NotificationKind::Error => ("bg-red-50 border-red-200", "text-red-800"),
    };
    format!(
        r#"<div class='notification {} border rounded-lg p-4 mb-6 flex items-start justify-between' role='alert' data-kind='{}'>
            <div><p class='font-medium {}'>{}</p><p class='text-sm {}'>{}</p></div>
            <button type='button' class='text-gray-400 hover:text-gray-600' onclick='this.parentElement.remove()'>&times;</button>
        </div>"#,
        box_class,
        match notification.kind {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        },
        text_class,
        escape_html(&notification.title),
        text_class,
        escape_html(&notification.message)
    )
}

/// Start the HTTP server
///
/// Binds the configured address and serves until Ctrl-C.
pub async fn start_server(config: &Config, client: Arc<DataClient>) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let router = create_router(AppState { client });

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting compteweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Account list)");
    log::info!("  - /account/:accountId (Account page)");
    log::info!("  - /transactions/:accountId (Transaction manager)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}

// ==================== Tests ====================


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::{render_notification, Notification};
    use axum::http::StatusCode;
    use compteweb_core::MemoryGateway;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_health_check() {
        let router = app(Arc::new(MemoryGateway::new()));
        let (status, body) = send(&router, get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_full_page_vs_htmx_partial() {
        let router = app(Arc::new(MemoryGateway::new()));

        let (_, full) = send(&router, get("/")).await;
        assert!(full.starts_with("<!DOCTYPE html>"));
        assert!(full.contains("7di Raz9ak"));
        assert!(full.contains("Loading..."));

        let (_, partial) = send(&router, htmx_get("/")).await;
        assert!(!partial.contains("<!DOCTYPE html>"));
        assert!(partial.contains("7di Raz9ak"));
    }

    #[test]
    fn test_notification_is_escaped() {
        let html = render_notification(Some(&Notification::error("<b>boom</b>")));
        assert!(html.contains("&lt;b&gt;boom&lt;/b&gt;"));
        assert!(html.contains("data-kind='error'"));
        assert_eq!(render_notification(None), "");
    }
}
