//! HTTP server for the suburb dashboard
//!
//! Routes are organized into modules:
//! - routes::dashboard: Search form, report page and report JSON
//! - routes::settings: Effective configuration

pub mod error;
pub mod routes;

use axum::{routing::get, Router};
use std::sync::Arc;
use suburbweb_config::Config;
use suburbweb_core::Dashboard;
use tokio::net::TcpListener;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dashboard::{api_endpoints, api_report, page_dashboard, page_dashboard_submit};
    use routes::settings::api_settings;

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/report", get(api_report))
        .route("/api/endpoints", get(api_endpoints))
        .route("/api/settings", get(api_settings))
        // Page routes
        .route("/", get(page_dashboard).post(page_dashboard_submit))
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
    <title>{} - Suburb Insights</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css">
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    <header class="bg-white border-b px-6 py-4"><h1 class="text-xl font-bold text-indigo-600">Suburb Insights</h1></header>
    <main id="content" class="max-w-6xl mx-auto p-6">{}</main>
</body>
</html>"#,
        suburbweb_utils::escape_html(title),
        content
    )
}

/// Check if request is from HTMX (partial page update)
pub(crate) fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for a full page, or return it bare for an HTMX swap
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        inner_content.to_string()
    } else {
        base_html(title, inner_content)
    }
}

/// Start the HTTP server and run until Ctrl-C
pub async fn start_server(config: Config, dashboard: Arc<Dashboard>) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { dashboard, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting suburbweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Dashboard)");
    log::info!("  - /api/report (Report JSON)");
    log::info!("  - /api/endpoints (Endpoint list)");
    log::info!("  - /api/settings (Configuration)");

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
pub(crate) mod test_support {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use suburbweb_client::{ClientError, SuburbApiTrait};
    use tower::ServiceExt;

    /// Canned data service
    pub struct StubApi {
        pub calls: AtomicUsize,
        pub response: fn(&str) -> Result<Value, ClientError>,
    }

    #[async_trait]
    impl SuburbApiTrait for StubApi {
        async fn fetch(&self, resource: &str, _suburb: &str) -> Result<Value, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.response)(resource)
        }
    }

    pub fn app_with(
        config: Config,
        response: fn(&str) -> Result<Value, ClientError>,
    ) -> (Router, Arc<StubApi>) {
        let api = Arc::new(StubApi {
            calls: AtomicUsize::new(0),
            response,
        });
        let dashboard = Dashboard::new(&config, api.clone()).unwrap();
        let state = AppState {
            dashboard: Arc::new(dashboard),
            config,
        };
        (create_router(state), api)
    }

    pub fn app(response: fn(&str) -> Result<Value, ClientError>) -> (Router, Arc<StubApi>) {
        app_with(Config::default(), response)
    }

    pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn get(router: Router, uri: &str) -> (StatusCode, String) {
        send(router, Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub fn calls(api: &StubApi) -> usize {
        api.calls.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::{base_html, page_response};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_health_check() {
        let (router, _) = app(|_| Ok(json!({})));
        let (status, body) = get(router, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[test]
    fn test_base_html_escapes_title() {
        let html = base_html("<b>", "<p>body</p>");
        assert!(html.contains("<title>&lt;b&gt; - Suburb Insights</title>"));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_page_response_partial_for_htmx() {
        let mut headers = axum::http::HeaderMap::new();
        assert!(page_response(&headers, "Dashboard", "<p>x</p>").starts_with("<!DOCTYPE html>"));

        headers.insert("hx-request", "true".parse().unwrap());
        assert_eq!(page_response(&headers, "Dashboard", "<p>x</p>"), "<p>x</p>");
    }
}
