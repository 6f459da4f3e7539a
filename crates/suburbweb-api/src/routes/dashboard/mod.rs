//! Dashboard routes - Search form and per-endpoint reports
//!
//! Structure:
//! - api.rs: JSON report and endpoint list
//! - page.rs: Full page and HTMX partial rendering
//! - view.rs: HTML for each report kind

pub mod api;
pub mod page;
pub mod view;

pub use api::{api_endpoints, api_report};
pub use page::{page_dashboard, page_dashboard_submit};
