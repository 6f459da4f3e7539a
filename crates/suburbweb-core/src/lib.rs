//! Endpoint routing and response shaping for the suburb dashboard

pub mod endpoint;
pub mod error;
pub mod record;
pub mod reports;
pub mod stats;
pub mod transform;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use suburbweb_client::ApiRef;
use suburbweb_config::{Config, DefaultsConfig};

pub use endpoint::{Endpoint, EndpointOption, EndpointRouter, ResolvedEndpoint};
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorCode, ErrorContext, ErrorLogger, ErrorSeverity};
pub use reports::Report;
pub use transform::Transform;

/// Longest suburb name accepted from the form
pub const MAX_SUBURB_LEN: usize = 100;

/// Raw form or query-string input
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DashboardQuery {
    pub suburb: Option<String>,
    pub endpoint: Option<String>,
}

impl DashboardQuery {
    pub fn new(suburb: &str, endpoint: &str) -> Self {
        Self {
            suburb: Some(suburb.to_string()),
            endpoint: Some(endpoint.to_string()),
        }
    }
}

/// A validated query, ready to fetch
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    pub suburb: String,
    pub endpoint: ResolvedEndpoint,
}

/// A finished report and what produced it
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutcome {
    pub suburb: String,
    pub endpoint: String,
    pub label: String,
    pub resource: String,
    pub fetched_at: DateTime<Utc>,
    pub report: Report,
}

/// Resolves, fetches and shapes one report per request
pub struct Dashboard {
    router: EndpointRouter,
    api: ApiRef,
    defaults: DefaultsConfig,
    logger: Arc<dyn ErrorLogger>,
}

impl Dashboard {
    pub fn new(config: &Config, api: ApiRef) -> CoreResult<Self> {
        let router = EndpointRouter::from_config(&config.api)?;
        router.resolve(&config.defaults.endpoint).map_err(|_| CoreError::ConfigError {
            message: format!("default endpoint '{}' is not known", config.defaults.endpoint),
        })?;

        Ok(Self {
            router,
            api,
            defaults: config.defaults.clone(),
            logger: Arc::new(DefaultErrorLogger),
        })
    }

    /// Replace the error logger
    pub fn with_logger(mut self, logger: Arc<dyn ErrorLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn router(&self) -> &EndpointRouter {
        &self.router
    }

    /// Suburb and endpoint key after trimming and defaulting, unvalidated.
    /// Used to refill the form.
    pub fn effective_inputs(&self, query: &DashboardQuery) -> (String, String) {
        let pick = |value: &Option<String>, default: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };
        (
            pick(&query.suburb, &self.defaults.suburb),
            pick(&query.endpoint, &self.defaults.endpoint),
        )
    }

    /// Validate input and resolve the endpoint. No remote call is made.
    pub fn prepare(&self, query: &DashboardQuery) -> CoreResult<PreparedQuery> {
        let (suburb, key) = self.effective_inputs(query);

        if suburb.chars().count() > MAX_SUBURB_LEN {
            return Err(CoreError::InvalidSuburb {
                reason: format!("longer than {} characters", MAX_SUBURB_LEN),
            });
        }
        if suburb.chars().any(char::is_control) {
            return Err(CoreError::InvalidSuburb {
                reason: "contains control characters".to_string(),
            });
        }

        let endpoint = self.router.resolve(&key)?;
        Ok(PreparedQuery { suburb, endpoint })
    }

    /// Fetch and shape a prepared query
    pub async fn execute(&self, prepared: PreparedQuery) -> CoreResult<ReportOutcome> {
        let PreparedQuery { suburb, endpoint } = prepared;
        log::debug!("Fetching '{}' for suburb '{}'", endpoint.resource, suburb);

        let body = self.api.fetch(&endpoint.resource, &suburb).await?;
        let report = endpoint.transform.apply(body)?;

        log::info!(
            "Built {} report for '{}' ({} rows)",
            endpoint.key,
            suburb,
            report.row_count()
        );

        Ok(ReportOutcome {
            suburb,
            endpoint: endpoint.key,
            label: endpoint.label,
            resource: endpoint.resource,
            fetched_at: Utc::now(),
            report,
        })
    }

    /// Prepare and execute, logging any failure
    pub async fn run(&self, query: &DashboardQuery) -> CoreResult<ReportOutcome> {
        let result = match self.prepare(query) {
            Ok(prepared) => self.execute(prepared).await,
            Err(err) => Err(err),
        };

        if let Err(ref err) = result {
            let (suburb, endpoint) = self.effective_inputs(query);
            let context = ErrorContext::new("dashboard.run")
                .with_data("suburb", serde_json::json!(suburb))
                .with_data("endpoint", serde_json::json!(endpoint));
            self.logger.log_error(err, &context);
        }

        result
    }
}

// ==================== Tests ====================
