//! Endpoint keys and their upstream resources

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use suburbweb_config::ApiConfig;

use crate::error::{CoreError, CoreResult};
use crate::transform::Transform;

/// Dashboard categories with a dedicated summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Properties,
    Schools,
    Amenities,
    Demographics,
    Development,
    Ethnicity,
    Pocket,
}

impl Endpoint {
    /// All endpoints in form order
    pub const ALL: [Endpoint; 7] = [
        Endpoint::Properties,
        Endpoint::Demographics,
        Endpoint::Schools,
        Endpoint::Amenities,
        Endpoint::Development,
        Endpoint::Ethnicity,
        Endpoint::Pocket,
    ];

    /// Form value
    pub fn key(&self) -> &'static str {
        match self {
            Endpoint::Properties => "properties",
            Endpoint::Schools => "schools",
            Endpoint::Amenities => "amenities",
            Endpoint::Demographics => "demographics",
            Endpoint::Development => "development",
            Endpoint::Ethnicity => "ethnicity",
            Endpoint::Pocket => "pocket",
        }
    }

    /// Path segment on the data service
    pub fn resource(&self) -> &'static str {
        match self {
            Endpoint::Amenities => "amenity",
            other => other.key(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::Properties => "For Sale Properties",
            Endpoint::Schools => "Schools",
            Endpoint::Amenities => "Amenities",
            Endpoint::Demographics => "Demographics",
            Endpoint::Development => "Development",
            Endpoint::Ethnicity => "Ethnicity",
            Endpoint::Pocket => "Pocket Prices",
        }
    }

    /// Message shown when the data service returns no rows
    ///
    /// Demographics never reports an empty result; its missing collections
    /// render as empty tables, so that arm is never shown.
    pub fn empty_message(&self) -> &'static str {
        match self {
            Endpoint::Properties => "No properties found.",
            Endpoint::Schools => "No schools found.",
            Endpoint::Amenities => "No amenities found.",
            Endpoint::Demographics => "No demographics data found.",
            Endpoint::Development => "No development data found.",
            Endpoint::Ethnicity => "No ethnicity data found.",
            Endpoint::Pocket => "No pocket price data found.",
        }
    }

    pub fn transform(&self) -> Transform {
        match self {
            Endpoint::Properties => Transform::Properties,
            Endpoint::Schools => Transform::Schools,
            Endpoint::Amenities => Transform::Amenities,
            Endpoint::Demographics => Transform::Demographics,
            Endpoint::Development => Transform::Development,
            Endpoint::Ethnicity => Transform::Ethnicity,
            Endpoint::Pocket => Transform::Pocket,
        }
    }
}

impl std::str::FromStr for Endpoint {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Endpoint::ALL
            .iter()
            .copied()
            .find(|e| e.key() == key)
            .ok_or_else(|| CoreError::UnknownEndpoint { key: s.trim().to_string() })
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// An endpoint key resolved to its resource and transform
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEndpoint {
    pub key: String,
    pub label: String,
    pub resource: String,
    pub transform: Transform,
}

/// Entry for the endpoint selector and `/api/endpoints`
#[derive(Debug, Clone, Serialize)]
pub struct EndpointOption {
    pub key: String,
    pub label: String,
    pub resource: String,
    pub raw: bool,
}

/// Maps form keys to upstream resources
#[derive(Debug, Clone, Default)]
pub struct EndpointRouter {
    raw_endpoints: BTreeMap<String, String>,
}

impl EndpointRouter {
    /// Build a router with extra raw endpoints (key -> resource)
    pub fn new(raw_endpoints: BTreeMap<String, String>) -> CoreResult<Self> {
        let mut normalized = BTreeMap::new();
        for (key, resource) in raw_endpoints {
            let key = key.trim().to_lowercase();
            if key.parse::<Endpoint>().is_ok() {
                return Err(CoreError::ConfigError {
                    message: format!("raw endpoint '{}' shadows a built-in endpoint", key),
                });
            }
            normalized.insert(key, resource.trim().to_string());
        }
        Ok(Self { raw_endpoints: normalized })
    }

    pub fn from_config(config: &ApiConfig) -> CoreResult<Self> {
        Self::new(config.raw_endpoints.clone())
    }

    /// Resolve a form key. Unknown keys are rejected here, before any fetch.
    pub fn resolve(&self, key: &str) -> CoreResult<ResolvedEndpoint> {
        match key.parse::<Endpoint>() {
            Ok(endpoint) => Ok(ResolvedEndpoint {
                key: endpoint.key().to_string(),
                label: endpoint.label().to_string(),
                resource: endpoint.resource().to_string(),
                transform: endpoint.transform(),
            }),
            Err(err) => {
                let normalized = key.trim().to_lowercase();
                match self.raw_endpoints.get(&normalized) {
                    Some(resource) => Ok(ResolvedEndpoint {
                        label: normalized.clone(),
                        key: normalized,
                        resource: resource.clone(),
                        transform: Transform::PassThrough,
                    }),
                    None => Err(err),
                }
            }
        }
    }

    /// Built-in endpoints followed by raw endpoints
    pub fn options(&self) -> Vec<EndpointOption> {
        let builtin = Endpoint::ALL.iter().map(|e| EndpointOption {
            key: e.key().to_string(),
            label: e.label().to_string(),
            resource: e.resource().to_string(),
            raw: false,
        });
        let raw = self.raw_endpoints.iter().map(|(key, resource)| EndpointOption {
            key: key.clone(),
            label: key.clone(),
            resource: resource.clone(),
            raw: true,
        });
        builtin.chain(raw).collect()
    }
}
