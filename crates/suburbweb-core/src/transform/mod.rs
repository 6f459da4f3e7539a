//! Per-endpoint response shaping
//!
//! Each transform is a pure function of the response body:
//! - properties: listings, price and bedroom summaries, per-type mean price
//! - schools: fixed eight-column projection
//! - amenities / development: rows plus category counts
//! - demographics: age, income and population tables
//! - ethnicity: mean share per group across areas
//! - pocket: house and unit price/growth series

use serde_json::Value;

use crate::error::CoreResult;
use crate::reports::Report;

pub mod amenities;
pub mod demographics;
pub mod development;
pub mod ethnicity;
pub mod pocket;
pub mod properties;
pub mod schools;

/// Closed set of transforms, one per endpoint plus pass-through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Properties,
    Schools,
    Amenities,
    Demographics,
    Development,
    Ethnicity,
    Pocket,
    PassThrough,
}

impl Transform {
    pub fn apply(self, body: Value) -> CoreResult<Report> {
        match self {
            Transform::Properties => properties::transform(&body).map(Report::Properties),
            Transform::Schools => schools::transform(&body).map(Report::Schools),
            Transform::Amenities => amenities::transform(&body).map(Report::Amenities),
            Transform::Demographics => demographics::transform(&body).map(Report::Demographics),
            Transform::Development => development::transform(&body).map(Report::Development),
            Transform::Ethnicity => ethnicity::transform(&body).map(Report::Ethnicity),
            Transform::Pocket => pocket::transform(&body).map(Report::Pocket),
            Transform::PassThrough => Ok(Report::Raw(body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pass_through_is_unmodified() {
        let body = json!({
            "zeta": [1, 2, { "nested": null }],
            "alpha": { "b": 2, "a": 1 },
            "results": []
        });
        let report = Transform::PassThrough.apply(body.clone()).unwrap();
        match report {
            Report::Raw(raw) => {
                assert_eq!(raw, body);
                assert_eq!(
                    serde_json::to_string(&raw).unwrap(),
                    serde_json::to_string(&body).unwrap()
                );
            }
            other => panic!("expected raw report, got {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_selects_transform() {
        let body = json!({ "results": [{ "name": "Belmont North Public", "gender": "Mixed" }] });
        assert!(matches!(Transform::Schools.apply(body.clone()), Ok(Report::Schools(_))));
        assert!(matches!(Transform::Amenities.apply(body), Ok(Report::Amenities(_))));
    }
}
