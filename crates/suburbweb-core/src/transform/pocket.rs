//! House and unit price series

use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::error::{CoreError, CoreResult};
use crate::record::{field_number, flatten, objects, Record};
use crate::reports::{PocketReport, PocketSummary};
use crate::stats::mean;

/// `results` holds the house series then the unit series
pub fn transform(body: &Value) -> CoreResult<PocketReport> {
    let object = body
        .as_object()
        .ok_or_else(|| CoreError::malformed("expected a JSON object for pocket prices"))?;

    let series = match object.get("results") {
        Some(Value::Array(lists)) if lists.len() >= 2 => lists,
        _ => return Err(CoreError::empty(Endpoint::Pocket)),
    };
    let (house, unit) = match (&series[0], &series[1]) {
        (Value::Array(house), Value::Array(unit)) => (house, unit),
        _ => return Err(CoreError::empty(Endpoint::Pocket)),
    };

    let house_data = points(house, "house")?;
    let unit_data = points(unit, "unit")?;

    let price_summary = vec![summarise("House", &house_data), summarise("Unit", &unit_data)];

    Ok(PocketReport {
        house_data,
        unit_data,
        price_summary,
    })
}

fn points(items: &[Value], what: &str) -> CoreResult<Vec<Record>> {
    Ok(objects(items, what)?
        .into_iter()
        .map(|o| flatten(o, "."))
        .collect())
}

fn summarise(property_type: &str, data: &[Record]) -> PocketSummary {
    let values: Vec<f64> = data.iter().filter_map(|r| field_number(r, "value")).collect();
    let growth: Vec<f64> = data.iter().filter_map(|r| field_number(r, "growth")).collect();

    PocketSummary {
        property_type: property_type.to_string(),
        avg_price: mean(&values),
        avg_growth: mean(&growth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_rows() {
        let body = json!({
            "results": [
                [
                    { "date": "2024-01-01", "value": 800000, "growth": null },
                    { "date": "2025-01-01", "value": 900000, "growth": 0.125 }
                ],
                [
                    { "date": "2024-01-01", "value": 500000, "growth": 0.02 },
                    { "date": "2025-01-01", "value": 520000, "growth": 0.04 }
                ]
            ]
        });
        let report = transform(&body).unwrap();

        assert_eq!(report.house_data.len(), 2);
        assert_eq!(report.unit_data[1]["value"], 520000);

        let house = &report.price_summary[0];
        assert_eq!(house.property_type, "House");
        assert_eq!(house.avg_price, Some(850000.0));
        assert_eq!(house.avg_growth, Some(0.125));

        let unit = &report.price_summary[1];
        assert_eq!(unit.property_type, "Unit");
        assert_eq!(unit.avg_price, Some(510000.0));
        assert!((unit.avg_growth.unwrap() - 0.03).abs() < 1e-9);
    }

    #[test]
    fn test_all_growth_missing() {
        let body = json!({ "results": [[{ "value": 1 }], [{ "value": 3, "growth": null }]] });
        let report = transform(&body).unwrap();
        assert_eq!(report.price_summary[0].avg_growth, None);
        assert_eq!(report.price_summary[1].avg_growth, None);
    }

    #[test]
    fn test_fewer_than_two_lists() {
        for body in [
            json!({ "results": [] }),
            json!({ "results": [[{ "value": 1 }]] }),
            json!({ "results": { "house": [] } }),
            json!({ "results": [{ "value": 1 }, { "value": 2 }] }),
            json!({}),
        ] {
            let err = transform(&body).unwrap_err();
            assert_eq!(err.to_string(), "No pocket price data found.");
        }
    }

    #[test]
    fn test_extra_lists_ignored() {
        let body = json!({ "results": [[], [], [{ "value": 9 }]] });
        let report = transform(&body).unwrap();
        assert!(report.house_data.is_empty());
        assert_eq!(report.price_summary[0].avg_price, None);
    }
}
