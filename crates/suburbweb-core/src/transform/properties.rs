//! For-sale listings

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::endpoint::Endpoint;
use crate::error::{CoreError, CoreResult};
use crate::record::{field_number, field_text, flatten, objects, rows};
use crate::reports::{PropertiesReport, PropertyListing, TypePriceSummary};
use crate::stats::{mean, median, mode};

const ADDRESS_PARTS: [&str; 3] = ["address.street", "address.sal", "address.state"];

pub fn transform(body: &Value) -> CoreResult<PropertiesReport> {
    let results = rows(body, "results")?;
    if results.is_empty() {
        return Err(CoreError::empty(Endpoint::Properties));
    }

    let listings: Vec<PropertyListing> = objects(results, "property")?
        .into_iter()
        .map(listing)
        .collect();

    let prices: Vec<f64> = listings.iter().filter_map(|l| l.price).collect();
    let bedrooms: Vec<f64> = listings.iter().filter_map(|l| l.bedrooms).collect();

    Ok(PropertiesReport {
        avg_price: mean(&prices),
        median_bedrooms: median(&bedrooms),
        common_type: mode(listings.iter().filter_map(|l| l.property_type.as_deref())),
        summary: price_by_type(&listings),
        listings,
    })
}

fn listing(object: &Map<String, Value>) -> PropertyListing {
    let fields = flatten(object, ".");

    let address = ADDRESS_PARTS
        .iter()
        .filter_map(|key| field_text(&fields, key))
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    PropertyListing {
        address,
        price: field_number(&fields, "price"),
        property_type: field_text(&fields, "property_type"),
        bedrooms: field_number(&fields, "attributes.bedrooms"),
        bathrooms: field_number(&fields, "attributes.bathrooms"),
        garage_spaces: field_number(&fields, "attributes.garage_spaces"),
        listing_date: field_text(&fields, "listing_date"),
        fields,
    }
}

/// Mean price per property type, ordered by type name
fn price_by_type(listings: &[PropertyListing]) -> Vec<TypePriceSummary> {
    let mut groups: BTreeMap<&str, (Vec<f64>, usize)> = BTreeMap::new();
    for l in listings {
        if let Some(property_type) = l.property_type.as_deref() {
            let entry = groups.entry(property_type).or_default();
            entry.1 += 1;
            if let Some(price) = l.price {
                entry.0.push(price);
            }
        }
    }

    groups
        .into_iter()
        .map(|(property_type, (prices, count))| TypePriceSummary {
            property_type: property_type.to_string(),
            avg_price: mean(&prices),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "results": [
                {
                    "address": { "street": "12 Lake St", "sal": "Belmont North", "state": "NSW" },
                    "attributes": { "bedrooms": 3, "bathrooms": 1, "garage_spaces": 1 },
                    "price": 100,
                    "property_type": "House",
                    "listing_date": "2025-09-01"
                },
                {
                    "address": { "street": "4 Hill Rd", "sal": "Belmont North", "state": "NSW" },
                    "attributes": { "bedrooms": 4 },
                    "price": "200",
                    "property_type": "House"
                },
                {
                    "address": { "street": "7/2 Beach Pde", "sal": "Belmont North", "state": "NSW" },
                    "attributes": { "bedrooms": 2 },
                    "price": 300.0,
                    "property_type": "Unit"
                }
            ]
        })
    }

    #[test]
    fn test_summary_values() {
        let report = transform(&sample()).unwrap();

        assert_eq!(report.avg_price, Some(200.0));
        assert_eq!(report.common_type.as_deref(), Some("House"));
        assert_eq!(report.median_bedrooms, Some(3.0));

        assert_eq!(report.summary.len(), 2);
        assert_eq!(report.summary[0].property_type, "House");
        assert_eq!(report.summary[0].avg_price, Some(150.0));
        assert_eq!(report.summary[0].count, 2);
        assert_eq!(report.summary[1].property_type, "Unit");
        assert_eq!(report.summary[1].avg_price, Some(300.0));
    }

    #[test]
    fn test_listing_flattening() {
        let report = transform(&sample()).unwrap();
        let first = &report.listings[0];

        assert_eq!(first.address, "12 Lake St, Belmont North, NSW");
        assert_eq!(first.price, Some(100.0));
        assert_eq!(first.bathrooms, Some(1.0));
        assert_eq!(first.listing_date.as_deref(), Some("2025-09-01"));
        assert_eq!(first.fields["attributes.garage_spaces"], 1);
        assert_eq!(report.listings[1].price, Some(200.0));
    }

    #[test]
    fn test_missing_price_is_excluded_from_mean() {
        let body = json!({
            "results": [
                { "price": 400000, "property_type": "House" },
                { "price": "Contact agent", "property_type": "House" },
                { "price": null, "property_type": "Unit" }
            ]
        });
        let report = transform(&body).unwrap();

        assert_eq!(report.avg_price, Some(400000.0));
        assert_eq!(report.median_bedrooms, None);
        assert_eq!(report.summary[0].avg_price, Some(400000.0));
        assert_eq!(report.summary[0].count, 2);
        assert_eq!(report.summary[1].avg_price, None);
        assert_eq!(report.listings[0].address, "");
    }

    #[test]
    fn test_even_bedroom_count_median() {
        let body = json!({
            "results": [
                { "attributes": { "bedrooms": 2 } },
                { "attributes": { "bedrooms": 3 } }
            ]
        });
        let report = transform(&body).unwrap();
        assert_eq!(report.median_bedrooms, Some(2.5));
        assert_eq!(report.common_type, None);
        assert!(report.summary.is_empty());
    }

    #[test]
    fn test_empty_results() {
        for body in [json!({ "results": [] }), json!({})] {
            match transform(&body) {
                Err(err) => assert_eq!(err.to_string(), "No properties found."),
                Ok(report) => panic!("expected error, got {:?}", report),
            }
        }
    }

    #[test]
    fn test_malformed_rows() {
        let body = json!({ "results": ["not a listing"] });
        assert!(matches!(transform(&body), Err(CoreError::MalformedResponse { .. })));
    }
}
