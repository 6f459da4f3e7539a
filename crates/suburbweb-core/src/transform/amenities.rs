//! Amenities and their category counts

use serde_json::{Map, Value};

use crate::endpoint::Endpoint;
use crate::error::{CoreError, CoreResult};
use crate::record::{field_text, flatten, objects, rows};
use crate::reports::{AmenitiesReport, AmenityRow};
use crate::stats::count_by_category;

pub const UNNAMED: &str = "(Unnamed)";

pub fn transform(body: &Value) -> CoreResult<AmenitiesReport> {
    let results = rows(body, "results")?;
    if results.is_empty() {
        return Err(CoreError::empty(Endpoint::Amenities));
    }

    let amenities: Vec<AmenityRow> = objects(results, "amenity")?
        .into_iter()
        .map(amenity)
        .collect();

    let summary = count_by_category(amenities.iter().filter_map(|a| a.category.clone()));

    Ok(AmenitiesReport { amenities, summary })
}

fn amenity(object: &Map<String, Value>) -> AmenityRow {
    let name = field_text(object, "name")
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| UNNAMED.to_string());

    AmenityRow {
        name,
        category: field_text(object, "category"),
        fields: flatten(object, "."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unnamed_placeholder() {
        let body = json!({
            "results": [
                { "name": "", "category": "park" },
                { "category": "park" },
                { "name": "   ", "category": "park" },
                { "name": "Lakeside Cafe", "category": "cafe" }
            ]
        });
        let report = transform(&body).unwrap();

        assert_eq!(report.amenities[0].name, UNNAMED);
        assert_eq!(report.amenities[1].name, UNNAMED);
        assert_eq!(report.amenities[2].name, UNNAMED);
        assert_eq!(report.amenities[3].name, "Lakeside Cafe");
        // the source row is kept as received
        assert_eq!(report.amenities[0].fields["name"], "");
    }

    #[test]
    fn test_category_counts_descending_with_encounter_order_ties() {
        let body = json!({
            "results": [
                { "name": "A", "category": "school" },
                { "name": "B", "category": "park" },
                { "name": "C", "category": "park" },
                { "name": "D", "category": "cafe" },
                { "name": "E", "category": "school" },
                { "name": "F", "category": "gym" },
                { "name": "G" }
            ]
        });
        let report = transform(&body).unwrap();
        let counts: Vec<(&str, usize)> = report
            .summary
            .iter()
            .map(|c| (c.category.as_str(), c.count))
            .collect();

        assert_eq!(counts, vec![("school", 2), ("park", 2), ("cafe", 1), ("gym", 1)]);
    }

    #[test]
    fn test_empty_results() {
        let err = transform(&json!({ "results": [] })).unwrap_err();
        assert_eq!(err.to_string(), "No amenities found.");
    }
}
