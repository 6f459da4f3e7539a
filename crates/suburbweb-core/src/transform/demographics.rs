//! Age, income and population tables

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::CoreResult;
use crate::record::{field_number, field_text, objects, rows};
use crate::reports::{AgeShare, DemographicsReport, IncomeShare, PopulationPoint};

const PERSONS: &str = "persons";
const TOTAL_AGE: &str = "Total";

/// Missing sub-collections produce empty tables rather than an error
pub fn transform(body: &Value) -> CoreResult<DemographicsReport> {
    let age_summary = objects(rows(body, "age_brackets")?, "age bracket")?
        .into_iter()
        .filter(|o| field_text(o, "gender").as_deref() == Some(PERSONS))
        .filter_map(|o| {
            let age = field_text(o, "age")?;
            (age != TOTAL_AGE).then(|| AgeShare {
                proportion: field_number(o, "proportion"),
                age,
            })
        })
        .collect();

    let income_summary = objects(rows(body, "income")?, "income")?
        .into_iter()
        .filter_map(|o| {
            Some(IncomeShare {
                income_bracket: field_text(o, "income_bracket")?,
                proportion: field_number(o, "proportion"),
            })
        })
        .collect();

    let mut pop_summary: Vec<PopulationPoint> = objects(rows(body, "population")?, "population")?
        .into_iter()
        .filter_map(|o| {
            Some(PopulationPoint {
                date: field_text(o, "date")?,
                value: field_number(o, "value"),
            })
        })
        .collect();
    pop_summary.sort_by(|a, b| date_key(&a.date).cmp(&date_key(&b.date)));

    Ok(DemographicsReport {
        age_summary,
        income_summary,
        pop_summary,
    })
}

/// Parsed dates first in calendar order, anything unparseable after, by text
fn date_key(date: &str) -> (bool, Option<NaiveDate>, &str) {
    let parsed = date
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok());
    (parsed.is_none(), parsed, date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_age_filter() {
        let body = json!({
            "age_brackets": [
                { "age": "0-4", "gender": "persons", "proportion": 0.06 },
                { "age": "0-4", "gender": "male", "proportion": 0.03 },
                { "age": "5-9", "gender": "persons", "proportion": 0.07 },
                { "age": "Total", "gender": "persons", "proportion": 1.0 }
            ]
        });
        let report = transform(&body).unwrap();

        let ages: Vec<&str> = report.age_summary.iter().map(|a| a.age.as_str()).collect();
        assert_eq!(ages, vec!["0-4", "5-9"]);
        assert_eq!(report.age_summary[1].proportion, Some(0.07));
    }

    #[test]
    fn test_income_projection() {
        let body = json!({
            "income": [
                { "income_bracket": "$0-$499", "proportion": 0.21, "area_name": "Belmont North" },
                { "income_bracket": "$500-$999", "proportion": null }
            ]
        });
        let report = transform(&body).unwrap();

        assert_eq!(report.income_summary.len(), 2);
        assert_eq!(report.income_summary[0].income_bracket, "$0-$499");
        assert_eq!(report.income_summary[1].proportion, None);
    }

    #[test]
    fn test_population_sorted_by_date() {
        let body = json!({
            "population": [
                { "date": "2021-06-30", "value": 5100 },
                { "date": "2011-06-30", "value": 4800 },
                { "date": "2016-06-30T00:00:00", "value": 4950 }
            ]
        });
        let report = transform(&body).unwrap();

        let dates: Vec<&str> = report.pop_summary.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["2011-06-30", "2016-06-30T00:00:00", "2021-06-30"]);
        assert_eq!(report.pop_summary[0].value, Some(4800.0));
    }

    #[test]
    fn test_missing_collections_are_empty() {
        let report = transform(&json!({})).unwrap();
        assert!(report.age_summary.is_empty());
        assert!(report.income_summary.is_empty());
        assert!(report.pop_summary.is_empty());

        let report = transform(&json!({ "age_brackets": [], "income": null })).unwrap();
        assert!(report.age_summary.is_empty());
    }

    #[test]
    fn test_non_object_body_is_malformed() {
        assert!(transform(&json!("oops")).is_err());
    }
}
