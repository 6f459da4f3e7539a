//! Mean share per ethnic group across the areas returned

use serde_json::Value;
use std::collections::HashMap;

use crate::endpoint::Endpoint;
use crate::error::{CoreError, CoreResult};
use crate::record::{flatten, number, objects, rows};
use crate::reports::{EthnicityReport, EthnicityShare};
use crate::stats::mean;

const PREFIX: &str = "ethnicity_";

pub fn transform(body: &Value) -> CoreResult<EthnicityReport> {
    let results = rows(body, "results")?;
    if results.is_empty() {
        return Err(CoreError::empty(Endpoint::Ethnicity));
    }

    // columns in first-seen order across all areas
    let mut columns: Vec<(String, Vec<f64>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for area in objects(results, "ethnicity")? {
        for (key, value) in flatten(area, "_") {
            if !key.starts_with(PREFIX) {
                continue;
            }
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                columns.push((key, Vec::new()));
                columns.len() - 1
            });
            if let Some(v) = number(&value) {
                columns[slot].1.push(v);
            }
        }
    }

    let mut ethnicity_data: Vec<EthnicityShare> = columns
        .into_iter()
        .filter_map(|(key, values)| {
            Some(EthnicityShare {
                proportion: mean(&values)?,
                ethnicity: key.strip_prefix(PREFIX).unwrap_or(&key).to_string(),
            })
        })
        .collect();
    ethnicity_data.sort_by(|a, b| b.proportion.total_cmp(&a.proportion));

    Ok(EthnicityReport { ethnicity_data })
}
