//! Development applications grouped by category

use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::error::{CoreError, CoreResult};
use crate::record::{field_text, flatten, objects, rows};
use crate::reports::DevelopmentReport;
use crate::stats::count_by_category;

pub fn transform(body: &Value) -> CoreResult<DevelopmentReport> {
    let results = rows(body, "results")?;
    if results.is_empty() {
        return Err(CoreError::empty(Endpoint::Development));
    }

    let entries = objects(results, "development")?;
    let summary = count_by_category(entries.iter().filter_map(|o| field_text(o, "category")));
    let developments = entries.into_iter().map(|o| flatten(o, ".")).collect();

    Ok(DevelopmentReport { developments, summary })
}
