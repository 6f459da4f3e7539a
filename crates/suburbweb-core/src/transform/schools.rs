//! Schools projected onto a fixed set of columns

use serde_json::{Map, Value};

use crate::endpoint::Endpoint;
use crate::error::{CoreError, CoreResult};
use crate::record::{field_text, objects, rows};
use crate::reports::{SchoolRow, SchoolsReport};

pub fn transform(body: &Value) -> CoreResult<SchoolsReport> {
    let results = rows(body, "results")?;
    if results.is_empty() {
        return Err(CoreError::empty(Endpoint::Schools));
    }

    let schools = objects(results, "school")?
        .into_iter()
        .map(project)
        .collect();

    Ok(SchoolsReport { schools })
}

fn project(object: &Map<String, Value>) -> SchoolRow {
    let column = |key: &str| object.get(key).cloned().unwrap_or(Value::Null);

    SchoolRow {
        name: field_text(object, "name").unwrap_or_default(),
        school_level_type: column("school_level_type"),
        school_sector_type: column("school_sector_type"),
        gender: column("gender"),
        attendance_rate: column("attendance_rate"),
        naplan: column("naplan"),
        naplan_rank: column("naplan_rank"),
        socioeconomic_rank: column("socioeconomic_rank"),
    }
}
