//! HTML for each report kind
//!
//! Every interpolated value passes through `escape_html`. Numbers are rounded
//! here, never in the reports: prices to whole dollars, growth to 2 places,
//! proportions to 3 places.

use serde_json::Value;
use suburbweb_core::record::Record;
use suburbweb_core::reports::*;
use suburbweb_core::{Report, ReportOutcome};
use suburbweb_utils::{escape_html, format_price, format_rounded};

const MISSING: &str = "-";

fn price(value: Option<f64>) -> String {
    value.map(format_price).unwrap_or_else(|| MISSING.to_string())
}

fn growth(value: Option<f64>) -> String {
    value.map(|v| format_rounded(v, 2)).unwrap_or_else(|| MISSING.to_string())
}

fn proportion(value: Option<f64>) -> String {
    value.map(|v| format_rounded(v, 3)).unwrap_or_else(|| MISSING.to_string())
}

/// Counts such as bedrooms; a median may land on .5
fn count(value: Option<f64>) -> String {
    value.map(|v| format_rounded(v, 1)).unwrap_or_else(|| MISSING.to_string())
}

/// Whole part only, so a median of 2.5 bedrooms reads as 2
fn whole(value: Option<f64>) -> String {
    value.map(|v| format_rounded(v.trunc(), 0)).unwrap_or_else(|| MISSING.to_string())
}

fn text(value: Option<&str>) -> String {
    escape_html(value.unwrap_or(MISSING))
}

/// Escaped display text for a JSON cell
fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => escape_html(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => escape_html(&other.to_string()),
    }
}

/// Table from escaped cells
fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let head: String = headers
        .iter()
        .map(|h| format!("<th class='px-3 py-2 text-left font-medium text-gray-600'>{}</th>", escape_html(h)))
        .collect();
    let body: String = rows
        .into_iter()
        .map(|row| {
            let cells: String = row
                .into_iter()
                .map(|c| format!("<td class='px-3 py-2'>{}</td>", c))
                .collect();
            format!("<tr class='border-t'>{}</tr>", cells)
        })
        .collect();

    format!(
        "<div class='overflow-x-auto'><table class='min-w-full text-sm'><thead class='bg-gray-50'><tr>{}</tr></thead><tbody>{}</tbody></table></div>",
        head, body
    )
}

/// Table over records whose columns are the union of their keys, first-seen order
fn record_table(records: &[Record]) -> String {
    let mut columns: Vec<&str> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key.as_str());
            }
        }
    }

    let rows = records
        .iter()
        .map(|r| {
            columns
                .iter()
                .map(|c| r.get(*c).map(cell).unwrap_or_default())
                .collect::<Vec<_>>()
        })
        .collect();
    table(&columns, rows)
}

fn card(title: &str, content: &str) -> String {
    format!(
        "<div class='bg-white rounded-xl shadow-sm p-6 mb-6'><h3 class='text-lg font-semibold mb-4'>{}</h3>{}</div>",
        escape_html(title),
        content
    )
}

fn stat(label: &str, value: &str) -> String {
    format!(
        "<div class='bg-indigo-50 p-4 rounded-lg border border-indigo-200'><p class='text-sm text-indigo-600'>{}</p><p class='text-2xl font-bold text-indigo-700'>{}</p></div>",
        escape_html(label),
        value
    )
}

fn category_table(summary: &[CategoryCount]) -> String {
    let rows = summary
        .iter()
        .map(|c| vec![escape_html(&c.category), c.count.to_string()])
        .collect();
    table(&["Category", "Count"], rows)
}

/// Error text in place of data
pub fn render_error(message: &str) -> String {
    format!(
        "<div class='bg-red-50 border border-red-200 text-red-700 rounded-lg p-4 mb-6'>{}</div>",
        escape_html(message)
    )
}

/// Report body for an outcome
pub fn render_report(outcome: &ReportOutcome) -> String {
    let heading = format!(
        "<div class='mb-6'><h2 class='text-2xl font-bold'>{} in {}</h2><p class='text-sm text-gray-500'>Fetched {}</p></div>",
        escape_html(&outcome.label),
        escape_html(&outcome.suburb),
        outcome.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let body = match &outcome.report {
        Report::Properties(r) => properties(r),
        Report::Schools(r) => schools(r),
        Report::Amenities(r) => amenities(r),
        Report::Demographics(r) => demographics(r),
        Report::Development(r) => development(r),
        Report::Ethnicity(r) => ethnicity(r),
        Report::Pocket(r) => pocket(r),
        Report::Raw(v) => raw(v),
    };

    heading + &body
}

fn properties(report: &PropertiesReport) -> String {
    let stats = format!(
        "<div class='grid grid-cols-1 md:grid-cols-3 gap-4 mb-6'>{}{}{}</div>",
        stat("Average price", &price(report.avg_price)),
        stat("Median bedrooms", &whole(report.median_bedrooms)),
        stat("Most common type", &text(report.common_type.as_deref())),
    );

    let by_type = report
        .summary
        .iter()
        .map(|s| {
            vec![
                escape_html(&s.property_type),
                price(s.avg_price),
                s.count.to_string(),
            ]
        })
        .collect();

    let listings = report
        .listings
        .iter()
        .map(|l| {
            vec![
                escape_html(&l.address),
                price(l.price),
                text(l.property_type.as_deref()),
                count(l.bedrooms),
                count(l.bathrooms),
                count(l.garage_spaces),
                text(l.listing_date.as_deref()),
            ]
        })
        .collect();

    stats
        + &card("Average price by type", &table(&["Property type", "Average price", "Listings"], by_type))
        + &card(
            "Listings",
            &table(&["Address", "Price", "Type", "Beds", "Baths", "Garage", "Listed"], listings),
        )
}

fn schools(report: &SchoolsReport) -> String {
    let rows = report
        .schools
        .iter()
        .map(|s| {
            vec![
                escape_html(&s.name),
                cell(&s.school_level_type),
                cell(&s.school_sector_type),
                cell(&s.gender),
                cell(&s.attendance_rate),
                cell(&s.naplan),
                cell(&s.naplan_rank),
                cell(&s.socioeconomic_rank),
            ]
        })
        .collect();

    card(
        "Schools",
        &table(
            &["Name", "Level", "Sector", "Gender", "Attendance", "NAPLAN", "NAPLAN rank", "Socio-economic rank"],
            rows,
        ),
    )
}

fn amenities(report: &AmenitiesReport) -> String {
    let rows = report
        .amenities
        .iter()
        .map(|a| vec![escape_html(&a.name), text(a.category.as_deref())])
        .collect();

    card("By category", &category_table(&report.summary)) + &card("Amenities", &table(&["Name", "Category"], rows))
}

fn demographics(report: &DemographicsReport) -> String {
    let ages = report
        .age_summary
        .iter()
        .map(|a| vec![escape_html(&a.age), proportion(a.proportion)])
        .collect();
    let incomes = report
        .income_summary
        .iter()
        .map(|i| vec![escape_html(&i.income_bracket), proportion(i.proportion)])
        .collect();
    let population = report
        .pop_summary
        .iter()
        .map(|p| vec![escape_html(&p.date), count(p.value)])
        .collect();

    card("Age", &table(&["Age", "Proportion"], ages))
        + &card("Income", &table(&["Income bracket", "Proportion"], incomes))
        + &card("Population", &table(&["Date", "Population"], population))
}

fn development(report: &DevelopmentReport) -> String {
    card("By category", &category_table(&report.summary))
        + &card("Applications", &record_table(&report.developments))
}

fn ethnicity(report: &EthnicityReport) -> String {
    let rows = report
        .ethnicity_data
        .iter()
        .map(|e| vec![escape_html(&e.ethnicity), proportion(Some(e.proportion))])
        .collect();
    card("Ethnicity", &table(&["Ethnicity", "Proportion"], rows))
}

fn pocket(report: &PocketReport) -> String {
    let summary = report
        .price_summary
        .iter()
        .map(|s| vec![escape_html(&s.property_type), price(s.avg_price), growth(s.avg_growth)])
        .collect();

    card("Summary", &table(&["Type", "Average price", "Average growth"], summary))
        + &card("Houses", &record_table(&report.house_data))
        + &card("Units", &record_table(&report.unit_data))
}

fn raw(value: &Value) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    card(
        "Raw response",
        &format!("<pre class='text-xs bg-gray-100 p-4 rounded overflow-x-auto'>{}</pre>", escape_html(&pretty)),
    )
}
