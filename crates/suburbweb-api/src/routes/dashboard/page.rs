//! Dashboard page rendering - Full page and HTMX partial endpoints

use crate::AppState;
use axum::extract::{Form, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use suburbweb_core::{DashboardQuery, EndpointOption, MAX_SUBURB_LEN};
use suburbweb_utils::escape_html;

use super::view::{render_error, render_report};

/// GET / with optional `suburb` and `endpoint` query parameters
pub async fn page_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Response {
    render_dashboard(&state, &headers, query).await
}

/// POST / with a form-encoded `suburb` and `endpoint`
pub async fn page_dashboard_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(query): Form<DashboardQuery>,
) -> Response {
    render_dashboard(&state, &headers, query).await
}

async fn render_dashboard(state: &AppState, headers: &HeaderMap, query: DashboardQuery) -> Response {
    let (suburb, endpoint) = state.dashboard.effective_inputs(&query);
    let options = state.dashboard.router().options();

    // htmx drops 4xx bodies, so its swaps always get 200
    let (status, body) = match state.dashboard.run(&query).await {
        Ok(outcome) => (StatusCode::OK, render_report(&outcome)),
        Err(err) if err.is_validation() && !crate::is_htmx_request(headers) => {
            (StatusCode::BAD_REQUEST, render_error(&err.to_string()))
        }
        Err(err) => (StatusCode::OK, render_error(&err.to_string())),
    };

    let inner_content = format!(
        "{}{}{}",
        search_form(&suburb, &endpoint, &options),
        endpoint_tabs(&suburb, &endpoint, &options),
        body
    );

    (status, Html(crate::page_response(headers, "Dashboard", &inner_content))).into_response()
}

fn search_form(suburb: &str, endpoint: &str, options: &[EndpointOption]) -> String {
    let selected = endpoint.to_lowercase();
    let choices: String = options
        .iter()
        .map(|o| {
            format!(
                "<option value='{}'{}>{}</option>",
                escape_html(&o.key),
                if o.key == selected { " selected" } else { "" },
                escape_html(&o.label)
            )
        })
        .collect();

    format!(
        r#"<form method='post' action='/' hx-post='/' hx-target='#content' class='bg-white rounded-xl shadow-sm p-6 mb-6 flex flex-wrap gap-4 items-end'>
    <label class='flex-1'><span class='block text-sm text-gray-600 mb-1'>Suburb</span>
        <input type='text' name='suburb' value='{}' maxlength='{}' class='w-full border rounded-lg px-3 py-2'></label>
    <label><span class='block text-sm text-gray-600 mb-1'>Category</span>
        <select name='endpoint' class='border rounded-lg px-3 py-2'>{}</select></label>
    <button type='submit' class='bg-indigo-600 text-white rounded-lg px-4 py-2'>Search</button>
    <span class='htmx-indicator text-sm text-gray-500'>Loading...</span>
</form>"#,
        escape_html(suburb),
        MAX_SUBURB_LEN,
        choices
    )
}

fn endpoint_tabs(suburb: &str, endpoint: &str, options: &[EndpointOption]) -> String {
    let selected = endpoint.to_lowercase();
    let tabs: String = options
        .iter()
        .map(|o| {
            let href = format!(
                "/?suburb={}&endpoint={}",
                urlencoding::encode(suburb),
                urlencoding::encode(&o.key)
            );
            let class = if o.key == selected {
                "bg-indigo-50 text-indigo-600"
            } else {
                "text-gray-600 hover:bg-gray-100"
            };
            format!(
                "<a href='{0}' hx-get='{0}' hx-target='#content' hx-push-url='true' class='px-3 py-2 rounded-lg {1}'>{2}</a>",
                escape_html(&href),
                class,
                escape_html(&o.label)
            )
        })
        .collect();

    format!("<nav class='flex flex-wrap gap-2 mb-6'>{}</nav>", tabs)
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;
    use suburbweb_client::ClientError;

    #[tokio::test]
    async fn test_default_page_fetches_properties() {
        let (router, api) = app(|resource| {
            assert_eq!(resource, "properties");
            Ok(json!({ "results": [{ "price": 650000, "property_type": "Unit" }] }))
        });

        let (status, body) = get(router, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(calls(&api), 1);
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("value='Belmont North'"));
        assert!(body.contains("<option value='properties' selected>"));
        assert!(body.contains("$650,000"));
    }

    #[tokio::test]
    async fn test_form_post() {
        let (router, _) = app(|resource| {
            assert_eq!(resource, "amenity");
            Ok(json!({ "results": [{ "name": "Lake Park", "category": "park" }] }))
        });

        let request = Request::post("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("suburb=Windale&endpoint=amenities"))
            .unwrap();
        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Amenities in Windale"));
        assert!(body.contains("Lake Park"));
    }

    #[tokio::test]
    async fn test_unknown_endpoint_is_bad_request() {
        let (router, api) = app(|_| Ok(json!({})));

        let (status, body) = get(router, "/?suburb=Windale&endpoint=weather").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(calls(&api), 0);
        assert!(body.contains("Unknown endpoint: &#39;weather&#39;"));
    }

    #[tokio::test]
    async fn test_fetch_error_shown_in_place_of_data() {
        let (router, _) = app(|_| Err(ClientError::Status { status: 500, body: String::new() }));

        let (status, body) = get(router, "/?endpoint=schools").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Error fetching data: data service returned 500"));
        assert!(!body.contains("<table"));
    }

    #[tokio::test]
    async fn test_empty_result_message() {
        let (router, _) = app(|_| Ok(json!({ "results": [] })));
        let (_, body) = get(router, "/?endpoint=development").await;
        assert!(body.contains("No development data found."));
    }

    #[tokio::test]
    async fn test_tabs_keep_suburb_and_escape_input() {
        let (router, _) = app(|_| Ok(json!({ "results": [] })));

        let (_, body) = get(router, "/?suburb=%3Cb%3EMerewether%20Heights&endpoint=schools").await;
        assert!(body.contains("value='&lt;b&gt;Merewether Heights'"));
        assert!(body.contains("/?suburb=%3Cb%3EMerewether%20Heights&amp;endpoint=pocket"));
        assert!(!body.contains("<b>Merewether"));
    }

    #[tokio::test]
    async fn test_htmx_form_shows_invalid_suburb() {
        let (router, api) = app(|_| Ok(json!({ "results": [] })));

        let request = Request::post("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("hx-request", "true")
            .body(Body::from(format!("suburb={}&endpoint=schools", "x".repeat(101))))
            .unwrap();
        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(calls(&api), 0);
        assert!(body.starts_with("<form"));
        assert!(body.contains("Invalid suburb"));
        assert!(body.contains("maxlength='100'"));
    }

    #[tokio::test]
    async fn test_plain_form_invalid_suburb_is_bad_request() {
        let (router, _) = app(|_| Ok(json!({ "results": [] })));

        let request = Request::post("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("suburb={}&endpoint=schools", "x".repeat(101))))
            .unwrap();
        let (status, body) = send(router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Invalid suburb"));
    }

    #[tokio::test]
    async fn test_htmx_request_gets_partial() {
        let (router, _) = app(|_| Ok(json!({ "results": [] })));
        let request = Request::get("/?endpoint=schools")
            .header("hx-request", "true")
            .body(Body::empty())
            .unwrap();
        let (_, body) = send(router, request).await;
        assert!(body.starts_with("<form"));
    }
}
