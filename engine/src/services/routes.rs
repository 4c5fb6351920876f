use super::handlers::{handle_health, handle_index, handle_query, QueryForm};
use crate::data::financial_table::FinancialTable;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, Rejection, Reply};

/// Largest form body accepted by `POST /query`.
const MAX_FORM_BYTES: u64 = 16 * 1024;

pub fn routes(
    table: Arc<FinancialTable>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    // GET /
    let index = warp::path::end().and(warp::get()).map(handle_index);

    // POST /query with form field `query`
    let query = warp::path("query")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_FORM_BYTES))
        .and(warp::body::form::<QueryForm>())
        .and(with_table(table.clone()))
        .map(handle_query);

    // GET /health
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_table(table))
        .map(handle_health);

    index.or(query).or(health).with(warp::trace::request())
}

fn with_table(
    table: Arc<FinancialTable>,
) -> impl Filter<Extract = (Arc<FinancialTable>,), Error = Infallible> + Clone {
    warp::any().map(move || table.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::financial_table::tests::sample_table;
    use crate::queries::{FALLBACK_ANSWER, PREDEFINED_QUESTIONS};
    use crate::services::page::escape_html;
    use warp::http::StatusCode;

    fn test_routes() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
        routes(Arc::new(sample_table()))
    }

    fn form_body(question: &str) -> String {
        let mut body = String::from("query=");
        for byte in question.bytes() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' => {
                    body.push(byte as char)
                }
                b' ' => body.push('+'),
                other => body.push_str(&format!("%{:02X}", other)),
            }
        }
        body
    }

    async fn post_query(body: String) -> (StatusCode, String) {
        let res = warp::test::request()
            .method("POST")
            .path("/query")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(body)
            .reply(&test_routes())
            .await;
        (res.status(), String::from_utf8_lossy(res.body()).into_owned())
    }

    #[tokio::test]
    async fn test_index_page() {
        let res = warp::test::request().method("GET").path("/").reply(&test_routes()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let html = String::from_utf8_lossy(res.body());
        assert!(html.contains("<form action=\"/query\" method=\"post\">"));
        assert!(!html.contains("class=\"response\""));
    }

    #[tokio::test]
    async fn test_query_known_question() {
        let (status, html) = post_query(form_body(PREDEFINED_QUESTIONS[0].0)).await;
        assert_eq!(status, StatusCode::OK);
        let expected = "Microsoft's Net Income in Fiscal Year 2022 is 72738.00 million.";
        assert!(html.contains(&escape_html(expected)));
    }

    #[tokio::test]
    async fn test_query_apple_roa() {
        let question = "What was Apple's Return on Assets (ROA) for the latest fiscal year?";
        let (_, html) = post_query(form_body(question)).await;
        let expected = "Apple's ROA for the latest fiscal year (2023) is 27.51%.";
        assert!(html.contains(&escape_html(expected)));
    }

    #[tokio::test]
    async fn test_query_unknown_question() {
        let (status, html) = post_query(form_body("Who founded Tesla?")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(FALLBACK_ANSWER));
    }

    #[tokio::test]
    async fn test_query_without_field_gets_fallback() {
        let (status, html) = post_query("other=1".to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(FALLBACK_ANSWER));
    }

    #[tokio::test]
    async fn test_get_query_is_not_allowed() {
        let res = warp::test::request().method("GET").path("/query").reply(&test_routes()).await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_health() {
        let res = warp::test::request().method("GET").path("/health").reply(&test_routes()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["records"], 9);
        assert_eq!(json["companies"], serde_json::json!(["Apple", "Microsoft", "Tesla"]));
    }
}
