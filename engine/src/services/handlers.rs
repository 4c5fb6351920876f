// Request handlers. The table is shared read-only, so handlers never lock.
use super::page::render_index;
use crate::data::financial_table::FinancialTable;
use crate::queries::answer_question;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use warp::Reply;

#[derive(Debug, Deserialize)]
pub struct QueryForm {
    /// Absent field is treated like an unrecognised question.
    #[serde(default)]
    pub query: String,
}

pub fn handle_index() -> impl Reply {
    warp::reply::html(render_index(None))
}

pub fn handle_query(form: QueryForm, table: Arc<FinancialTable>) -> impl Reply {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("query", %request_id);
    let _guard = span.enter();

    tracing::info!(query = %form.query, "Received question");
    let response = answer_question(&table, &form.query);
    tracing::debug!(%response, "Answered question");

    warp::reply::html(render_index(Some(&response)))
}

pub fn handle_health(table: Arc<FinancialTable>) -> impl Reply {
    warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "records": table.records().len(),
        "skipped_rows": table.skipped_rows(),
        "companies": table.companies(),
        "source": table.source().display().to_string(),
        "loaded_at": table.loaded_at().to_rfc3339(),
    }))
}
