// Renders the single HTML page from the bundled template.
use crate::queries::PREDEFINED_QUESTIONS;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// The form page, with `response` shown below it when present.
pub fn render_index(response: Option<&str>) -> String {
    let questions: String = PREDEFINED_QUESTIONS
        .iter()
        .map(|(question, _)| format!("            <option value=\"{}\">\n", escape_html(question)))
        .collect();
    let response_block = match response {
        Some(text) => format!("    <div class=\"response\"><p>{}</p></div>\n", escape_html(text)),
        None => String::new(),
    };

    INDEX_TEMPLATE
        .replace("{{questions}}\n", &questions)
        .replace("{{response}}\n", &response_block)
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
