//! The fixed question catalog.
//!
//! Each literal question maps to a [`Query`] variant; each variant has one
//! pure answer function in [`answers`] that reads the shared table.

pub mod answers;

use crate::data::financial_table::FinancialTable;
use crate::error::AnswerError;

pub const FALLBACK_ANSWER: &str = "Sorry, I can only provide information on predefined queries.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    MicrosoftNetIncome(i32),
    TeslaTotalAssets(i32),
    AppleTotalRevenue(i32),
    TeslaCffo(i32),
    MicrosoftTotalLiabilities(i32),
    AppleLatestRoa,
    TotalRevenueForYear(i32),
}

/// Question text accepted by the form, matched exactly (no trimming or case folding).
pub const PREDEFINED_QUESTIONS: [(&str, Query); 7] = [
    ("What was Microsoft's Net Income in Fiscal Year 2022?", Query::MicrosoftNetIncome(2022)),
    ("What were Tesla's Total Assets in Fiscal Year 2021?", Query::TeslaTotalAssets(2021)),
    ("What was Apple's Total Revenue in Fiscal Year 2023?", Query::AppleTotalRevenue(2023)),
    (
        "What was Tesla's Cash Flow from Operations (CFFO) in Fiscal Year 2022?",
        Query::TeslaCffo(2022),
    ),
    (
        "What were Microsoft's Total Liabilities in Fiscal Year 2021?",
        Query::MicrosoftTotalLiabilities(2021),
    ),
    (
        "What was Apple's Return on Assets (ROA) for the latest fiscal year?",
        Query::AppleLatestRoa,
    ),
    (
        "What was the total revenue across all companies in Fiscal Year 2023?",
        Query::TotalRevenueForYear(2023),
    ),
];

impl Query {
    pub fn from_question(text: &str) -> Option<Query> {
        PREDEFINED_QUESTIONS
            .iter()
            .find(|(question, _)| *question == text)
            .map(|(_, query)| *query)
    }

    pub fn answer(self, table: &FinancialTable) -> Result<String, AnswerError> {
        match self {
            Query::MicrosoftNetIncome(year) => answers::microsoft_net_income(table, year),
            Query::TeslaTotalAssets(year) => answers::tesla_total_assets(table, year),
            Query::AppleTotalRevenue(year) => answers::apple_total_revenue(table, year),
            Query::TeslaCffo(year) => answers::tesla_cffo(table, year),
            Query::MicrosoftTotalLiabilities(year) => {
                answers::microsoft_total_liabilities(table, year)
            }
            Query::AppleLatestRoa => answers::apple_latest_roa(table),
            Query::TotalRevenueForYear(year) => answers::total_revenue_for_year(table, year),
        }
    }
}

/// Answers `question` if it is in the catalog, otherwise returns [`FALLBACK_ANSWER`].
/// Lookup failures are turned into a readable sentence rather than an error.
pub fn answer_question(table: &FinancialTable, question: &str) -> String {
    let Some(query) = Query::from_question(question) else {
        tracing::debug!(question, "Question not in catalog");
        return FALLBACK_ANSWER.to_string();
    };

    match query.answer(table) {
        Ok(answer) => answer,
        Err(e) => {
            tracing::warn!(?query, error = %e, "Could not answer predefined question");
            e.user_message()
        }
    }
}
