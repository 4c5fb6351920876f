use serde::{Deserialize, Serialize};

/// Header label of the company column.
pub const COMPANY_COLUMN: &str = "Company";
/// Header label of the fiscal year column.
pub const FISCAL_YEAR_COLUMN: &str = "Fiscal Year";

/// One company's figures for one fiscal year, in millions of dollars.
///
/// Every numeric field is `None` when the source cell could not be coerced
/// to a number. Growth fields are derived and are `None` for a company's
/// earliest year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub company: String,
    pub fiscal_year: i32,
    pub total_revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub total_assets: Option<f64>,
    pub total_liabilities: Option<f64>,
    pub cffo: Option<f64>,
    pub revenue_growth_pct: Option<f64>,
    pub net_income_growth_pct: Option<f64>,
}

impl FinancialRecord {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::TotalRevenue => self.total_revenue,
            Metric::NetIncome => self.net_income,
            Metric::TotalAssets => self.total_assets,
            Metric::TotalLiabilities => self.total_liabilities,
            Metric::Cffo => self.cffo,
        }
    }

    /// Return on Assets as a percentage. `None` if either input is missing
    /// or total assets are zero.
    pub fn return_on_assets(&self) -> Option<f64> {
        match (self.net_income, self.total_assets) {
            (Some(income), Some(assets)) if assets != 0.0 => Some(income / assets * 100.0),
            _ => None,
        }
    }
}

/// The five numeric columns of a 10-K summary row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Metric {
    TotalRevenue,
    NetIncome,
    TotalAssets,
    TotalLiabilities,
    Cffo,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::TotalRevenue,
        Metric::NetIncome,
        Metric::TotalAssets,
        Metric::TotalLiabilities,
        Metric::Cffo,
    ];

    /// Header label of this metric's column in the source CSV (after trimming).
    pub fn column(self) -> &'static str {
        match self {
            Metric::TotalRevenue => "Total Revenue($ millions)",
            Metric::NetIncome => "Net Income",
            Metric::TotalAssets => "Total Assets",
            Metric::TotalLiabilities => "Total Liabilities",
            Metric::Cffo => "CFFO",
        }
    }

    /// Name used in answer sentences.
    pub fn display_name(self) -> &'static str {
        match self {
            Metric::TotalRevenue => "Total Revenue",
            Metric::NetIncome => "Net Income",
            Metric::TotalAssets => "Total Assets",
            Metric::TotalLiabilities => "Total Liabilities",
            Metric::Cffo => "Cash Flow from Operations (CFFO)",
        }
    }
}
