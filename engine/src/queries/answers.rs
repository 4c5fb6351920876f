// One answer function per catalog question. All are pure reads of the table.
use crate::data::financial_table::FinancialTable;
use crate::error::AnswerError;
use shared::models::Metric;

/// Value of `metric` for `company` in `fiscal_year`.
fn metric_value(
    table: &FinancialTable,
    company: &str,
    fiscal_year: i32,
    metric: Metric,
) -> Result<f64, AnswerError> {
    let record = table.find(company, fiscal_year).ok_or_else(|| AnswerError::LookupMiss {
        company: company.to_string(),
        fiscal_year,
    })?;
    record.value(metric).ok_or_else(|| AnswerError::MissingValue {
        company: company.to_string(),
        fiscal_year,
        metric: metric.display_name(),
    })
}

pub fn microsoft_net_income(table: &FinancialTable, year: i32) -> Result<String, AnswerError> {
    let net_income = metric_value(table, "Microsoft", year, Metric::NetIncome)?;
    Ok(format!("Microsoft's Net Income in Fiscal Year {} is {:.2} million.", year, net_income))
}

pub fn tesla_total_assets(table: &FinancialTable, year: i32) -> Result<String, AnswerError> {
    let total_assets = metric_value(table, "Tesla", year, Metric::TotalAssets)?;
    Ok(format!("Tesla's Total Assets in Fiscal Year {} are {:.2} million.", year, total_assets))
}

pub fn apple_total_revenue(table: &FinancialTable, year: i32) -> Result<String, AnswerError> {
    let total_revenue = metric_value(table, "Apple", year, Metric::TotalRevenue)?;
    Ok(format!("Apple's Total Revenue in Fiscal Year {} is {:.2} million.", year, total_revenue))
}

pub fn tesla_cffo(table: &FinancialTable, year: i32) -> Result<String, AnswerError> {
    let cffo = metric_value(table, "Tesla", year, Metric::Cffo)?;
    Ok(format!(
        "Tesla's Cash Flow from Operations (CFFO) in Fiscal Year {} is {:.2} million.",
        year, cffo
    ))
}

pub fn microsoft_total_liabilities(
    table: &FinancialTable,
    year: i32,
) -> Result<String, AnswerError> {
    let total_liabilities = metric_value(table, "Microsoft", year, Metric::TotalLiabilities)?;
    Ok(format!(
        "Microsoft's Total Liabilities in Fiscal Year {} are {:.2} million.",
        year, total_liabilities
    ))
}

/// ROA on Apple's most recent fiscal year in the table.
pub fn apple_latest_roa(table: &FinancialTable) -> Result<String, AnswerError> {
    let latest = table
        .latest("Apple")
        .ok_or_else(|| AnswerError::CompanyMiss { company: "Apple".to_string() })?;
    let roa = latest.return_on_assets().ok_or_else(|| AnswerError::MissingValue {
        company: "Apple".to_string(),
        fiscal_year: latest.fiscal_year,
        metric: "Return on Assets (ROA)",
    })?;
    Ok(format!(
        "Apple's ROA for the latest fiscal year ({}) is {:.2}%.",
        latest.fiscal_year, roa
    ))
}

/// Sum of every company's revenue for `year`; missing cells are skipped.
pub fn total_revenue_for_year(table: &FinancialTable, year: i32) -> Result<String, AnswerError> {
    let mut records = table.for_year(year).peekable();
    if records.peek().is_none() {
        return Err(AnswerError::YearMiss { fiscal_year: year });
    }
    let total_revenue: f64 = records.filter_map(|r| r.total_revenue).sum();
    Ok(format!("The total revenue for the year {} is {:.2} million.", year, total_revenue))
}
