// Turns a raw 10-K summary table into typed records with year-over-year growth.
use super::csv_parser::RawTable;
use crate::error::EngineError;
use shared::models::{FinancialRecord, Metric, COMPANY_COLUMN, FISCAL_YEAR_COLUMN};
use shared::utils::number_format::{coerce_decimal, parse_year, pct_change};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    /// Records in source row order.
    pub records: Vec<FinancialRecord>,
    /// Rows dropped because their fiscal year could not be parsed.
    pub skipped_rows: usize,
}

struct ColumnIndexes {
    company: usize,
    fiscal_year: usize,
    metrics: [usize; 5],
}

impl ColumnIndexes {
    fn resolve(headers: &[String]) -> Result<Self, EngineError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| EngineError::MissingColumn(name.to_string()))
        };
        let mut metrics = [0; 5];
        for (slot, metric) in metrics.iter_mut().zip(Metric::ALL) {
            *slot = find(metric.column())?;
        }
        Ok(ColumnIndexes {
            company: find(COMPANY_COLUMN)?,
            fiscal_year: find(FISCAL_YEAR_COLUMN)?,
            metrics,
        })
    }
}

/// Cleans `raw` into a new table; `raw` itself is left untouched.
///
/// Unparseable numeric cells become missing. Growth is computed per company
/// over records sorted by fiscal year (stable, so duplicate years keep source order).
pub fn normalize(raw: &RawTable) -> Result<NormalizedTable, EngineError> {
    let headers: Vec<String> = raw.headers.iter().map(|h| h.trim().to_string()).collect();
    let columns = ColumnIndexes::resolve(&headers)?;

    let mut records = Vec::with_capacity(raw.rows.len());
    let mut skipped_rows = 0;

    for (idx, row) in raw.rows.iter().enumerate() {
        let cell = |pos: usize| row.get(pos).map(String::as_str).unwrap_or("");

        let fiscal_year = match parse_year(cell(columns.fiscal_year)) {
            Ok(year) => year,
            Err(e) => {
                tracing::warn!(
                    line = idx + 2,
                    error = %e,
                    "Skipping row without a usable fiscal year"
                );
                skipped_rows += 1;
                continue;
            }
        };

        let [revenue, income, assets, liabilities, cffo] = columns.metrics.map(|pos| {
            let value = coerce_decimal(cell(pos));
            if value.is_none() && !cell(pos).trim().is_empty() {
                tracing::debug!(
                    line = idx + 2,
                    cell = cell(pos),
                    "Numeric cell coerced to missing"
                );
            }
            value
        });

        records.push(FinancialRecord {
            company: cell(columns.company).trim().to_string(),
            fiscal_year,
            total_revenue: revenue,
            net_income: income,
            total_assets: assets,
            total_liabilities: liabilities,
            cffo,
            revenue_growth_pct: None,
            net_income_growth_pct: None,
        });
    }

    apply_growth(&mut records);

    Ok(NormalizedTable { records, skipped_rows })
}

fn apply_growth(records: &mut [FinancialRecord]) {
    let mut by_company: HashMap<&str, Vec<usize>> = HashMap::new();
    for (pos, record) in records.iter().enumerate() {
        by_company.entry(record.company.as_str()).or_default().push(pos);
    }

    let mut growth: Vec<(usize, Option<f64>, Option<f64>)> = Vec::new();
    for mut positions in by_company.into_values() {
        positions.sort_by_key(|&pos| records[pos].fiscal_year);
        for pair in positions.windows(2) {
            let (prev, cur) = (&records[pair[0]], &records[pair[1]]);
            growth.push((
                pair[1],
                pct_change(prev.total_revenue, cur.total_revenue),
                pct_change(prev.net_income, cur.net_income),
            ));
        }
    }

    for (pos, revenue_growth, income_growth) in growth {
        records[pos].revenue_growth_pct = revenue_growth;
        records[pos].net_income_growth_pct = income_growth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Company,Fiscal Year,Total Revenue($ millions),Net Income,\
                          Total Assets,Total Liabilities,CFFO";

    fn raw(body: &str) -> RawTable {
        RawTable::from_reader(format!("{}\n{}", HEADER, body).as_bytes(), b',').unwrap()
    }

    #[test]
    fn test_strips_thousands_separators() {
        let table = normalize(&raw("Microsoft,2022,\"1,234.5\",\"72,738\",1,2,3")).unwrap();
        let record = &table.records[0];
        assert_eq!(record.total_revenue, Some(1234.5));
        assert_eq!(record.net_income, Some(72738.0));
        assert_eq!(record.cffo, Some(3.0));
    }

    #[test]
    fn test_unparseable_cells_become_missing() {
        let table = normalize(&raw("Tesla,2021,N/A,,abc,\"1,0x\",5")).unwrap();
        let record = &table.records[0];
        assert_eq!(record.total_revenue, None);
        assert_eq!(record.net_income, None);
        assert_eq!(record.total_assets, None);
        assert_eq!(record.total_liabilities, None);
        assert_eq!(record.cffo, Some(5.0));
    }

    #[test]
    fn test_header_labels_are_trimmed() {
        let text = " Company ,Fiscal Year , Total Revenue($ millions),Net Income,\
                    Total Assets,Total Liabilities,CFFO \nApple ,2023,1,2,3,4,5";
        let table = normalize(&RawTable::from_reader(text.as_bytes(), b',').unwrap()).unwrap();
        assert_eq!(table.records[0].company, "Apple");
        assert_eq!(table.records[0].cffo, Some(5.0));
    }

    #[test]
    fn test_missing_column_is_reported() {
        let text = "Company,Fiscal Year,Net Income\nApple,2023,1";
        let result = normalize(&RawTable::from_reader(text.as_bytes(), b',').unwrap());
        match result {
            Err(EngineError::MissingColumn(name)) => assert_eq!(name, "Total Revenue($ millions)"),
            other => panic!("expected missing column, got {:?}", other),
        }
    }

    #[test]
    fn test_revenue_growth_first_year_missing() {
        let table = normalize(&raw("Acme,2021,100,50,1,1,1\nAcme,2022,110,40,1,1,1")).unwrap();
        assert_eq!(table.records[0].revenue_growth_pct, None);
        assert_eq!(table.records[0].net_income_growth_pct, None);
        let growth = table.records[1].revenue_growth_pct.unwrap();
        assert_eq!(format!("{:.2}", growth), "10.00");
        let income_growth = table.records[1].net_income_growth_pct.unwrap();
        assert!((income_growth + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_growth_is_per_company() {
        let table = normalize(&raw(
            "Acme,2021,100,1,1,1,1\nGlobex,2021,500,1,1,1,1\nAcme,2022,150,1,1,1,1",
        ))
        .unwrap();
        assert_eq!(table.records[1].revenue_growth_pct, None);
        assert!((table.records[2].revenue_growth_pct.unwrap() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_growth_follows_fiscal_year_not_row_order() {
        let table = normalize(&raw(
            "Acme,2023,121,1,1,1,1\nAcme,2021,100,1,1,1,1\nAcme,2022,110,1,1,1,1",
        ))
        .unwrap();
        // Source order is preserved in the output.
        let years: Vec<i32> = table.records.iter().map(|r| r.fiscal_year).collect();
        assert_eq!(years, vec![2023, 2021, 2022]);
        assert!((table.records[0].revenue_growth_pct.unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(table.records[1].revenue_growth_pct, None);
        assert!((table.records[2].revenue_growth_pct.unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_or_missing_previous_gives_missing_growth() {
        let table = normalize(&raw("Acme,2020,0,N/A,1,1,1\nAcme,2021,100,10,1,1,1")).unwrap();
        assert_eq!(table.records[1].revenue_growth_pct, None);
        assert_eq!(table.records[1].net_income_growth_pct, None);
    }

    #[test]
    fn test_float_formatted_year_is_kept() {
        let table =
            normalize(&raw("Microsoft,2021.0,100,1,1,1,1\nMicrosoft,2022.0,1,72738,1,1,1"))
                .unwrap();
        assert_eq!(table.skipped_rows, 0);
        let years: Vec<i32> = table.records.iter().map(|r| r.fiscal_year).collect();
        assert_eq!(years, vec![2021, 2022]);
        assert_eq!(table.records[1].net_income, Some(72738.0));
    }

    #[test]
    fn test_fractional_year_skips_row() {
        let table = normalize(&raw("Acme,2022.5,100,1,1,1,1")).unwrap();
        assert_eq!(table.skipped_rows, 1);
        assert!(table.records.is_empty());
    }

    #[test]
    fn test_undecodable_cell_becomes_missing() {
        let mut bytes =
            format!("{}\nMicrosoft,2022,1,72738,1,1,1\nTesla,2021,1,", HEADER).into_bytes();
        bytes.push(0xFF);
        bytes.extend_from_slice(b",1,1,1\n");
        let table = normalize(&RawTable::from_reader(&bytes[..], b',').unwrap()).unwrap();
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0].net_income, Some(72738.0));
        assert_eq!(table.records[1].company, "Tesla");
        assert_eq!(table.records[1].net_income, None);
        assert_eq!(table.records[1].cffo, Some(1.0));
    }

    #[test]
    fn test_unparseable_year_skips_row() {
        let table = normalize(&raw("Acme,FY21,100,1,1,1,1\nAcme,2022,110,1,1,1,1")).unwrap();
        assert_eq!(table.skipped_rows, 1);
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].revenue_growth_pct, None);
    }

    #[test]
    fn test_normalize_is_repeatable_and_leaves_input_alone() {
        let input = raw(
            "Acme,2021,\"1,000\",1,1,1,1\nAcme,2022,N/A,2,1,1,1\nAcme,2023,\"1,500\",3,1,1,1",
        );
        let before = input.clone();
        let first = normalize(&input).unwrap();
        let second = normalize(&input).unwrap();
        assert_eq!(input, before);
        assert_eq!(first, second);
        for (a, b) in first.records.iter().zip(&second.records) {
            assert_eq!(
                a.net_income_growth_pct.map(f64::to_bits),
                b.net_income_growth_pct.map(f64::to_bits)
            );
        }
    }
}
