// The normalized table every request reads from. Built once at startup, never mutated.
use super::csv_parser::CsvLoader;
use super::normalizer::{normalize, NormalizedTable};
use crate::error::EngineError;
use chrono::{DateTime, Utc};
use shared::models::FinancialRecord;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FinancialTable {
    records: Vec<FinancialRecord>,
    source: PathBuf,
    loaded_at: DateTime<Utc>,
    skipped_rows: usize,
}

impl FinancialTable {
    /// Reads and normalizes `path`. Any error here is fatal for startup.
    pub fn load(path: &Path, delimiter: u8) -> Result<Self, EngineError> {
        let raw = CsvLoader::load(path, delimiter)?;
        let normalized = normalize(&raw)?;
        let table = Self::from_normalized(normalized, path);
        tracing::info!(
            path = %path.display(),
            records = table.records.len(),
            skipped_rows = table.skipped_rows,
            "Financial table ready"
        );
        Ok(table)
    }

    pub fn from_normalized(normalized: NormalizedTable, source: impl Into<PathBuf>) -> Self {
        FinancialTable {
            records: normalized.records,
            source: source.into(),
            loaded_at: Utc::now(),
            skipped_rows: normalized.skipped_rows,
        }
    }

    pub fn records(&self) -> &[FinancialRecord] {
        &self.records
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// First record (in source order) for `company` in `fiscal_year`.
    pub fn find(&self, company: &str, fiscal_year: i32) -> Option<&FinancialRecord> {
        self.records
            .iter()
            .find(|r| r.company == company && r.fiscal_year == fiscal_year)
    }

    /// Record for the most recent fiscal year present for `company`.
    pub fn latest(&self, company: &str) -> Option<&FinancialRecord> {
        let latest_year = self
            .records
            .iter()
            .filter(|r| r.company == company)
            .map(|r| r.fiscal_year)
            .max()?;
        self.find(company, latest_year)
    }

    pub fn for_year(&self, fiscal_year: i32) -> impl Iterator<Item = &FinancialRecord> {
        self.records.iter().filter(move |r| r.fiscal_year == fiscal_year)
    }

    /// Distinct company names, sorted.
    pub fn companies(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.records.iter().map(|r| r.company.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
