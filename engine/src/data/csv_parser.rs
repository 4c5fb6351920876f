use crate::error::EngineError;
use csv::{ReaderBuilder, StringRecord};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// A delimited file as read from disk: header labels plus text cells, in source order.
/// Labels are kept verbatim; trimming is the normalizer's job.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Parses delimited text with a header row.
    ///
    /// Rows with fewer fields than the header are padded with empty cells and
    /// extra trailing fields are dropped, so one ragged row does not abort the load.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, EngineError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        Self::validate_headers(&headers)?;
        let width = headers.len();

        let mut rows = Vec::new();
        for (idx, result) in rdr.byte_records().enumerate() {
            let record = result?;
            if record.len() != width {
                tracing::warn!(
                    line = idx + 2,
                    expected = width,
                    found = record.len(),
                    "Row field count differs from header; padding/truncating"
                );
            }
            let mut row: Vec<String> = record
                .iter()
                .take(width)
                .map(|field| Self::decode_cell(field, idx + 2))
                .collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        Ok(RawTable {
            headers: headers.iter().map(str::to_string).collect(),
            rows,
        })
    }

    // Undecodable bytes become U+FFFD, so the cell later fails numeric coercion
    // instead of failing the whole load.
    fn decode_cell(field: &[u8], line: usize) -> String {
        match String::from_utf8_lossy(field) {
            Cow::Borrowed(text) => text.to_string(),
            Cow::Owned(text) => {
                tracing::warn!(
                    line,
                    cell = %text,
                    "Cell is not valid UTF-8; undecodable bytes replaced"
                );
                text
            }
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    fn validate_headers(headers: &StringRecord) -> Result<(), EngineError> {
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(EngineError::Parse("header row is missing or empty".to_string()));
        }
        if let Some(pos) = headers.iter().position(|h| h.trim().is_empty()) {
            return Err(EngineError::Parse(format!(
                "header column {} has a blank label",
                pos + 1
            )));
        }
        Ok(())
    }
}

pub struct CsvLoader;

impl CsvLoader {
    // Header: Company,Fiscal Year,Total Revenue($ millions),Net Income,
    //         Total Assets,Total Liabilities,CFFO
    // Example row: Microsoft,2022,"198,270","72,738","364,840","198,298","89,035"
    pub fn load(file_path: &Path, delimiter: u8) -> Result<RawTable, EngineError> {
        let file = File::open(file_path).map_err(|source| EngineError::FileAccess {
            path: file_path.to_path_buf(),
            source,
        })?;
        let table = RawTable::from_reader(BufReader::new(file), delimiter)?;
        tracing::debug!(
            path = %file_path.display(),
            rows = table.rows.len(),
            "Loaded raw CSV table"
        );
        Ok(table)
    }
}
