//! In-memory municipality table, loaded once per session from a
//! `;`-delimited tabular source and immutable afterwards.

use crate::domain::model::Municipality;
use crate::domain::ports::Storage;
use crate::utils::error::{Result, SaudeError};

pub const SOURCE_DELIMITER: u8 = b';';

// Fixed column layout of the source. Remaining columns are ignored.
const COL_CODE: usize = 0;
const COL_NAME: usize = 1;
const COL_REGION_CODE: usize = 2;
const COL_REGION_NAME: usize = 3;
const COL_STATE: usize = 7;
const COL_AREA: usize = 14;

#[derive(Debug, Default)]
pub struct MunicipalStore {
    records: Vec<Municipality>,
}

impl MunicipalStore {
    /// One-time async load through the storage port. Any failure here is
    /// terminal for the session; the caller surfaces it as an error state
    /// instead of retrying.
    pub async fn load<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        tracing::info!("📂 Loading municipality data from {}", path);

        let data = storage
            .read_file(path)
            .await
            .map_err(|e| SaudeError::DataLoadError {
                message: format!("source unreachable: {}", e),
            })?;

        let store = Self::parse(&data)?;
        tracing::info!("✅ Loaded {} municipalities", store.len());
        Ok(store)
    }

    /// Parses the raw tabular source. The first line is a header and is
    /// skipped; an empty or headerless source is a hard error, while a
    /// malformed row only degrades (warn and skip, or default the area).
    pub fn parse(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data).map_err(|e| SaudeError::DataLoadError {
            message: format!("source is not valid UTF-8: {}", e),
        })?;

        if text.trim().is_empty() {
            return Err(SaudeError::DataLoadError {
                message: "source is empty".to_string(),
            });
        }

        let header = text.lines().next().unwrap_or("");
        if !header.contains(SOURCE_DELIMITER as char) {
            return Err(SaudeError::DataLoadError {
                message: "first line is not a delimited header row".to_string(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(SOURCE_DELIMITER)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let line = index + 2;
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!("Skipping unreadable row at line {}: {}", line, e);
                    continue;
                }
            };

            if row.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            match Self::parse_row(&row) {
                Some(municipality) => records.push(municipality),
                None => {
                    tracing::warn!(
                        "Skipping malformed row at line {} ({} fields)",
                        line,
                        row.len()
                    );
                }
            }
        }

        Ok(Self { records })
    }

    fn parse_row(row: &csv::StringRecord) -> Option<Municipality> {
        let code = Self::required_field(row, COL_CODE)?;
        let name = Self::required_field(row, COL_NAME)?;
        let region_code = row.get(COL_REGION_CODE)?.trim().to_string();
        let region_name = row.get(COL_REGION_NAME)?.trim().to_string();
        let state = row.get(COL_STATE)?.trim().to_string();
        let area_km2 = row.get(COL_AREA).map(parse_area).unwrap_or(0.0);

        Some(Municipality {
            code,
            name,
            region_code,
            region_name,
            state,
            area_km2,
            total_evaluations: 0,
            completed_evaluations: 0,
            pending_evaluations: 0,
            avg_score: 0.0,
            last_update: None,
        })
    }

    fn required_field(row: &csv::StringRecord, index: usize) -> Option<String> {
        let value = row.get(index)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Records in source order. Search results and display listings rely on
    /// this order being stable.
    pub fn records(&self) -> &[Municipality] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The source carries Brazilian decimal commas ("8.082,978"); anything that
/// still fails to parse degrades to 0.0 instead of aborting the load.
fn parse_area(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}
