use crate::constants;
use crate::error::Result;
use crate::types::{RawRow, RecordSource, WasteRecord};
use metrics::counter;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Result of one load pass over the source data.
///
/// `records` holds only the rows that passed validation; the counters and
/// the unrecognized-category list exist so callers can report data quality
/// without re-deriving it.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub records: Vec<WasteRecord>,
    pub total_rows: usize,
    pub excluded_rows: usize,
    pub unknown_categories: Vec<String>,
}

/// CSV file source for waste records
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl RecordSource for CsvFileSource {
    fn source_name(&self) -> &'static str {
        "csv_file"
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRow>> {
        debug!("Reading waste records from {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await?;
        parse_rows(&content)
    }
}

/// Parse CSV content into header-name → cell-value mappings.
/// Blank header names are dropped; rows the CSV reader cannot decode are
/// skipped rather than failing the whole load.
pub fn parse_rows(content: &str) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                debug!("Skipping unreadable CSV row: {}", e);
                continue;
            }
        };

        let mut row = RawRow::new();
        for (i, header) in headers.iter().enumerate() {
            let name = header.trim();
            if name.is_empty() {
                continue;
            }
            row.insert(name.to_string(), record.get(i).unwrap_or("").to_string());
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Parse a localized weight string into pounds.
/// Thousands separators are stripped first; anything unparseable is 0,
/// which fails the validity check downstream.
pub fn parse_weight(raw: &str) -> f64 {
    raw.trim().replace(',', "").parse::<f64>().unwrap_or(0.0)
}

fn field<'a>(row: &'a RawRow, name: &str) -> &'a str {
    row.get(name).map(String::as_str).unwrap_or("")
}

/// Convert one raw row into a validated record.
///
/// A row is invalid when its year does not parse as a whole number, its
/// category is empty, or its weight is not strictly positive.
pub fn record_from_row(row: &RawRow) -> Option<WasteRecord> {
    let year = match field(row, constants::COL_YEAR).trim().parse::<i32>() {
        Ok(year) => year,
        Err(_) => {
            debug!("Dropping row without a parseable year");
            return None;
        }
    };

    let category = constants::canonical_category(field(row, constants::COL_CATEGORY));
    if category.is_empty() {
        debug!("Dropping row with empty category for year {}", year);
        return None;
    }

    let weight = parse_weight(field(row, constants::COL_WEIGHT));
    if weight <= 0.0 {
        debug!("Dropping zero-weight {} row for year {}", category, year);
        return None;
    }

    let month = match field(row, constants::COL_MONTH).trim() {
        "" => None,
        label => Some(label.to_string()),
    };

    Some(WasteRecord {
        year,
        month,
        category,
        material: field(row, constants::COL_MATERIAL).trim().to_string(),
        weight,
        vendor: field(row, constants::COL_VENDOR).to_string(),
        cost: field(row, constants::COL_COST).to_string(),
        date_updated: field(row, constants::COL_DATE_UPDATED).to_string(),
    })
}

/// Validate and canonicalize a sequence of raw rows, preserving source order.
pub fn collect_records(rows: &[RawRow]) -> LoadOutcome {
    let mut records = Vec::with_capacity(rows.len());
    let mut unknown_categories: Vec<String> = Vec::new();

    for row in rows {
        if let Some(record) = record_from_row(row) {
            if !constants::is_canonical_category(&record.category)
                && !unknown_categories.contains(&record.category)
            {
                warn!("Unrecognized waste category in source data: {}", record.category);
                unknown_categories.push(record.category.clone());
            }
            records.push(record);
        }
    }

    let excluded_rows = rows.len() - records.len();
    LoadOutcome {
        records,
        total_rows: rows.len(),
        excluded_rows,
        unknown_categories,
    }
}

/// Parse raw CSV content straight through to validated records.
pub fn parse_csv(content: &str) -> Result<LoadOutcome> {
    let rows = parse_rows(content)?;
    Ok(collect_records(&rows))
}

/// Load and validate every record a source can produce.
///
/// This is the pipeline's terminal load path: a source that cannot be read
/// degrades to an empty outcome instead of surfacing an error, and callers
/// treat the empty record set as a first-class "no data" state.
pub async fn load_from_source(source: &dyn RecordSource) -> LoadOutcome {
    let source_name = source.source_name();
    match source.fetch_rows().await {
        Ok(rows) => {
            let outcome = collect_records(&rows);
            counter!("waste_rows_read_total", "source" => source_name)
                .increment(outcome.total_rows as u64);
            counter!("waste_rows_excluded_total", "source" => source_name)
                .increment(outcome.excluded_rows as u64);
            counter!("waste_unknown_categories_total", "source" => source_name)
                .increment(outcome.unknown_categories.len() as u64);
            info!(
                "Loaded {} valid records from {} ({} of {} rows excluded)",
                outcome.records.len(),
                source_name,
                outcome.excluded_rows,
                outcome.total_rows
            );
            outcome
        }
        Err(e) => {
            error!("Failed to load waste data from {}: {}", source_name, e);
            LoadOutcome::default()
        }
    }
}

/// Load validated records from a CSV file on disk.
pub async fn load_records(path: impl AsRef<Path>) -> Vec<WasteRecord> {
    let source = CsvFileSource::new(path.as_ref());
    load_from_source(&source).await.records
}
