use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw source row as a header-name → cell-value mapping
pub type RawRow = HashMap<String, String>;

/// One validated row of source waste data.
///
/// Records are immutable once parsed; every pipeline stage derives fresh
/// structures from a record slice instead of mutating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteRecord {
    pub year: i32,
    /// Month label as written in the source, kept for sub-aggregation only
    pub month: Option<String>,
    /// Canonicalized category label (see `constants::canonical_category`)
    pub category: String,
    pub material: String,
    /// Weight in pounds, always > 0 for a valid record
    pub weight: f64,
    pub vendor: String,
    pub cost: String,
    pub date_updated: String,
}

/// Core trait that all waste-data sources must implement
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// Unique identifier for this source
    fn source_name(&self) -> &'static str;

    /// Fetch all raw rows from this data source
    async fn fetch_rows(&self) -> Result<Vec<RawRow>>;
}
