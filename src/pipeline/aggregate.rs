use crate::constants;
use crate::types::WasteRecord;
use std::collections::BTreeMap;

/// Per-category weight sums for one grouping bucket (a year or a month).
///
/// Always carries the four canonical categories, 0.0 when absent, so no
/// consumer ever has to treat a missing key as zero. Labels outside the
/// canonical set are kept too; they show up as their own category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotals {
    totals: BTreeMap<String, f64>,
}

impl Default for CategoryTotals {
    fn default() -> Self {
        let totals = constants::CANONICAL_CATEGORIES
            .iter()
            .map(|name| (name.to_string(), 0.0))
            .collect();
        Self { totals }
    }
}

impl CategoryTotals {
    pub fn add(&mut self, category: &str, weight: f64) {
        *self.totals.entry(category.to_string()).or_insert(0.0) += weight;
    }

    /// Summed weight for a category, 0.0 when nothing was recorded
    pub fn get(&self, category: &str) -> f64 {
        self.totals.get(category).copied().unwrap_or(0.0)
    }

    /// Sum over every category present, canonical or not
    pub fn total(&self) -> f64 {
        self.totals.values().sum()
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(name, weight)| (name.as_str(), *weight))
    }
}

/// Year → per-category weight sums over a validated record set.
///
/// The single aggregation path in the pipeline: the time-series builder and
/// any reporting surface consume this instead of re-deriving sums.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearlyTotals {
    years: BTreeMap<i32, CategoryTotals>,
}

impl YearlyTotals {
    pub fn aggregate(records: &[WasteRecord]) -> Self {
        let mut years: BTreeMap<i32, CategoryTotals> = BTreeMap::new();
        for record in records {
            years
                .entry(record.year)
                .or_default()
                .add(&record.category, record.weight);
        }
        Self { years }
    }

    pub fn for_year(&self, year: i32) -> Option<&CategoryTotals> {
        self.years.get(&year)
    }

    /// Distinct years present in the input, ascending
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    /// (year, totals) pairs, ascending by year
    pub fn iter(&self) -> impl Iterator<Item = (i32, &CategoryTotals)> {
        self.years.iter().map(|(year, totals)| (*year, totals))
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}
