use crate::constants::{COMPOST, LANDFILL, RECYCLING, REUSE};
use crate::pipeline::aggregate::{CategoryTotals, YearlyTotals};
use crate::types::WasteRecord;
use chrono::Month;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// One year's totals in the shape the time-series chart consumes.
/// `total` covers every category, so it matches the sum of all valid
/// record weights for the year even when an off-list category appears.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearTotal {
    pub year: i32,
    pub landfill: f64,
    pub recycling: f64,
    pub compost: f64,
    pub reuse: f64,
    pub total: f64,
}

/// Monthly totals within a single year, for the stream chart's drill-down.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    pub month: String,
    pub landfill: f64,
    pub recycling: f64,
    pub compost: f64,
    pub reuse: f64,
    pub total: f64,
}

fn from_totals(totals: &CategoryTotals) -> (f64, f64, f64, f64, f64) {
    (
        totals.get(LANDFILL),
        totals.get(RECYCLING),
        totals.get(COMPOST),
        totals.get(REUSE),
        totals.total(),
    )
}

/// Build the ordered per-year series from the aggregator's output.
///
/// One entry per distinct year present, ascending. Years with no records
/// are absent rather than synthesized with all-zero totals.
pub fn build_year_series(totals: &YearlyTotals) -> Vec<YearTotal> {
    totals
        .iter()
        .map(|(year, category_totals)| {
            let (landfill, recycling, compost, reuse, total) = from_totals(category_totals);
            YearTotal {
                year,
                landfill,
                recycling,
                compost,
                reuse,
                total,
            }
        })
        .collect()
}

/// Build per-month totals for one year, January through December.
///
/// Month labels are accepted as full names or three-letter abbreviations;
/// rows with a missing or unparseable month are left out of the series.
pub fn build_month_series(records: &[WasteRecord], year: i32) -> Vec<MonthTotal> {
    let mut months: BTreeMap<u32, (Month, CategoryTotals)> = BTreeMap::new();

    for record in records.iter().filter(|r| r.year == year) {
        let label = match record.month.as_deref() {
            Some(label) if !label.trim().is_empty() => label.trim(),
            _ => continue,
        };
        let month = match label.parse::<Month>() {
            Ok(month) => month,
            Err(_) => {
                debug!("Skipping unrecognized month label: {}", label);
                continue;
            }
        };
        let entry = months
            .entry(month.number_from_month())
            .or_insert_with(|| (month, CategoryTotals::default()));
        entry.1.add(&record.category, record.weight);
    }

    months
        .into_values()
        .map(|(month, category_totals)| {
            let (landfill, recycling, compost, reuse, total) = from_totals(&category_totals);
            MonthTotal {
                month: month.name().to_string(),
                landfill,
                recycling,
                compost,
                reuse,
                total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, month: Option<&str>, category: &str, weight: f64) -> WasteRecord {
        WasteRecord {
            year,
            month: month.map(|m| m.to_string()),
            category: category.to_string(),
            material: "Mixed".to_string(),
            weight,
            vendor: String::new(),
            cost: String::new(),
            date_updated: String::new(),
        }
    }

    #[test]
    fn year_series_is_ascending_with_no_synthesized_years() {
        let records = vec![
            record(2024, None, LANDFILL, 100.0),
            record(2021, None, RECYCLING, 50.0),
        ];
        let series = build_year_series(&YearlyTotals::aggregate(&records));

        let years: Vec<i32> = series.iter().map(|t| t.year).collect();
        assert_eq!(years, vec![2021, 2024]);
        assert_eq!(series[0].recycling, 50.0);
        assert_eq!(series[0].total, 50.0);
        assert_eq!(series[1].landfill, 100.0);
    }

    #[test]
    fn year_total_matches_record_sum() {
        let records = vec![
            record(2023, None, LANDFILL, 10.0),
            record(2023, None, COMPOST, 20.0),
            record(2023, None, REUSE, 5.0),
        ];
        let series = build_year_series(&YearlyTotals::aggregate(&records));
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].total, 35.0);
    }

    #[test]
    fn month_series_orders_january_to_december() {
        let records = vec![
            record(2023, Some("March"), LANDFILL, 30.0),
            record(2023, Some("Jan"), LANDFILL, 10.0),
            record(2023, Some("February"), RECYCLING, 20.0),
            record(2023, Some("Jan"), COMPOST, 5.0),
        ];
        let series = build_month_series(&records, 2023);

        let months: Vec<&str> = series.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["January", "February", "March"]);
        assert_eq!(series[0].landfill, 10.0);
        assert_eq!(series[0].compost, 5.0);
        assert_eq!(series[0].total, 15.0);
    }

    #[test]
    fn month_series_skips_other_years_and_bad_labels() {
        let records = vec![
            record(2023, Some("April"), LANDFILL, 10.0),
            record(2022, Some("April"), LANDFILL, 99.0),
            record(2023, Some("Q2"), LANDFILL, 7.0),
            record(2023, None, LANDFILL, 3.0),
        ];
        let series = build_month_series(&records, 2023);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].month, "April");
        assert_eq!(series[0].landfill, 10.0);
    }

    #[test]
    fn empty_input_yields_empty_series() {
        assert!(build_year_series(&YearlyTotals::aggregate(&[])).is_empty());
        assert!(build_month_series(&[], 2023).is_empty());
    }
}
