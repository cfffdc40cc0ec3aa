/// Category and column name constants to ensure consistency across the pipeline.
/// Every stage that touches a category label goes through `canonical_category`
/// rather than spelling its own alias rules.

// Canonical waste stream categories
pub const LANDFILL: &str = "Landfill";
pub const RECYCLING: &str = "Recycling";
pub const COMPOST: &str = "Compost";
pub const REUSE: &str = "Reuse";

// The source data writes the recycling stream as "Recycle"
pub const RECYCLE_SOURCE_LABEL: &str = "Recycle";

pub const CANONICAL_CATEGORIES: [&str; 4] = [LANDFILL, RECYCLING, COMPOST, REUSE];

// Column headers of the source CSV
pub const COL_YEAR: &str = "Year";
pub const COL_MONTH: &str = "Month";
pub const COL_CATEGORY: &str = "Category";
pub const COL_MATERIAL: &str = "Material Type";
pub const COL_WEIGHT: &str = "Weight (lbs)";
pub const COL_VENDOR: &str = "Vendor";
pub const COL_COST: &str = "Cost";
pub const COL_DATE_UPDATED: &str = "Date Updated";

/// Convert a source category label to its canonical name.
/// Unknown labels pass through unchanged; they surface as their own
/// category downstream and are flagged by the loader.
pub fn canonical_category(raw: &str) -> String {
    match raw.trim() {
        RECYCLE_SOURCE_LABEL => RECYCLING.to_string(),
        other => other.to_string(),
    }
}

/// Whether a normalized label is one of the four canonical categories.
pub fn is_canonical_category(name: &str) -> bool {
    CANONICAL_CATEGORIES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recycle_maps_to_recycling() {
        assert_eq!(canonical_category("Recycle"), RECYCLING);
        assert_eq!(canonical_category(" Recycle "), RECYCLING);
    }

    #[test]
    fn canonical_labels_pass_through() {
        for name in CANONICAL_CATEGORIES {
            assert_eq!(canonical_category(name), name);
        }
    }

    #[test]
    fn unknown_labels_pass_through_unchanged() {
        assert_eq!(canonical_category("Hazardous"), "Hazardous");
        assert!(!is_canonical_category("Hazardous"));
    }
}
