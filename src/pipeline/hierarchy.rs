use crate::types::WasteRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Name of the composition tree's root node
pub const ROOT_NAME: &str = "Total Waste";

/// One node of the category → material composition tree.
///
/// Leaves carry `value`, internal nodes carry `children`; no node carries
/// both. The tree is plain serializable data with no behavior beyond sums.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<CompositionNode>>,
}

impl CompositionNode {
    fn leaf(name: String, value: f64) -> Self {
        Self {
            name,
            value: Some(value),
            children: None,
        }
    }

    fn branch(name: String, children: Vec<CompositionNode>) -> Self {
        Self {
            name,
            value: None,
            children: Some(children),
        }
    }

    /// Sum of every leaf value under this node
    pub fn total(&self) -> f64 {
        match (&self.value, &self.children) {
            (Some(value), _) => *value,
            (None, Some(children)) => children.iter().map(CompositionNode::total).sum(),
            (None, None) => 0.0,
        }
    }
}

/// Build the treemap composition tree: root "Total Waste" → category →
/// material leaves, each leaf valued at the summed weight of its
/// (category, material) pair.
///
/// Categories appear in first-appearance order of the input. Leaves under
/// each category are sorted descending by value; ties keep the material's
/// first-appearance order. Leaves with value ≤ 0 are dropped. With a year
/// filter, only records from that year contribute; without one, all years
/// aggregate together. Empty input yields the root with no children.
pub fn build_composition(records: &[WasteRecord], year: Option<i32>) -> CompositionNode {
    let mut category_order: Vec<String> = Vec::new();
    let mut material_order: HashMap<String, Vec<String>> = HashMap::new();
    let mut sums: HashMap<(String, String), f64> = HashMap::new();

    let filtered = records
        .iter()
        .filter(|r| year.map_or(true, |y| r.year == y))
        .filter(|r| r.weight > 0.0);

    for record in filtered {
        if !category_order.contains(&record.category) {
            category_order.push(record.category.clone());
        }
        let materials = material_order.entry(record.category.clone()).or_default();
        if !materials.contains(&record.material) {
            materials.push(record.material.clone());
        }
        *sums
            .entry((record.category.clone(), record.material.clone()))
            .or_insert(0.0) += record.weight;
    }

    let children = category_order
        .into_iter()
        .map(|category| {
            let mut leaves: Vec<CompositionNode> = material_order
                .remove(&category)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|material| {
                    let value = sums
                        .get(&(category.clone(), material.clone()))
                        .copied()
                        .unwrap_or(0.0);
                    (value > 0.0).then(|| CompositionNode::leaf(material, value))
                })
                .collect();
            // Stable sort keeps first-appearance order between equal values
            leaves.sort_by(|a, b| b.total().total_cmp(&a.total()));
            CompositionNode::branch(category, leaves)
        })
        .collect();

    CompositionNode::branch(ROOT_NAME.to_string(), children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{COMPOST, LANDFILL, RECYCLING};

    fn record(year: i32, category: &str, material: &str, weight: f64) -> WasteRecord {
        WasteRecord {
            year,
            month: None,
            category: category.to_string(),
            material: material.to_string(),
            weight,
            vendor: String::new(),
            cost: String::new(),
            date_updated: String::new(),
        }
    }

    #[test]
    fn groups_materials_under_their_category() {
        let records = vec![
            record(2024, LANDFILL, "Mixed Trash", 100.0),
            record(2024, RECYCLING, "Cardboard", 40.0),
            record(2024, RECYCLING, "Mixed Paper", 60.0),
        ];
        let tree = build_composition(&records, None);

        assert_eq!(tree.name, ROOT_NAME);
        let categories = tree.children.as_ref().unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, LANDFILL);
        assert_eq!(categories[1].name, RECYCLING);

        let recycling = categories[1].children.as_ref().unwrap();
        // Descending by value
        assert_eq!(recycling[0].name, "Mixed Paper");
        assert_eq!(recycling[0].value, Some(60.0));
        assert_eq!(recycling[1].name, "Cardboard");
    }

    #[test]
    fn same_material_in_same_category_sums_into_one_leaf() {
        let records = vec![
            record(2024, RECYCLING, "Paper", 1000.0),
            record(2024, RECYCLING, "Paper", 500.0),
        ];
        let tree = build_composition(&records, None);
        let recycling = &tree.children.as_ref().unwrap()[0];
        let leaves = recycling.children.as_ref().unwrap();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].value, Some(1500.0));
    }

    #[test]
    fn equal_values_keep_first_appearance_order() {
        let records = vec![
            record(2024, COMPOST, "Yard Waste", 90.0),
            record(2024, COMPOST, "Food Scraps", 90.0),
            record(2024, COMPOST, "Paper Towels", 120.0),
        ];
        let tree = build_composition(&records, None);
        let leaves = tree.children.as_ref().unwrap()[0].children.as_ref().unwrap();
        let names: Vec<&str> = leaves.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Paper Towels", "Yard Waste", "Food Scraps"]);
    }

    #[test]
    fn year_filter_restricts_contributing_records() {
        let records = vec![
            record(2023, LANDFILL, "Mixed Trash", 10.0),
            record(2024, LANDFILL, "Mixed Trash", 25.0),
        ];
        let tree = build_composition(&records, Some(2024));
        assert_eq!(tree.total(), 25.0);

        let unfiltered = build_composition(&records, None);
        assert_eq!(unfiltered.total(), 35.0);
    }

    #[test]
    fn zero_value_leaves_are_dropped() {
        let records = vec![
            record(2024, LANDFILL, "Mixed Trash", 50.0),
            record(2024, LANDFILL, "Ghost", 0.0),
        ];
        let tree = build_composition(&records, None);
        let leaves = tree.children.as_ref().unwrap()[0].children.as_ref().unwrap();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].name, "Mixed Trash");
    }

    #[test]
    fn leaf_sum_matches_record_sum() {
        let records = vec![
            record(2024, LANDFILL, "Mixed Trash", 100.5),
            record(2024, RECYCLING, "Cardboard", 40.25),
            record(2024, COMPOST, "Food Scraps", 9.25),
        ];
        let tree = build_composition(&records, None);
        assert_eq!(tree.total(), 150.0);
    }

    #[test]
    fn empty_input_yields_root_with_no_children() {
        let tree = build_composition(&[], None);
        assert_eq!(tree.name, ROOT_NAME);
        assert_eq!(tree.children.as_deref(), Some(&[][..]));
        assert_eq!(tree.total(), 0.0);
    }
}
