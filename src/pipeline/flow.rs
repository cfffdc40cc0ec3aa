use crate::types::WasteRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Which side of the bipartite material → category graph a node sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Material,
    Category,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    /// Index of this node in `FlowGraph::nodes`, assigned in
    /// first-appearance order of the name in the input
    pub id: usize,
    pub name: String,
    pub kind: NodeKind,
}

/// Weighted edge from a material node to a category node, referencing
/// node indices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowLink {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// The material → category network the flow view consumes.
///
/// Bipartite by construction: links always run material → category, so
/// there are no cycles and no self-loops.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowLink>,
}

impl FlowGraph {
    /// Sum of all link weights
    pub fn total_weight(&self) -> f64 {
        self.links.iter().map(|link| link.weight).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

struct GraphAccumulator {
    nodes: Vec<FlowNode>,
    links: Vec<FlowLink>,
    // Name → index maps keep node/link identity lookups O(1)
    node_index: HashMap<(NodeKind, String), usize>,
    link_index: HashMap<(usize, usize), usize>,
}

impl GraphAccumulator {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            node_index: HashMap::new(),
            link_index: HashMap::new(),
        }
    }

    fn node_id(&mut self, name: &str, kind: NodeKind) -> usize {
        if let Some(&id) = self.node_index.get(&(kind, name.to_string())) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(FlowNode {
            id,
            name: name.to_string(),
            kind,
        });
        self.node_index.insert((kind, name.to_string()), id);
        id
    }

    fn add_flow(&mut self, material: &str, category: &str, weight: f64) {
        let source = self.node_id(material, NodeKind::Material);
        let target = self.node_id(category, NodeKind::Category);
        match self.link_index.get(&(source, target)) {
            Some(&i) => self.links[i].weight += weight,
            None => {
                self.link_index.insert((source, target), self.links.len());
                self.links.push(FlowLink {
                    source,
                    target,
                    weight,
                });
            }
        }
    }

    fn finish(self) -> FlowGraph {
        FlowGraph {
            nodes: self.nodes,
            links: self.links,
        }
    }
}

fn build_graph<'a>(records: impl Iterator<Item = &'a WasteRecord>) -> FlowGraph {
    let mut graph = GraphAccumulator::new();
    for record in records {
        graph.add_flow(&record.material, &record.category, record.weight);
    }
    graph.finish()
}

/// Build the full material → category flow graph.
///
/// One node per distinct material and per distinct category, one link per
/// distinct (material, category) pair with the summed weight. Node and
/// link order is first-appearance order of the input, so repeated calls on
/// identical input produce identical index assignments. Records with
/// non-positive weight contribute nothing.
pub fn build_flow_graph(records: &[WasteRecord], year: Option<i32>) -> FlowGraph {
    build_graph(
        records
            .iter()
            .filter(|r| year.map_or(true, |y| r.year == y))
            .filter(|r| r.weight > 0.0),
    )
}

/// Build the flow graph restricted to the heaviest `top` materials.
///
/// Materials are ranked by total weight across all categories, descending,
/// with ties keeping first-appearance order. Only records for the surviving
/// materials enter the graph.
pub fn build_top_material_graph(
    records: &[WasteRecord],
    year: Option<i32>,
    top: usize,
) -> FlowGraph {
    let filtered: Vec<&WasteRecord> = records
        .iter()
        .filter(|r| year.map_or(true, |y| r.year == y))
        .filter(|r| r.weight > 0.0)
        .collect();

    let mut material_order: Vec<&str> = Vec::new();
    let mut material_totals: HashMap<&str, f64> = HashMap::new();
    for record in &filtered {
        let material = record.material.as_str();
        if !material_totals.contains_key(material) {
            material_order.push(material);
        }
        *material_totals.entry(material).or_insert(0.0) += record.weight;
    }

    // Stable sort keeps first-appearance order between equal totals
    material_order.sort_by(|a, b| material_totals[b].total_cmp(&material_totals[a]));
    material_order.truncate(top);

    build_graph(
        filtered
            .into_iter()
            .filter(|r| material_order.contains(&r.material.as_str())),
    )
}
