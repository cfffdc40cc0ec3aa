use crate::error::Result;
use crate::pipeline::aggregate::YearlyTotals;
use crate::pipeline::flow::{self, FlowGraph};
use crate::pipeline::hierarchy::{self, CompositionNode};
use crate::pipeline::series::{self, YearTotal};
use crate::types::WasteRecord;
use chrono::Utc;
use metrics::histogram;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// The three dashboard shapes bundled for one export pass.
///
/// `year_series` always spans every year in the record set; the treemap
/// and network shapes honor the year filter. Everything here is plain
/// serializable data the presentation layer consumes as-is.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardShapes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub year_series: Vec<YearTotal>,
    pub composition: CompositionNode,
    pub flow: FlowGraph,
}

/// Build all three dashboard shapes from one validated record set.
///
/// Each builder stays independently callable; this just runs them over the
/// same input. `top` caps how many materials the network shape keeps.
pub fn build_shapes(records: &[WasteRecord], year: Option<i32>, top: usize) -> DashboardShapes {
    let t_build = std::time::Instant::now();

    let year_series = series::build_year_series(&YearlyTotals::aggregate(records));
    let composition = hierarchy::build_composition(records, year);
    let flow = flow::build_top_material_graph(records, year, top);

    histogram!("waste_shapes_build_duration_seconds").record(t_build.elapsed().as_secs_f64());

    DashboardShapes {
        year,
        year_series,
        composition,
        flow,
    }
}

/// Persist a shapes bundle to a timestamped JSON file under `output_dir`.
pub fn persist_to_json(shapes: &DashboardShapes, output_dir: &str) -> Result<String> {
    fs::create_dir_all(output_dir)?;

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    let filename = match shapes.year {
        Some(year) => format!("shapes_{year}_{timestamp}.json"),
        None => format!("shapes_all_{timestamp}.json"),
    };
    let filepath = Path::new(output_dir).join(&filename);

    let json_content = serde_json::to_string_pretty(shapes)?;
    fs::write(&filepath, json_content)?;
    info!("Saved dashboard shapes to {}", filepath.display());

    Ok(filepath.to_string_lossy().to_string())
}
