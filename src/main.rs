use clap::{Parser, Subcommand};
use tracing::{info, warn};

use waste_pipeline::config::Config;
use waste_pipeline::loader::{self, CsvFileSource, LoadOutcome};
use waste_pipeline::logging;
use waste_pipeline::pipeline::aggregate::YearlyTotals;
use waste_pipeline::pipeline::{series, shapes};

#[derive(Parser)]
#[command(name = "waste_pipeline")]
#[command(about = "Campus waste data pipeline for the sustainability dashboard")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Override the CSV source path from the config
    #[arg(long)]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the source file and report data quality
    Validate,
    /// Print per-year totals, or a monthly drill-down for one year
    Summary {
        /// Year to drill into month by month
        #[arg(long)]
        year: Option<i32>,
    },
    /// Build the dashboard shapes and export them as JSON
    Shapes {
        /// Restrict the treemap and network shapes to one year
        #[arg(long)]
        year: Option<i32>,
        /// How many materials the network shape keeps
        #[arg(long)]
        top: Option<usize>,
    },
}

async fn load_outcome(source_path: &str) -> LoadOutcome {
    println!("🔄 Loading waste records from {source_path}...");
    let source = CsvFileSource::new(source_path);
    let outcome = loader::load_from_source(&source).await;
    if outcome.records.is_empty() {
        println!("⚠️  No data available");
    } else {
        println!(
            "✅ Loaded {} valid records ({} of {} rows excluded)",
            outcome.records.len(),
            outcome.excluded_rows,
            outcome.total_rows
        );
    }
    outcome
}

fn print_validation(outcome: &LoadOutcome) {
    println!("\n📊 Data quality report:");
    println!("   Total rows: {}", outcome.total_rows);
    println!("   Valid records: {}", outcome.records.len());
    println!("   Excluded rows: {}", outcome.excluded_rows);
    if outcome.unknown_categories.is_empty() {
        println!("   Unrecognized categories: none");
    } else {
        println!("⚠️  Unrecognized categories in source data:");
        for category in &outcome.unknown_categories {
            println!("   - {category}");
        }
    }
}

fn print_year_summary(totals: &YearlyTotals) {
    println!("\n📊 Yearly totals (lbs):");
    println!(
        "   {:<6} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Year", "Landfill", "Recycling", "Compost", "Reuse", "Total"
    );
    for entry in series::build_year_series(totals) {
        println!(
            "   {:<6} {:>12.1} {:>12.1} {:>12.1} {:>12.1} {:>12.1}",
            entry.year, entry.landfill, entry.recycling, entry.compost, entry.reuse, entry.total
        );
    }
}

fn print_month_summary(records: &[waste_pipeline::types::WasteRecord], year: i32) {
    let months = series::build_month_series(records, year);
    if months.is_empty() {
        println!("⚠️  No records for {year}");
        return;
    }
    println!("\n📊 Monthly totals for {year} (lbs):");
    println!(
        "   {:<10} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Month", "Landfill", "Recycling", "Compost", "Reuse", "Total"
    );
    for entry in months {
        println!(
            "   {:<10} {:>12.1} {:>12.1} {:>12.1} {:>12.1} {:>12.1}",
            entry.month, entry.landfill, entry.recycling, entry.compost, entry.reuse, entry.total
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            warn!("Using default configuration: {}", e);
            Config::default()
        }
    };
    let source_path = cli.source.unwrap_or_else(|| config.source.path.clone());

    match cli.command {
        Commands::Validate => {
            let outcome = load_outcome(&source_path).await;
            print_validation(&outcome);
        }
        Commands::Summary { year } => {
            let outcome = load_outcome(&source_path).await;
            if outcome.records.is_empty() {
                return Ok(());
            }
            match year {
                Some(year) => print_month_summary(&outcome.records, year),
                None => print_year_summary(&YearlyTotals::aggregate(&outcome.records)),
            }
        }
        Commands::Shapes { year, top } => {
            let outcome = load_outcome(&source_path).await;
            let top = top.unwrap_or(config.shapes.top_materials);

            info!("Building dashboard shapes (year: {:?}, top: {})", year, top);
            println!("🔧 Building dashboard shapes...");
            let bundle = shapes::build_shapes(&outcome.records, year, top);
            println!(
                "✅ Built {} year entries, {} treemap categories, {} graph nodes / {} links",
                bundle.year_series.len(),
                bundle
                    .composition
                    .children
                    .as_ref()
                    .map_or(0, |children| children.len()),
                bundle.flow.nodes.len(),
                bundle.flow.links.len()
            );

            let output_file = shapes::persist_to_json(&bundle, &config.shapes.output_dir)?;
            println!("💾 Saved shapes to {output_file}");
        }
    }

    Ok(())
}
