// Entry point and high-level flow.
//
// The binary loads the two shipment datasets, computes every report view, and
// hands each result to the file sink, one deck slot at a time:
// - slot 2: top shipment destinations, plus the heat map data series
// - slot 3: yearly exports table and chart
// - slot 4: HS code export breakdown
// - slot 5: yearly and monthly import trends with both chart series
// - slot 6: 2-digit HS import categories, historical and trailing 12 months
// - slots 7/8: top consignees, historical and trailing 12 months
// - slot 9: recent shipments listing
mod config;
mod error;
mod loader;
mod lookup;
mod output;
mod ranked;
mod reports;
mod timefill;
mod types;
mod util;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use config::ReportConfig;
use lookup::HsLookup;
use output::DeckSink;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Builds a trade-shipment report deck from export/import CSV data")]
struct Args {
    /// Export CSV; defaults to the first `*China_Exports*.csv` in the
    /// working directory.
    #[arg(long)]
    exports: Option<PathBuf>,

    /// Import CSV; defaults to the first `*US_Imports*.csv` in the working
    /// directory.
    #[arg(long)]
    imports: Option<PathBuf>,

    /// HS code description lookup CSV.
    #[arg(long)]
    hs_lookup: Option<PathBuf>,

    /// Directory the slot files are written to.
    #[arg(long, default_value = "deck_out")]
    out_dir: PathBuf,

    /// Reference date for the trailing windows (YYYY-MM-DD); defaults to
    /// today. The yearly import extrapolation and the 12-month cutoff both
    /// key off this.
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

/// Find a CSV in the working directory whose filename contains `token`.
fn discover_csv(token: &str) -> Option<PathBuf> {
    let entries = std::fs::read_dir(".").ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if path.is_file() && name.contains(token) && name.ends_with(".csv") {
            return Some(path);
        }
    }
    None
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    let exports_path = args
        .exports
        .or_else(|| discover_csv("China_Exports"))
        .context("no export CSV given and no *China_Exports*.csv found")?;
    let imports_path = args
        .imports
        .or_else(|| discover_csv("US_Imports"))
        .context("no import CSV given and no *US_Imports*.csv found")?;

    let exports = loader::load_exports(&exports_path)?;
    let imports = loader::load_imports(&imports_path)?;
    let hs_lookup = HsLookup::load(args.hs_lookup.as_deref())?;
    let imports_12 = reports::trailing_twelve_months(&imports, as_of);
    info!(rows = imports_12.len(), "trailing 12-month import subset");

    let cfg = ReportConfig::default();
    let mut sink = DeckSink::new(&args.out_dir)?;

    // slot 2: destinations
    let destinations = reports::shipment_destinations(&exports, &cfg.destinations);
    sink.table(2, "shipment_destinations", &destinations)?;
    sink.sentence(2, "exports_summary", &reports::exports_summary_sentence(&exports));
    sink.table(2, "destination_map", &reports::destination_totals(&exports))?;
    println!("Top Shipment Destinations");
    output::preview_table(&destinations, 12);

    // slot 3: yearly exports
    let yearly_exports = reports::yearly_exports(&exports, &cfg.yearly_exports, as_of);
    sink.table(3, "yearly_exports", &yearly_exports)?;
    sink.sentence(3, "hs_exports_summary", &reports::hs_exports_summary_sentence(&exports));
    sink.chart(
        3,
        "yearly_exports",
        &reports::yearly_exports_chart(&exports, &cfg.yearly_exports, as_of),
    )?;
    println!("Yearly Exports (Total vs US)");
    output::preview_table(&yearly_exports, 6);

    // slot 4: HS exports
    let hs_exports = reports::hs_exports(&exports, &cfg.hs_exports);
    sink.table(4, "hs_exports", &hs_exports)?;
    sink.sentence(4, "hs_exports_summary", &reports::hs_exports_summary_sentence(&exports));
    println!("Exports by HS Code");
    output::preview_table(&hs_exports, 7);

    // slot 5: import trends, yearly and monthly
    let yearly_imports = reports::yearly_imports(&imports, &cfg.yearly_imports, as_of);
    sink.table(5, "yearly_imports", &yearly_imports)?;
    sink.sentence(5, "yearly_imports_summary", &reports::yearly_imports_summary_sentence(&imports));
    sink.chart(5, "yearly_imports", &reports::yearly_imports_chart(&yearly_imports))?;
    let monthly_imports = reports::monthly_imports(&imports_12, &cfg.monthly_imports, as_of);
    sink.chart(5, "monthly_imports", &reports::monthly_imports_chart(&monthly_imports))?;
    println!("Yearly Imports (current year extrapolated)");
    output::preview_table(&yearly_imports, 7);

    // slot 6: HS import categories
    let hs_imports =
        reports::hs_imports_with_trailing(&imports, &imports_12, &hs_lookup, &cfg.hs_imports);
    sink.table(6, "hs_imports", &hs_imports)?;
    sink.sentence(6, "hs_imports_summary", &reports::hs_imports_summary_sentence(&imports));
    println!("Imports by HS Category");
    output::preview_table(&hs_imports, 7);

    // slots 7 and 8: consignees, historical then trailing 12 months
    let consignees = reports::consignees_imports(&imports, &cfg.consignees);
    sink.table(7, "consignees_imports", &consignees)?;
    sink.sentence(7, "consignees_summary", &reports::consignees_summary_sentence(&imports));
    let consignees_12 = reports::consignees_imports(&imports_12, &cfg.consignees);
    sink.table(8, "consignees_imports_12", &consignees_12)?;
    sink.sentence(8, "consignees_12_summary", &reports::consignees_12_summary_sentence(&imports_12));
    println!("Top Consignees");
    output::preview_table(&consignees, 12);

    // slot 9: recent shipments
    let recent = reports::recent_shipments(&imports, cfg.recent_shipments);
    sink.table(9, "recent_shipments", &recent)?;
    println!("Recent Shipments");
    output::preview_table(&recent, 10);

    let manifest = sink.finish()?;
    info!(file = %manifest.display(), "wrote sentence manifest");
    println!("Deck data written to {}", args.out_dir.display());
    Ok(())
}
