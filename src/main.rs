use std::path::Path;

use analysis::{chart, load, report};
use anyhow::Result;
use log::info;

const OUTPUT_DIR: &str = "data/processed/http";

fn main() -> Result<()> {
    pretty_env_logger::init();
    let with_stats = std::env::args().skip(1).any(|arg| arg == "--stats");

    let document = load::load_results(load::RAW_RESULTS_PATH)?;
    let usage = load::load_usage(load::RAW_USAGE_PATH)?;

    let output_dir = Path::new(OUTPUT_DIR);
    std::fs::create_dir_all(output_dir)
        .map_err(|e| anyhow::format_err!("failed to create {OUTPUT_DIR} - {e}"))?;

    info!("Rendering charts..");
    chart::render_latency(&document.results, output_dir)
        .map_err(|e| anyhow::format_err!("failed to render latency chart - {e}"))?;
    chart::render_cpu(&usage, output_dir)
        .map_err(|e| anyhow::format_err!("failed to render cpu chart - {e}"))?;
    chart::render_memory(&usage, output_dir)
        .map_err(|e| anyhow::format_err!("failed to render memory chart - {e}"))?;
    chart::render_throughput(&document.results, output_dir)
        .map_err(|e| anyhow::format_err!("failed to render throughput chart - {e}"))?;

    if with_stats {
        let summary = report::summarize(&document, &usage);
        report::write_report(&summary, output_dir)?;
    }

    println!("Charts saved to: {OUTPUT_DIR}");
    Ok(())
}
