use std::fs;
use std::path::Path;

use anyhow::Result;
use log::info;

use crate::{ResultsDocument, UsageSample};

/// Whole-run summary statistics. Off by default; computed only when the run
/// was started with `--stats`.
#[derive(Debug)]
pub struct RunSummary {
    pub throughput_rps: f64,
    pub payload_size_bytes: i64,
    pub mean_latency_ms: f64,
    pub max_latency_ms: i64,
    pub min_latency_ms: i64,
    pub mean_cpu: f64,
    pub mean_memory_mb: f64,
}

pub fn summarize(document: &ResultsDocument, usage: &[UsageSample]) -> RunSummary {
    let results = &document.results;
    let latencies: Vec<i64> = results.iter().map(|r| r.latency_ms()).collect();

    let start = results.iter().map(|r| r.start_time).min().unwrap_or(0);
    let end = results.iter().map(|r| r.end_time).max().unwrap_or(0);
    let duration_ms = end - start;
    let throughput_rps = if duration_ms > 0 {
        results.len() as f64 / duration_ms as f64 * 1000.0
    } else {
        0.0
    };

    RunSummary {
        throughput_rps,
        payload_size_bytes: document.payload_size_bytes,
        mean_latency_ms: mean(latencies.iter().map(|&l| l as f64)),
        max_latency_ms: latencies.iter().copied().max().unwrap_or(0),
        min_latency_ms: latencies.iter().copied().min().unwrap_or(0),
        mean_cpu: mean(usage.iter().map(|s| s.cpu)),
        mean_memory_mb: mean(usage.iter().map(|s| s.memory_mb)),
    }
}

impl RunSummary {
    pub fn to_text(&self) -> String {
        format!(
            "Throughput: {:.2} req/s\n\
             Payload: {} bytes\n\
             Mean latency: {:.2} ms\n\
             Max latency: {} ms\n\
             Min latency: {} ms\n\
             Mean CPU: {:.2}%\n\
             Mean memory: {:.2} MB\n",
            self.throughput_rps,
            self.payload_size_bytes,
            self.mean_latency_ms,
            self.max_latency_ms,
            self.min_latency_ms,
            self.mean_cpu,
            self.mean_memory_mb,
        )
    }
}

/// Prints the summary to stdout and writes it to `stats.txt` in the output
/// directory.
pub fn write_report(summary: &RunSummary, dir: &Path) -> Result<()> {
    let text = summary.to_text();
    println!("\n--- Run Statistics ---");
    print!("{text}");

    let path = dir.join("stats.txt");
    fs::write(&path, &text)
        .map_err(|e| anyhow::format_err!("failed to write {} - {e}", path.display()))?;
    info!("wrote summary statistics to {}", path.display());
    Ok(())
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.sum::<f64>() / n as f64
}
