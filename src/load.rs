use std::fs::File;
use std::path::Path;

use anyhow::Result;
use log::debug;

use crate::{ResultsDocument, UsageSample};

pub const RAW_USAGE_PATH: &str = "data/raw/http-resource-usage.json";
pub const RAW_RESULTS_PATH: &str = "data/raw/http-results.json";

/// Loads the request timing document. A missing or malformed file aborts the
/// run; so does an empty `results` array, since every derived series needs at
/// least one request.
pub fn load_results<P: AsRef<Path>>(path: P) -> Result<ResultsDocument> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| anyhow::format_err!("failed to open {} - {e}", path.display()))?;
    let document: ResultsDocument = serde_json::from_reader(file)
        .map_err(|e| anyhow::format_err!("failed to parse {} - {e}", path.display()))?;
    if document.results.is_empty() {
        anyhow::bail!("{} contains no request results", path.display());
    }
    debug!("loaded {} request results", document.results.len());
    Ok(document)
}

/// Loads the resource usage samples, rejecting an empty array for the same
/// reason as [`load_results`].
pub fn load_usage<P: AsRef<Path>>(path: P) -> Result<Vec<UsageSample>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| anyhow::format_err!("failed to open {} - {e}", path.display()))?;
    let usage: Vec<UsageSample> = serde_json::from_reader(file)
        .map_err(|e| anyhow::format_err!("failed to parse {} - {e}", path.display()))?;
    if usage.is_empty() {
        anyhow::bail!("{} contains no usage samples", path.display());
    }
    debug!("loaded {} usage samples", usage.len());
    Ok(usage)
}
