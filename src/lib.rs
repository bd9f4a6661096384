use serde_derive::{Deserialize, Serialize};

pub mod chart;
pub mod load;
pub mod report;
pub mod series;

/// One CPU/memory reading taken while the load test was running.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageSample {
    pub timestamp: i64, // milliseconds since unix UTC
    pub cpu: f64,       // percent
    #[serde(rename = "memoryMB")]
    pub memory_mb: f64,
}

/// One HTTP request's start/end timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestResult {
    pub request: i64,
    pub start_time: i64, // milliseconds since unix UTC
    pub end_time: i64,
}

impl RequestResult {
    pub fn latency_ms(&self) -> i64 {
        self.end_time - self.start_time
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsDocument {
    pub results: Vec<RequestResult>,
    #[serde(default)]
    pub payload_size_bytes: i64,
}
