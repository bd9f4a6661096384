//! Derived series over the loaded documents. Every function here is pure and
//! total: empty input produces empty output (or `None`), so callers decide
//! whether an empty dataset is an error.
//!
//! Request-relative and usage-relative times use two independently computed
//! origins (the earliest request start and the earliest usage timestamp).
//! The latency/throughput charts and the CPU/memory charts therefore have
//! different zero points.

use std::collections::BTreeMap;

use crate::{RequestResult, UsageSample};

/// Target number of points on the block-averaged latency chart.
pub const LATENCY_CHART_POINTS: usize = 100;

/// Number of consecutive results averaged into one latency-chart point.
pub fn block_size(result_count: usize) -> usize {
    (result_count / LATENCY_CHART_POINTS).max(1)
}

/// Latency of each request paired with its id, in document order.
/// Latencies are exact `endTime - startTime` differences, negatives included.
pub fn latencies(results: &[RequestResult]) -> Vec<(i64, i64)> {
    results.iter().map(|r| (r.request, r.latency_ms())).collect()
}

/// Seconds since the earliest request start, per result, in document order.
pub fn relative_start_times(results: &[RequestResult]) -> Vec<f64> {
    let t0 = match results.iter().map(|r| r.start_time).min() {
        Some(t0) => t0,
        None => return Vec::new(),
    };
    results
        .iter()
        .map(|r| (r.start_time - t0) as f64 / 1000.0)
        .collect()
}

/// Seconds since the earliest usage timestamp, per sample, in document order.
pub fn relative_usage_times(usage: &[UsageSample]) -> Vec<f64> {
    let t0 = match usage.iter().map(|s| s.timestamp).min() {
        Some(t0) => t0,
        None => return Vec::new(),
    };
    usage
        .iter()
        .map(|s| (s.timestamp - t0) as f64 / 1000.0)
        .collect()
}

/// Averages contiguous blocks of results down to one `(avg_id, avg_latency)`
/// point per block, in block order. A non-empty trailing partial block still
/// contributes a point, so the output has `ceil(len / block_size)` points.
pub fn block_averaged_latency(results: &[RequestResult]) -> Vec<(f64, f64)> {
    let pairs = latencies(results);
    let size = block_size(pairs.len());
    pairs
        .chunks(size)
        .map(|block| {
            let n = block.len() as f64;
            let avg_id = block.iter().map(|&(id, _)| id).sum::<i64>() as f64 / n;
            let avg_latency = block.iter().map(|&(_, l)| l).sum::<i64>() as f64 / n;
            (avg_id, avg_latency)
        })
        .collect()
}

/// Counts requests into one-second bins of relative start time. Only occupied
/// bins are emitted, in ascending bin order.
pub fn throughput_per_second(relative_times: &[f64]) -> Vec<(i64, usize)> {
    let mut bins: BTreeMap<i64, usize> = BTreeMap::new();
    for &t in relative_times {
        *bins.entry(t.floor() as i64).or_default() += 1;
    }
    bins.into_iter().collect()
}

/// Maximum value and the index of its first occurrence.
pub fn peak(values: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in values.iter().enumerate() {
        if best.map_or(true, |(_, max)| value > max) {
            best = Some((i, value));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RequestResult;

    fn result(request: i64, start_time: i64, end_time: i64) -> RequestResult {
        RequestResult {
            request,
            start_time,
            end_time,
        }
    }

    #[test]
    fn two_request_scenario() {
        let results = [result(1, 1000, 1050), result(2, 1100, 1130)];

        let latencies = latencies(&results);
        assert_eq!(latencies, vec![(1, 50), (2, 30)]);

        let times = relative_start_times(&results);
        assert_eq!(times, vec![0.0, 0.1]);

        // 2 // 100 floors to 0, clamped to a block size of 1
        assert_eq!(block_size(results.len()), 1);
        let averaged = block_averaged_latency(&results);
        assert_eq!(averaged, vec![(1.0, 50.0), (2.0, 30.0)]);
    }

    #[test]
    fn negative_latency_is_not_clamped() {
        let results = [result(1, 2000, 1500)];
        assert_eq!(latencies(&results), vec![(1, -500)]);
    }

    #[test]
    fn block_count_matches_ceil_of_len_over_block_size() {
        for len in [1usize, 99, 100, 101, 250, 1000, 12345] {
            let results: Vec<_> = (0..len)
                .map(|i| result(i as i64, i as i64 * 10, i as i64 * 10 + 5))
                .collect();
            let size = block_size(len);
            assert_eq!(size, (len / 100).max(1));
            let points = block_averaged_latency(&results);
            assert_eq!(points.len(), (len + size - 1) / size);
        }
    }

    #[test]
    fn trailing_partial_block_contributes_a_point() {
        // 250 results -> block size 2 -> 125 points, all full blocks;
        // 251 results -> block size 2 -> 126 points, last block has 1 result.
        let results: Vec<_> = (0..251).map(|i| result(i, i * 10, i * 10 + 7)).collect();
        let points = block_averaged_latency(&results);
        assert_eq!(points.len(), 126);
        assert_eq!(points[125], (250.0, 7.0));
    }

    #[test]
    fn block_average_is_arithmetic_mean() {
        let results = [
            result(1, 0, 10),
            result(2, 0, 20),
            result(3, 0, 30),
            result(4, 0, 40),
        ];
        // len 4 -> block size 1, each point is its own result
        let points = block_averaged_latency(&results);
        assert_eq!(points, vec![(1.0, 10.0), (2.0, 20.0), (3.0, 30.0), (4.0, 40.0)]);
    }

    #[test]
    fn throughput_bins_are_sorted_occupied_and_complete() {
        // relative seconds: 0.1, 0.9, 2.5, 2.7, 5.0 -> bins 0 (x2), 2 (x2), 5
        let times = [0.1, 0.9, 2.5, 2.7, 5.0];
        let bins = throughput_per_second(&times);
        assert_eq!(bins, vec![(0, 2), (2, 2), (5, 1)]);
        assert!(bins.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(bins.iter().map(|&(_, count)| count).sum::<usize>(), times.len());
    }

    #[test]
    fn usage_scenario_peaks() {
        let usage = [
            crate::UsageSample {
                timestamp: 5000,
                cpu: 10.0,
                memory_mb: 100.0,
            },
            crate::UsageSample {
                timestamp: 6000,
                cpu: 90.0,
                memory_mb: 150.0,
            },
        ];
        let times = relative_usage_times(&usage);
        assert_eq!(times, vec![0.0, 1.0]);

        let cpu: Vec<f64> = usage.iter().map(|s| s.cpu).collect();
        let (cpu_idx, cpu_max) = peak(&cpu).unwrap();
        assert_eq!(cpu_max, 90.0);
        assert_eq!(times[cpu_idx], 1.0);

        let mem: Vec<f64> = usage.iter().map(|s| s.memory_mb).collect();
        let (mem_idx, mem_max) = peak(&mem).unwrap();
        assert_eq!(mem_max, 150.0);
        assert_eq!(times[mem_idx], 1.0);
    }

    #[test]
    fn peak_ties_resolve_to_first_occurrence() {
        assert_eq!(peak(&[1.0, 7.0, 3.0, 7.0]), Some((1, 7.0)));
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(latencies(&[]).is_empty());
        assert!(relative_start_times(&[]).is_empty());
        assert!(relative_usage_times(&[]).is_empty());
        assert!(block_averaged_latency(&[]).is_empty());
        assert!(throughput_per_second(&[]).is_empty());
        assert_eq!(peak(&[]), None);
    }
}
