use plotters::prelude::*;

use std::error::Error;
use std::path::Path;

use crate::series;
use crate::{RequestResult, UsageSample};

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            (($colour & 0x0000FF) >> 0) as u8,
        )
    };
}

const ORANGE: RGBColor = hexcolour!(0xFFA500);
const BLUE: RGBColor = hexcolour!(0x0000FF);
const GREEN: RGBColor = hexcolour!(0x008000);
const PURPLE: RGBColor = hexcolour!(0x800080);

/// Block-averaged latency over request ids, written to `latency.png`.
pub fn render_latency(results: &[RequestResult], dir: &Path) -> Result<(), Box<dyn Error>> {
    let points = series::block_averaged_latency(results);
    let size = series::block_size(results.len());
    let path = dir.join("latency.png");

    let (x_lo, x_hi) = padded_range(points.iter().map(|&(x, _)| x));
    let (y_lo, y_hi) = padded_range(points.iter().map(|&(_, y)| y));

    let root = BitMapBackend::new(&path, (1000, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Average Latency per {size}-Request Block"),
            ("Arial", 20),
        )
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_ranged(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Average Request ID in Block")
        .y_desc("Average Latency (ms)")
        .draw()?;

    chart.draw_series(LineSeries::new(points, ORANGE.stroke_width(2)))?;

    Ok(())
}

/// CPU percentage over usage-relative time, written to `cpu.png`, with the
/// peak value annotated.
pub fn render_cpu(usage: &[UsageSample], dir: &Path) -> Result<(), Box<dyn Error>> {
    let times = series::relative_usage_times(usage);
    let cpu: Vec<f64> = usage.iter().map(|s| s.cpu).collect();
    render_usage_series(
        &times,
        &cpu,
        &UsageChart {
            filename: "cpu.png",
            caption: "CPU Usage (%) Over Time",
            y_desc: "CPU (%)",
            colour: BLUE,
            unit: "%",
        },
        dir,
    )
}

/// Memory over usage-relative time, written to `memory.png`, with the peak
/// value annotated.
pub fn render_memory(usage: &[UsageSample], dir: &Path) -> Result<(), Box<dyn Error>> {
    let times = series::relative_usage_times(usage);
    let mem: Vec<f64> = usage.iter().map(|s| s.memory_mb).collect();
    render_usage_series(
        &times,
        &mem,
        &UsageChart {
            filename: "memory.png",
            caption: "Memory Usage (MB) Over Time",
            y_desc: "Memory (MB)",
            colour: GREEN,
            unit: " MB",
        },
        dir,
    )
}

/// Requests per second over occupied one-second bins, written to
/// `throughput.png`.
pub fn render_throughput(results: &[RequestResult], dir: &Path) -> Result<(), Box<dyn Error>> {
    let times = series::relative_start_times(results);
    let points: Vec<(f64, f64)> = series::throughput_per_second(&times)
        .into_iter()
        .map(|(bin, count)| (bin as f64, count as f64))
        .collect();
    let path = dir.join("throughput.png");

    let (x_lo, x_hi) = padded_range(points.iter().map(|&(x, _)| x));
    let (y_lo, y_hi) = padded_range(points.iter().map(|&(_, y)| y));

    let root = BitMapBackend::new(&path, (1000, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Throughput", ("Arial", 20))
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_ranged(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("Requests per Second")
        .draw()?;

    chart.draw_series(LineSeries::new(points, PURPLE.stroke_width(2)))?;

    Ok(())
}

struct UsageChart<'a> {
    filename: &'a str,
    caption: &'a str,
    y_desc: &'a str,
    colour: RGBColor,
    unit: &'a str,
}

fn render_usage_series(
    times: &[f64],
    values: &[f64],
    spec: &UsageChart,
    dir: &Path,
) -> Result<(), Box<dyn Error>> {
    let path = dir.join(spec.filename);

    let (x_lo, x_hi) = padded_range(times.iter().copied());
    let (y_lo, y_hi) = padded_range(values.iter().copied());
    let span = y_hi - y_lo;

    let root = BitMapBackend::new(&path, (800, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(spec.caption, ("Arial", 20))
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        // extra headroom so the peak annotation stays inside the plot
        .build_ranged(x_lo..x_hi, y_lo..(y_hi + span * 0.1))?;

    chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc(spec.y_desc)
        .draw()?;

    chart.draw_series(LineSeries::new(
        times.iter().copied().zip(values.iter().copied()),
        spec.colour.stroke_width(2),
    ))?;

    if let Some((index, max)) = series::peak(values) {
        let label = format!("{max:.2}{}", spec.unit);
        chart.draw_series(std::iter::once(Text::new(
            label,
            (times[index], max + span * 0.05),
            ("Arial", 12).into_font(),
        )))?;
    }

    Ok(())
}

fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for value in values {
        lo = lo.min(value);
        hi = hi.max(value);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if hi - lo < f64::EPSILON {
        // single-valued series still needs a non-degenerate axis
        return (lo - 1.0, hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}
