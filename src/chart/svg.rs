//! SVG export of the terminal figures
//!
//! Each ASCII figure has an SVG twin written when a chart directory is
//! configured. Only the SVG backend is enabled, so export works without
//! native font or raster dependencies.

use std::error::Error;
use std::path::Path;

use chrono::NaiveDate;
use plotters::prelude::*;

use super::ascii::{SeriesKind, SeriesSpec};

const FIGURE_SIZE: (u32, u32) = (1400, 900);

/// Series color cycle (matplotlib default cycle, for familiar reports)
const SERIES_COLORS: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

fn series_color(idx: usize) -> RGBColor {
    SERIES_COLORS[idx % SERIES_COLORS.len()]
}

/// Split a gap-aware series into runs of consecutive filled months
fn line_runs(values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) => current.push((i as f64, *v)),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs
}

fn bar_elements(values: &[Option<f64>], color: RGBColor) -> Vec<Rectangle<(f64, f64)>> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
        .map(|(x, v)| Rectangle::new([(x - 0.35, 0.0), (x + 0.35, v)], color.mix(0.6).filled()))
        .collect()
}

fn padded_range(series: &[SeriesSpec]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for s in series {
        for v in s.values.iter().filter_map(|v| *v) {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min).abs() * 0.05).max(1e-12);
    (min - pad, max + pad)
}

/// Write a monthly time chart as SVG; `right` series get a secondary axis
pub fn write_time_chart_svg(
    path: &Path,
    title: &str,
    months: &[NaiveDate],
    left: &[SeriesSpec],
    right: &[SeriesSpec],
) -> Result<(), Box<dyn Error>> {
    let n = months.len();
    if n == 0 {
        return Ok(());
    }

    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let x_range = -0.5f64..(n as f64 - 0.5);
    let (left_lo, left_hi) = padded_range(left);

    let label_fmt = |x: &f64| -> String {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 || idx as usize >= months.len() {
            return String::new();
        }
        months[idx as usize].format("%Y-%m").to_string()
    };

    let mut builder = ChartBuilder::on(&root);
    builder
        .caption(title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64);

    if right.is_empty() {
        let mut chart = builder.build_cartesian_2d(x_range, left_lo..left_hi)?;
        chart
            .configure_mesh()
            .x_labels(n.min(12))
            .x_label_formatter(&label_fmt)
            .draw()?;

        for (idx, series) in left.iter().enumerate() {
            let color = series_color(idx);
            match series.kind {
                SeriesKind::Bars => {
                    chart
                        .draw_series(bar_elements(series.values, color))?
                        .label(series.label)
                        .legend(move |(x, y)| {
                            Rectangle::new([(x, y - 4), (x + 18, y + 4)], color.filled())
                        });
                }
                SeriesKind::Line => {
                    let mut labelled = false;
                    for run in line_runs(series.values) {
                        let anno =
                            chart.draw_series(LineSeries::new(run.clone(), color.stroke_width(2)))?;
                        if !labelled {
                            anno.label(series.label).legend(move |(x, y)| {
                                PathElement::new(vec![(x, y), (x + 18, y)], color)
                            });
                            labelled = true;
                        }
                        chart.draw_series(
                            run.iter().map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
                        )?;
                    }
                }
            }
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.85))
            .draw()?;
    } else {
        let (right_lo, right_hi) = padded_range(right);
        let mut chart = builder
            .build_cartesian_2d(x_range.clone(), left_lo..left_hi)?
            .set_secondary_coord(x_range, right_lo..right_hi);

        chart
            .configure_mesh()
            .x_labels(n.min(12))
            .x_label_formatter(&label_fmt)
            .draw()?;
        chart.configure_secondary_axes().draw()?;

        for (idx, series) in left.iter().enumerate() {
            let color = series_color(idx);
            match series.kind {
                SeriesKind::Bars => {
                    chart
                        .draw_series(bar_elements(series.values, color))?
                        .label(series.label)
                        .legend(move |(x, y)| {
                            Rectangle::new([(x, y - 4), (x + 18, y + 4)], color.filled())
                        });
                }
                SeriesKind::Line => {
                    let mut labelled = false;
                    for run in line_runs(series.values) {
                        let anno =
                            chart.draw_series(LineSeries::new(run.clone(), color.stroke_width(2)))?;
                        if !labelled {
                            anno.label(series.label).legend(move |(x, y)| {
                                PathElement::new(vec![(x, y), (x + 18, y)], color)
                            });
                            labelled = true;
                        }
                        chart.draw_series(
                            run.iter().map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
                        )?;
                    }
                }
            }
        }

        for (offset, series) in right.iter().enumerate() {
            let color = series_color(left.len() + offset);
            match series.kind {
                SeriesKind::Bars => {
                    chart
                        .draw_secondary_series(bar_elements(series.values, color))?
                        .label(series.label)
                        .legend(move |(x, y)| {
                            Rectangle::new([(x, y - 4), (x + 18, y + 4)], color.filled())
                        });
                }
                SeriesKind::Line => {
                    let mut labelled = false;
                    for run in line_runs(series.values) {
                        let anno = chart.draw_secondary_series(LineSeries::new(
                            run.clone(),
                            color.stroke_width(2),
                        ))?;
                        if !labelled {
                            anno.label(series.label).legend(move |(x, y)| {
                                PathElement::new(vec![(x, y), (x + 18, y)], color)
                            });
                            labelled = true;
                        }
                        chart.draw_secondary_series(
                            run.iter().map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
                        )?;
                    }
                }
            }
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.85))
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Write a categorical bar chart as SVG with count annotations above bars
pub fn write_category_bars_svg(
    path: &Path,
    title: &str,
    labels: &[String],
    values: &[f64],
    counts: Option<&[usize]>,
) -> Result<(), Box<dyn Error>> {
    let n = labels.len();
    if n == 0 {
        return Ok(());
    }

    let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let max_value = values.iter().copied().fold(0.0_f64, f64::max);
    // 20% headroom keeps annotations clear of the frame
    let y_hi = if max_value > 0.0 { max_value * 1.2 } else { 1.0 };

    let label_fmt = |x: &f64| -> String {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 || idx as usize >= labels.len() {
            return String::new();
        }
        labels[idx as usize].clone()
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0.0..y_hi)?;

    chart
        .configure_mesh()
        .x_labels(n)
        .x_label_formatter(&label_fmt)
        .draw()?;

    let color = series_color(0);
    chart.draw_series(values.iter().enumerate().map(|(i, &v)| {
        Rectangle::new(
            [(i as f64 - 0.35, 0.0), (i as f64 + 0.35, v)],
            color.mix(0.8).filled(),
        )
    }))?;

    if let Some(counts) = counts {
        chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
            Text::new(
                format!("{count}"),
                (i as f64 - 0.05, values[i] + max_value * 0.02),
                ("sans-serif", 18),
            )
        }))?;
    }

    root.present()?;
    Ok(())
}
