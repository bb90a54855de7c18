//! ASCII chart rendering for terminal output
//!
//! Intentionally "dumb" (fixed-size character grid), optimized for:
//! - quick visual checks of a monthly metric in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Series are drawn with per-series marker characters; consecutive months
//! are connected with line segments and a gap (`None`) breaks the line.
//! Dual-axis charts scale left and right series against independent
//! y-ranges stated in the chart header.

use chrono::NaiveDate;

use super::ChartStyle;

/// How a series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    /// Markers connected by segments, broken at gaps
    Line,
    /// Vertical bars from the zero baseline
    Bars,
}

/// One series to draw on a time chart
#[derive(Debug, Clone)]
pub struct SeriesSpec<'a> {
    pub label: &'a str,
    pub values: &'a [Option<f64>],
    pub marker: char,
    pub kind: SeriesKind,
}

impl<'a> SeriesSpec<'a> {
    pub fn line(label: &'a str, values: &'a [Option<f64>], marker: char) -> Self {
        Self {
            label,
            values,
            marker,
            kind: SeriesKind::Line,
        }
    }

    pub fn bars(label: &'a str, values: &'a [Option<f64>], marker: char) -> Self {
        Self {
            label,
            values,
            marker,
            kind: SeriesKind::Bars,
        }
    }
}

/// Render a monthly time chart; `right` series get their own y-axis
pub fn render_time_chart(
    title: &str,
    months: &[NaiveDate],
    left: &[SeriesSpec],
    right: &[SeriesSpec],
    style: &ChartStyle,
) -> String {
    let width = style.width.max(10);
    let height = style.height.max(5);
    let n = months.len();

    if n == 0 {
        return format!("{title}\n(no data)\n");
    }

    let (left_min, left_max) = pad_range(y_range(left).unwrap_or((0.0, 1.0)), 0.05);
    let (right_min, right_max) = pad_range(y_range(right).unwrap_or((0.0, 1.0)), 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Vertical month guides
    if style.guide_every > 0 {
        for i in (0..n).step_by(style.guide_every) {
            let x = map_x(i, n, width);
            for row in grid.iter_mut() {
                if row[x] == ' ' {
                    row[x] = ':';
                }
            }
        }
    }

    // Zero gridline (left axis)
    if style.zero_line && left_min < 0.0 && left_max > 0.0 {
        let y = map_y(0.0, left_min, left_max, height);
        for cell in grid[y].iter_mut() {
            if *cell == ' ' {
                *cell = '.';
            }
        }
    }

    // Bars first so lines can overlay them
    for series in left.iter().filter(|s| s.kind == SeriesKind::Bars) {
        draw_bars(&mut grid, series, n, width, height, left_min, left_max);
    }
    for series in right.iter().filter(|s| s.kind == SeriesKind::Bars) {
        draw_bars(&mut grid, series, n, width, height, right_min, right_max);
    }
    for series in left.iter().filter(|s| s.kind == SeriesKind::Line) {
        draw_line_series(&mut grid, series, n, width, height, left_min, left_max);
    }
    for series in right.iter().filter(|s| s.kind == SeriesKind::Line) {
        draw_line_series(&mut grid, series, n, width, height, right_min, right_max);
    }

    // Assemble: title, axis ranges, grid, x axis, legend
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');

    if right.is_empty() {
        out.push_str(&format!("y=[{left_min:.2}, {left_max:.2}]\n"));
    } else {
        out.push_str(&format!(
            "y=[{left_min:.2}, {left_max:.2}] | right y=[{right_min:.2}, {right_max:.2}]\n"
        ));
    }

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out.push_str(&"-".repeat(width));
    out.push('\n');
    out.push_str(&format!(
        "x: {} .. {} ({} months)\n",
        months[0].format("%Y-%m"),
        months[n - 1].format("%Y-%m"),
        n
    ));

    for series in left {
        if right.is_empty() {
            out.push_str(&format!("  {} {}\n", series.marker, series.label));
        } else {
            out.push_str(&format!("  {} {} (left)\n", series.marker, series.label));
        }
    }
    for series in right {
        out.push_str(&format!("  {} {} (right)\n", series.marker, series.label));
    }

    out
}

/// Render labelled horizontal bars for a categorical summary
///
/// `counts` annotates each bar with its group size, N.
pub fn render_category_bars(
    title: &str,
    labels: &[String],
    values: &[f64],
    counts: Option<&[usize]>,
    style: &ChartStyle,
) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');

    if labels.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0);
    let bar_area = style.width.saturating_sub(label_width + 3).max(10);
    let max_value = values.iter().copied().fold(0.0_f64, f64::max);

    for (idx, (label, &value)) in labels.iter().zip(values).enumerate() {
        let bar_len = if max_value > 0.0 && value > 0.0 {
            (((value / max_value) * bar_area as f64).round() as usize)
                .clamp(1, bar_area)
        } else {
            0
        };

        let mut line = format!(
            "{label:<label_width$} | {} {value:.2}",
            "#".repeat(bar_len)
        );
        if let Some(counts) = counts {
            line.push_str(&format!(" N={}", counts[idx]));
        }
        out.push_str(&line);
        out.push('\n');
    }

    if counts.is_some() {
        out.push_str("N = defaulted loans\n");
    }

    out
}

fn y_range(series: &[SeriesSpec]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for s in series {
        for v in s.values.iter().filter_map(|v| *v) {
            min = min.min(v);
            max = max.max(v);
        }
    }

    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

fn pad_range((min, max): (f64, f64), frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(i: usize, n: usize, width: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let u = i as f64 / (n as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(v: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((v - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y_max maps to row 0
    (height as f64 - 1.0 - u * (height as f64 - 1.0)).round() as usize
}

fn is_background(c: char) -> bool {
    matches!(c, ' ' | ':' | '.')
}

fn draw_bars(
    grid: &mut [Vec<char>],
    series: &SeriesSpec,
    n: usize,
    width: usize,
    height: usize,
    y_min: f64,
    y_max: f64,
) {
    let baseline = map_y(0.0_f64.clamp(y_min, y_max), y_min, y_max, height);

    for (i, value) in series.values.iter().enumerate().take(n) {
        let Some(value) = *value else { continue };
        let x = map_x(i, n, width);
        let top = map_y(value, y_min, y_max, height);

        let (lo, hi) = if top <= baseline {
            (top, baseline)
        } else {
            (baseline, top)
        };
        for row in grid.iter_mut().take(hi + 1).skip(lo) {
            if is_background(row[x]) {
                row[x] = series.marker;
            }
        }
    }
}

fn draw_line_series(
    grid: &mut [Vec<char>],
    series: &SeriesSpec,
    n: usize,
    width: usize,
    height: usize,
    y_min: f64,
    y_max: f64,
) {
    let mut prev: Option<(usize, usize)> = None;

    for (i, value) in series.values.iter().enumerate().take(n) {
        let Some(value) = *value else {
            // A gap breaks the line
            prev = None;
            continue;
        };

        let x = map_x(i, n, width);
        let y = map_y(value, y_min, y_max, height);

        if let Some((x0, y0)) = prev {
            draw_segment(grid, x0, y0, x, y, series.marker);
        }
        grid[y][x] = series.marker;
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish); only writes background cells
fn draw_segment(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && is_background(grid[y0 as usize][x0 as usize])
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 1).unwrap()
    }

    #[test]
    fn test_line_chart_golden_snapshot_small() {
        let months = vec![ymd(2023, 1), ymd(2023, 2), ymd(2023, 3)];
        let values = vec![Some(0.0), Some(5.0), Some(10.0)];
        let style = ChartStyle {
            width: 5,
            height: 3,
            guide_every: 0,
            zero_line: false,
        };

        let txt = render_time_chart(
            "Actual Cash",
            &months,
            &[SeriesSpec::line("Actual", &values, 'o')],
            &[],
            &style,
        );

        let expected = concat!(
            "Actual Cash\n",
            "y=[-0.50, 10.50]\n",
            "   oo\n",
            " oo  \n",
            "o    \n",
            "-----\n",
            "x: 2023-01 .. 2023-03 (3 months)\n",
            "  o Actual\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn test_gap_breaks_the_line() {
        let months = vec![ymd(2023, 1), ymd(2023, 2), ymd(2023, 3)];
        let values = vec![Some(1.0), None, Some(1.0)];
        let style = ChartStyle {
            width: 9,
            height: 3,
            guide_every: 0,
            zero_line: false,
        };

        let txt = render_time_chart(
            "t",
            &months,
            &[SeriesSpec::line("s", &values, 'o')],
            &[],
            &style,
        );

        // Grid rows are lines 2..2+height; two isolated markers, no segment
        let grid_rows: Vec<&str> = txt.lines().skip(2).take(3).collect();
        let marker_count: usize = grid_rows
            .iter()
            .map(|row| row.chars().filter(|&c| c == 'o').count())
            .sum();
        assert_eq!(marker_count, 2);
    }

    #[test]
    fn test_dual_axis_header_and_legend() {
        let months = vec![ymd(2023, 1), ymd(2023, 2), ymd(2023, 3)];
        let rate = vec![Some(10.0), Some(11.0), Some(12.0)];
        let defaults = vec![Some(200.0), Some(210.0), Some(250.0)];
        let style = ChartStyle::default();

        let txt = render_time_chart(
            "Delinquency vs Defaults",
            &months,
            &[SeriesSpec::line("DPD 30+ Rate (%)", &rate, 'o')],
            &[SeriesSpec::line("Defaulted Loans", &defaults, '*')],
            &style,
        );

        assert!(txt.contains("| right y=["));
        assert!(txt.contains("  o DPD 30+ Rate (%) (left)"));
        assert!(txt.contains("  * Defaulted Loans (right)"));
    }

    #[test]
    fn test_bars_fill_down_to_baseline() {
        let months = vec![ymd(2023, 1), ymd(2023, 2)];
        let values = vec![Some(10.0), Some(10.0)];
        let style = ChartStyle {
            width: 10,
            height: 5,
            guide_every: 0,
            zero_line: false,
        };

        let txt = render_time_chart(
            "t",
            &months,
            &[SeriesSpec::bars("n", &values, '#')],
            &[],
            &style,
        );

        // Degenerate y-range puts both values mid-grid (row 2); bars fill
        // from there down to the bottom baseline in both columns
        let grid_rows: Vec<&str> = txt.lines().skip(2).take(5).collect();
        let hash_count: usize = grid_rows
            .iter()
            .map(|row| row.chars().filter(|&c| c == '#').count())
            .sum();
        assert_eq!(hash_count, 6);
    }

    #[test]
    fn test_category_bars_golden() {
        let labels = vec!["A".to_string(), "B".to_string()];
        let values = vec![100.0, 50.0];
        let counts = vec![3usize, 5];
        let style = ChartStyle {
            width: 20,
            height: 5,
            guide_every: 0,
            zero_line: false,
        };

        let txt = render_category_bars("Avg EAD", &labels, &values, Some(&counts), &style);
        let expected = concat!(
            "Avg EAD\n",
            "A | ################ 100.00 N=3\n",
            "B | ######## 50.00 N=5\n",
            "N = defaulted loans\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn test_empty_months_render_placeholder() {
        let txt = render_time_chart("t", &[], &[], &[], &ChartStyle::default());
        assert_eq!(txt, "t\n(no data)\n");
    }
}
