//! Cumulative default rate by vintage
//!
//! Loads the 12M CDR extract, cross-checks the rate against the count
//! columns, and renders loan counts (bars) against the CDR line on a
//! secondary axis.
//! Supports JSON output via --json flag
//! Accepts config via environment variables: DATA_DIR, CHART_DIR

use lending_analytics::cdr::{check_rates, load_cdr_rows};
use lending_analytics::chart::{render_time_chart, write_time_chart_svg, ChartStyle, SeriesSpec};
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");

    let data_dir = env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));
    let cdr_path = data_dir
        .join("generated")
        .join("cumulative_default_rate.csv");

    let rows = load_cdr_rows(&cdr_path).expect("Failed to load cumulative default rate extract");

    let mismatches = check_rates(&rows);

    if json_output {
        println!("{}", serde_json::to_string(&rows).unwrap());
        return;
    }

    println!("12M Cumulative Default Rate by Vintage ({} vintages)", rows.len());
    if mismatches > 0 {
        println!("({} rows with rate/count mismatch, see warnings)", mismatches);
    }
    println!(
        "{:>8} {:>10} {:>14} {:>10}",
        "Vintage", "Loans (N)", "Defaults 12M", "CDR 12M"
    );
    println!("{}", "-".repeat(46));
    for row in &rows {
        println!(
            "{:>8} {:>10} {:>14} {:>9.2}%",
            row.origination_month.format("%Y-%m"),
            row.n_loans_in_vintage,
            row.n_default_12m_loans,
            row.cdr_12m,
        );
    }

    let months: Vec<_> = rows.iter().map(|r| r.origination_month).collect();
    let loans: Vec<Option<f64>> = rows.iter().map(|r| Some(r.n_loans_in_vintage as f64)).collect();
    let defaults: Vec<Option<f64>> = rows
        .iter()
        .map(|r| Some(r.n_default_12m_loans as f64))
        .collect();
    let cdr: Vec<Option<f64>> = rows.iter().map(|r| Some(r.cdr_12m)).collect();

    let left_series = [
        SeriesSpec::bars("Loans in Vintage (N)", &loans, '#'),
        SeriesSpec::bars("Defaults within 12M (N)", &defaults, '='),
    ];
    let right_series = [SeriesSpec::line("12M Cumulative Default Rate (%)", &cdr, 'o')];

    let style = ChartStyle::default();
    println!();
    println!(
        "{}",
        render_time_chart(
            "12M Cumulative Default Rate and Loan Counts by Vintage",
            &months,
            &left_series,
            &right_series,
            &style,
        )
    );

    if let Ok(chart_dir) = env::var("CHART_DIR") {
        let chart_dir = PathBuf::from(chart_dir);
        write_time_chart_svg(
            &chart_dir.join("cumulative_default_rate.svg"),
            "12M Cumulative Default Rate and Loan Counts by Vintage",
            &months,
            &left_series,
            &right_series,
        )
        .expect("Failed to write CDR chart SVG");
        println!("Charts written to: {}", chart_dir.display());
    }
}
