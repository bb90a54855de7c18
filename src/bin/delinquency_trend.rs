//! Portfolio delinquency trend
//!
//! Loads the monthly delinquency extract, derives the DPD 30+ rate trend
//! (3M moving averages), bucket shares of active loans, and the lead/lag
//! correlation between delinquency and later defaults, then renders the
//! dual-axis trend chart and the bucket-share chart.
//! Supports JSON output via --json flag
//! Accepts config via environment variables: DATA_DIR, CHART_DIR

use lending_analytics::chart::{render_time_chart, write_time_chart_svg, ChartStyle, SeriesSpec};
use lending_analytics::delinquency::{derive_trend, load_delinquency_table, DpdBucket};
use lending_analytics::metrics::LagCorrelation;
use serde::Serialize;
use std::env;
use std::path::PathBuf;

#[derive(Serialize)]
struct TrendReport {
    months: Vec<String>,
    rate_column: String,
    rate_pct: Vec<Option<f64>>,
    rate_pct_ma3: Vec<Option<f64>>,
    defaulted_loans: Vec<Option<f64>>,
    defaulted_loans_ma3: Vec<Option<f64>>,
    lag_correlations: Vec<LagCorrelation>,
}

fn main() {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");

    let data_dir = env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));
    let trend_path = data_dir
        .join("generated")
        .join("portfolio_delinquency_trend.csv");

    let table = load_delinquency_table(&trend_path).expect("Failed to load delinquency extract");
    let trend = derive_trend(&table);

    if json_output {
        let report = TrendReport {
            months: trend.months.iter().map(|m| m.format("%Y-%m").to_string()).collect(),
            rate_column: table.rate_column.clone(),
            rate_pct: trend.rate_pct.clone(),
            rate_pct_ma3: trend.rate_pct_ma3.clone(),
            defaulted_loans: trend.defaulted_loans.clone(),
            defaulted_loans_ma3: trend.defaulted_loans_ma3.clone(),
            lag_correlations: trend.lag_correlations.clone(),
        };
        println!("{}", serde_json::to_string(&report).unwrap());
        return;
    }

    println!(
        "Portfolio Delinquency Trend ({} months, rate column: {})",
        trend.months.len(),
        table.rate_column
    );
    println!(
        "{:>8} {:>12} {:>12} {:>10} {:>12}",
        "Month", "DPD30+ %", "DPD30+ MA3", "Defaults", "Defaults MA3"
    );
    println!("{}", "-".repeat(60));
    for (idx, month) in trend.months.iter().enumerate() {
        println!(
            "{:>8} {:>12} {:>12} {:>10} {:>12}",
            month.format("%Y-%m"),
            fmt_opt(trend.rate_pct[idx]),
            fmt_opt(trend.rate_pct_ma3[idx]),
            fmt_opt(trend.defaulted_loans[idx]),
            fmt_opt(trend.defaulted_loans_ma3[idx]),
        );
    }

    println!("\nLead/lag: DPD 30+ now vs defaults 0-6 months later");
    println!("{:>12} {:>8}", "Lag (months)", "Corr");
    for lag in &trend.lag_correlations {
        println!("{:>12} {:>8}", lag.lag_months, fmt_corr(lag.corr));
    }

    let style = ChartStyle::default();

    let left_series = [
        SeriesSpec::line("DPD 30+ Rate (%)", &trend.rate_pct, 'o'),
        SeriesSpec::line("DPD 30+ Rate (3M MA)", &trend.rate_pct_ma3, '~'),
    ];
    let right_series = [
        SeriesSpec::line("Defaulted Loans", &trend.defaulted_loans, '*'),
        SeriesSpec::line("Defaulted Loans (3M MA)", &trend.defaulted_loans_ma3, '='),
    ];
    println!();
    println!(
        "{}",
        render_time_chart(
            "Delinquency (DPD 30+) vs Defaults Over Time",
            &trend.months,
            &left_series,
            &right_series,
            &style,
        )
    );

    let share_chart = trend.bucket_shares_pct.as_ref().map(|shares| {
        const MARKERS: [char; 5] = ['O', '1', '3', '6', '9'];
        let share_series: Vec<SeriesSpec> = DpdBucket::ALL
            .iter()
            .enumerate()
            .map(|(idx, bucket)| SeriesSpec::line(bucket.label(), &shares[idx], MARKERS[idx]))
            .collect();
        render_time_chart(
            "DPD Bucket Shares Over Time",
            &trend.months,
            &share_series,
            &[],
            &style,
        )
    });
    match &share_chart {
        Some(chart) => println!("{chart}"),
        None => println!("(bucket share chart skipped: extract lacks bucket or active-loan columns)"),
    }

    if let Ok(chart_dir) = env::var("CHART_DIR") {
        let chart_dir = PathBuf::from(chart_dir);
        write_time_chart_svg(
            &chart_dir.join("delinquency_trend.svg"),
            "Delinquency (DPD 30+) vs Defaults Over Time",
            &trend.months,
            &left_series,
            &right_series,
        )
        .expect("Failed to write trend chart SVG");

        if let Some(shares) = trend.bucket_shares_pct.as_ref() {
            const MARKERS: [char; 5] = ['O', '1', '3', '6', '9'];
            let share_series: Vec<SeriesSpec> = DpdBucket::ALL
                .iter()
                .enumerate()
                .map(|(idx, bucket)| SeriesSpec::line(bucket.label(), &shares[idx], MARKERS[idx]))
                .collect();
            write_time_chart_svg(
                &chart_dir.join("dpd_bucket_shares.svg"),
                "DPD Bucket Shares Over Time",
                &trend.months,
                &share_series,
                &[],
            )
            .expect("Failed to write bucket share chart SVG");
        }
        println!("Charts written to: {}", chart_dir.display());
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())
}

fn fmt_corr(value: Option<f64>) -> String {
    value.map(|c| format!("{c:.3}")).unwrap_or_else(|| "-".to_string())
}
