//! Exposure at default
//!
//! Loads defaulted-loan rows, summarizes unpaid principal by signup risk
//! tier and by origination vintage (in parallel), and renders the two
//! annotated bar charts.
//! Supports JSON output via --json flag
//! Accepts config via environment variables: DATA_DIR, CHART_DIR

use lending_analytics::chart::{
    render_category_bars, write_category_bars_svg, ChartStyle,
};
use lending_analytics::ead::{load_ead_rows, summarize, RiskTierEad, VintageEad};
use serde::Serialize;
use std::env;
use std::path::PathBuf;

#[derive(Serialize)]
struct EadReport {
    loan_rows: usize,
    by_vintage: Vec<VintageEad>,
    by_risk_tier: Vec<RiskTierEad>,
}

fn main() {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");

    let data_dir = env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));
    let ead_path = data_dir.join("generated").join("exposure_at_default.csv");

    let rows = load_ead_rows(&ead_path).expect("Failed to load exposure-at-default extract");

    // The vintage and risk-tier groupings are independent
    let (by_vintage, by_risk_tier) = summarize(&rows);

    if json_output {
        let report = EadReport {
            loan_rows: rows.len(),
            by_vintage,
            by_risk_tier,
        };
        println!("{}", serde_json::to_string(&report).unwrap());
        return;
    }

    println!("Exposure at Default ({} extract rows)", rows.len());

    println!("\nEAD by origination vintage:");
    println!(
        "{:>8} {:>8} {:>16} {:>16}",
        "Vintage", "Loans", "Total EAD", "Avg EAD"
    );
    println!("{}", "-".repeat(52));
    for vintage in &by_vintage {
        println!(
            "{:>8} {:>8} {:>16.2} {:>16.2}",
            vintage.origination_month.format("%Y-%m"),
            vintage.defaulted_loan_count,
            vintage.total_principal_unpaid,
            vintage.avg_principal_unpaid,
        );
    }

    println!("\nEAD by risk tier at signup:");
    println!(
        "{:>8} {:>8} {:>16} {:>16}",
        "Tier", "Loans", "Total EAD", "Avg EAD"
    );
    println!("{}", "-".repeat(52));
    for tier in &by_risk_tier {
        println!(
            "{:>8} {:>8} {:>16.2} {:>16.2}",
            tier.risk_tier,
            tier.defaulted_loan_count,
            tier.total_principal_unpaid,
            tier.avg_principal_unpaid,
        );
    }

    let style = ChartStyle::default();

    let tier_labels: Vec<String> = by_risk_tier.iter().map(|t| t.risk_tier.clone()).collect();
    let tier_values: Vec<f64> = by_risk_tier.iter().map(|t| t.avg_principal_unpaid).collect();
    let tier_counts: Vec<usize> = by_risk_tier.iter().map(|t| t.defaulted_loan_count).collect();
    println!();
    println!(
        "{}",
        render_category_bars(
            "Average EAD (Unpaid Principal) by Risk Tier at Signup",
            &tier_labels,
            &tier_values,
            Some(&tier_counts),
            &style,
        )
    );

    let vintage_labels: Vec<String> = by_vintage
        .iter()
        .map(|v| v.origination_month.format("%Y-%m").to_string())
        .collect();
    let vintage_values: Vec<f64> = by_vintage.iter().map(|v| v.avg_principal_unpaid).collect();
    let vintage_counts: Vec<usize> = by_vintage.iter().map(|v| v.defaulted_loan_count).collect();
    println!(
        "{}",
        render_category_bars(
            "Average EAD (Unpaid Principal) by Origination Month",
            &vintage_labels,
            &vintage_values,
            Some(&vintage_counts),
            &style,
        )
    );

    if let Ok(chart_dir) = env::var("CHART_DIR") {
        let chart_dir = PathBuf::from(chart_dir);
        write_category_bars_svg(
            &chart_dir.join("ead_by_risk_tier.svg"),
            "Average EAD (Unpaid Principal) by Risk Tier at Signup",
            &tier_labels,
            &tier_values,
            Some(&tier_counts),
        )
        .expect("Failed to write risk tier chart SVG");
        write_category_bars_svg(
            &chart_dir.join("ead_by_vintage.svg"),
            "Average EAD (Unpaid Principal) by Origination Month",
            &vintage_labels,
            &vintage_values,
            Some(&vintage_counts),
        )
        .expect("Failed to write vintage chart SVG");
        println!("Charts written to: {}", chart_dir.display());
    }
}
