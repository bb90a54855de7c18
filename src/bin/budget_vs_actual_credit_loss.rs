//! Budget vs Actual — net credit loss
//!
//! Same pipeline as the cash comparison, over the actual net credit loss
//! extract and the planned net losses of the monthly budget plan.
//! Supports JSON output via --json flag
//! Accepts config via environment variables: DATA_DIR, CHART_DIR

use lending_analytics::actuals::load_actual_series;
use lending_analytics::budget::{
    budget_vs_actual, load_budget_plan, pivot_scenarios, PlanMetric, Scenario,
};
use lending_analytics::chart::{render_time_chart, write_time_chart_svg, ChartStyle, SeriesSpec};
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");

    let data_dir = env::var("DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));
    let actual_path = data_dir.join("generated").join("actual_loss.csv");
    let budget_path = data_dir.join("raw").join("budget_plan_monthly.csv");

    let actual = load_actual_series(&actual_path, "actual_loss")
        .expect("Failed to load actual credit loss extract");
    let plan = load_budget_plan(&budget_path).expect("Failed to load budget plan");

    let pivot = pivot_scenarios(&plan, PlanMetric::NetLosses);
    let bva = budget_vs_actual(&actual, &pivot);

    if json_output {
        println!("{}", serde_json::to_string(&bva).unwrap());
        return;
    }

    println!("Budget vs Actual — Net Credit Loss ({} months)", bva.rows.len());
    println!(
        "{:>8} {:>14} {:>14} {:>14} {:>12} {:>12}",
        "Month", "Actual", "Base", "Stretch", "Var%Base", "Var%Stretch"
    );
    println!("{}", "-".repeat(80));
    for row in &bva.rows {
        println!(
            "{:>8} {:>14.2} {:>14} {:>14} {:>12} {:>12}",
            row.month.format("%Y-%m"),
            row.actual,
            fmt_opt(row.budget_base),
            fmt_opt(row.budget_stretch),
            fmt_pct(row.var_base_pct),
            fmt_pct(row.var_stretch_pct),
        );
    }

    let months = bva.months();
    let actual_col = bva.actual();
    let base_col = bva.budget(Scenario::Base);
    let stretch_col = bva.budget(Scenario::Stretch);

    let top_series = [
        SeriesSpec::line("Actual", &actual_col, 'o'),
        SeriesSpec::line("Budget (Base)", &base_col, '+'),
        SeriesSpec::line("Budget (Stretch)", &stretch_col, 'x'),
    ];
    let style = ChartStyle::default();
    println!();
    println!(
        "{}",
        render_time_chart(
            "Consumer Lending — Actual vs Budget (Net Credit Loss)",
            &months,
            &top_series,
            &[],
            &style,
        )
    );

    let base_pct = bva.variance_pct_points(Scenario::Base);
    let stretch_pct = bva.variance_pct_points(Scenario::Stretch);
    let bottom_series = [
        SeriesSpec::line("Variance % vs Base", &base_pct, 'o'),
        SeriesSpec::line("Variance % vs Stretch", &stretch_pct, '+'),
    ];
    let variance_style = ChartStyle::variance_panel();
    println!(
        "{}",
        render_time_chart(
            "Consumer Lending — Monthly Variance % (Net Credit Loss)",
            &months,
            &bottom_series,
            &[],
            &variance_style,
        )
    );

    if let Ok(chart_dir) = env::var("CHART_DIR") {
        let chart_dir = PathBuf::from(chart_dir);
        write_time_chart_svg(
            &chart_dir.join("budget_vs_actual_credit_loss.svg"),
            "Consumer Lending — Actual vs Budget (Net Credit Loss)",
            &months,
            &top_series,
            &[],
        )
        .expect("Failed to write credit loss chart SVG");
        write_time_chart_svg(
            &chart_dir.join("budget_vs_actual_credit_loss_variance.svg"),
            "Consumer Lending — Monthly Variance % (Net Credit Loss)",
            &months,
            &bottom_series,
            &[],
        )
        .expect("Failed to write variance chart SVG");
        println!("Charts written to: {}", chart_dir.display());
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())
}

fn fmt_pct(value: Option<f64>) -> String {
    value
        .map(|p| format!("{:.2}%", p * 100.0))
        .unwrap_or_else(|| "-".to_string())
}
