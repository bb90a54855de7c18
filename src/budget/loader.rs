//! Load budget plan rows from budget_plan_monthly.csv

use std::error::Error;
use std::path::Path;

use csv::Reader;

use super::{BudgetPlanRow, Scenario};
use crate::series::parse_month;

/// Raw CSV row matching budget_plan_monthly.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "month")]
    month: String,
    #[serde(rename = "scenario_name")]
    scenario_name: String,
    #[serde(rename = "planned_cash_inflow")]
    planned_cash_inflow: f64,
    #[serde(rename = "planned_net_losses")]
    planned_net_losses: f64,
}

impl CsvRow {
    fn to_plan_row(self) -> Result<BudgetPlanRow, Box<dyn Error>> {
        let scenario = match self.scenario_name.as_str() {
            "base" => Scenario::Base,
            "stretch" => Scenario::Stretch,
            other => return Err(format!("Unknown scenario_name: {}", other).into()),
        };

        let month = parse_month(&self.month)?;

        Ok(BudgetPlanRow {
            month,
            scenario,
            planned_cash_inflow: self.planned_cash_inflow,
            planned_net_losses: self.planned_net_losses,
        })
    }
}

/// Load all budget plan rows from a CSV file
pub fn load_budget_plan<P: AsRef<Path>>(path: P) -> Result<Vec<BudgetPlanRow>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut rows = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        rows.push(row.to_plan_row()?);
    }

    Ok(rows)
}

/// Load budget plan rows from any reader (e.g., string buffer)
pub fn load_budget_plan_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<BudgetPlanRow>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        rows.push(row.to_plan_row()?);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = "\
month,scenario_name,planned_cash_inflow,planned_net_losses
2023-01-01,base,120.0,30.0
2023-01-01,stretch,140.0,25.0
2023-02-01,base,120.0,30.0
";

    #[test]
    fn test_load_budget_plan_from_reader() {
        let rows = load_budget_plan_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].scenario, Scenario::Base);
        assert_eq!(rows[1].scenario, Scenario::Stretch);
        assert_eq!(rows[0].month, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(rows[1].planned_cash_inflow, 140.0);
        assert_eq!(rows[2].planned_net_losses, 30.0);
    }

    #[test]
    fn test_load_default_budget_plan() {
        let rows = load_budget_plan("data/raw/budget_plan_monthly.csv")
            .expect("Failed to load budget plan");
        assert_eq!(rows.len(), 36);

        let base_rows = rows.iter().filter(|r| r.scenario == Scenario::Base).count();
        assert_eq!(base_rows, 18);
    }

    #[test]
    fn test_unknown_scenario_is_an_error() {
        let csv = "month,scenario_name,planned_cash_inflow,planned_net_losses\n2023-01-01,upside,1.0,1.0\n";
        let err = load_budget_plan_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Unknown scenario_name"));
    }
}
