//! Load loan configurations from JSON files and scenario batches from CSV

use super::{LoanConfiguration, LoanScenario};
use crate::error::{FinancingError, Result};
use csv::{Reader, Trim};
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Raw CSV row for a scenario batch
///
/// Optional columns may be left empty; they fall back to the calculator defaults.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    scenario_id: String,
    purchase_price: f64,
    equity: f64,
    interest_rate: f64,
    initial_amortization: f64,
    #[serde(default)]
    annual_special_payment: Option<f64>,
    #[serde(default)]
    interest_binding_years: Option<u32>,
    #[serde(default)]
    monthly_payment: Option<f64>,
}

impl CsvRow {
    fn into_scenario(self) -> Result<LoanScenario> {
        if self.scenario_id.trim().is_empty() {
            return Err(FinancingError::invalid_input("scenario_id", "must not be empty"));
        }

        let mut config = LoanConfiguration::new(
            self.purchase_price,
            self.equity,
            self.interest_rate,
            self.initial_amortization,
        )
        .with_special_payment(self.annual_special_payment.unwrap_or(0.0));

        // Blank or zero binding periods keep the default
        if let Some(years) = self.interest_binding_years.filter(|&y| y > 0) {
            config = config.with_interest_binding_years(years);
        }

        config.validate()?;

        if let Some(payment) = self.monthly_payment {
            if !payment.is_finite() {
                return Err(FinancingError::invalid_input(
                    "monthly_payment",
                    format!("must be a finite number, got {}", payment),
                ));
            }
        }

        Ok(LoanScenario {
            scenario_id: self.scenario_id,
            config,
            monthly_payment: self.monthly_payment,
        })
    }
}

/// Load a single loan configuration from a JSON file
pub fn load_configuration<P: AsRef<Path>>(path: P) -> Result<LoanConfiguration> {
    let file = File::open(path.as_ref())?;
    let config = load_configuration_from_reader(BufReader::new(file))?;
    debug!("Loaded loan configuration from {}", path.as_ref().display());
    Ok(config)
}

/// Load a single loan configuration from any JSON reader
pub fn load_configuration_from_reader<R: Read>(reader: R) -> Result<LoanConfiguration> {
    let config: LoanConfiguration = serde_json::from_reader(reader)?;
    config.validate()?;
    Ok(config)
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<LoanScenario>> {
    let file = File::open(path.as_ref())?;
    let scenarios = load_scenarios_from_reader(file)?;
    debug!("Loaded {} scenarios from {}", scenarios.len(), path.as_ref().display());
    Ok(scenarios)
}

/// Load scenarios from any reader (e.g., string buffer, network stream)
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<LoanScenario>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    read_scenarios(&mut csv_reader)
}

fn read_scenarios<R: Read>(reader: &mut Reader<R>) -> Result<Vec<LoanScenario>> {
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario()?);
    }

    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIOS: &str = "\
scenario_id,purchase_price,equity,interest_rate,initial_amortization,annual_special_payment,interest_binding_years,monthly_payment
base,300000,60000,4.5,3.0,,,
extra,500000,100000,3.5,2.0,5000,15,2000
";

    #[test]
    fn test_load_scenarios_from_reader() {
        let scenarios = load_scenarios_from_reader(SCENARIOS.as_bytes()).unwrap();
        assert_eq!(scenarios.len(), 2);

        let base = &scenarios[0];
        assert_eq!(base.scenario_id, "base");
        assert_eq!(base.config.loan_amount(), 240_000.0);
        assert_eq!(base.config.annual_special_payment, 0.0);
        assert_eq!(base.config.interest_binding_years, 10);
        assert_eq!(base.monthly_payment, None);

        let extra = &scenarios[1];
        assert_eq!(extra.config.annual_special_payment, 5_000.0);
        assert_eq!(extra.config.interest_binding_years, 15);
        assert_eq!(extra.monthly_payment, Some(2_000.0));
    }

    #[test]
    fn test_missing_optional_columns() {
        let csv = "scenario_id,purchase_price,equity,interest_rate,initial_amortization\n\
                   a,100000,20000,0,5\n";
        let scenarios = load_scenarios_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(scenarios[0].config.loan_amount(), 80_000.0);
        assert_eq!(scenarios[0].monthly_payment, None);
    }

    #[test]
    fn test_zero_binding_years_uses_default() {
        let csv = "scenario_id,purchase_price,equity,interest_rate,initial_amortization,interest_binding_years\n\
                   a,100000,20000,0,5,0\n";
        let scenarios = load_scenarios_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(scenarios[0].config.interest_binding_years, 10);
    }

    #[test]
    fn test_rejects_malformed_number() {
        let csv = "scenario_id,purchase_price,equity,interest_rate,initial_amortization\n\
                   a,lots,20000,0,5\n";
        let err = load_scenarios_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, FinancingError::Csv(_)));
    }

    #[test]
    fn test_rejects_empty_scenario_id() {
        let csv = "scenario_id,purchase_price,equity,interest_rate,initial_amortization\n\
                   ,100000,20000,0,5\n";
        let err = load_scenarios_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, FinancingError::InvalidInput { .. }));
    }

    #[test]
    fn test_load_configuration_from_reader() {
        let json = r#"{
            "purchase_price": 400000,
            "equity": 160000,
            "interest_rate": 3.5,
            "initial_amortization": 2.5
        }"#;
        let config = load_configuration_from_reader(json.as_bytes()).unwrap();

        assert_eq!(config.loan_amount(), 240_000.0);
        assert_eq!(config.interest_binding_years, 10);
    }
}
