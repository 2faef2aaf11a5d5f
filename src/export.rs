//! CSV and JSON export of schedules, summaries and batch results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::amortization::{AmortizationEngine, ScheduleSummary, YearlyScheduleEntry};
use crate::error::Result;
use crate::scenario::ScenarioOutcome;

/// Schedule and summary bundled for a JSON download
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub generated_at: DateTime<Utc>,
    pub summary: ScheduleSummary,
    pub schedule: Vec<YearlyScheduleEntry>,
}

impl ExportDocument {
    /// Compute the schedule and summary for `years` years and stamp the document
    pub fn from_engine(engine: &mut AmortizationEngine, years: u32) -> Self {
        let schedule = engine.compute_schedule(years).to_vec();
        let summary = engine.get_summary(years);

        Self {
            generated_at: Utc::now(),
            summary,
            schedule,
        }
    }
}

/// One CSV row per batch scenario
#[derive(Debug, Serialize)]
struct BatchSummaryRow<'a> {
    scenario_id: &'a str,
    loan_amount: f64,
    annual_payment: f64,
    monthly_payment: f64,
    years: u32,
    total_interest: f64,
    total_amortization: f64,
    total_paid: f64,
    remaining_debt: f64,
    payoff_monthly_payment: Option<f64>,
    payoff_feasible: Option<bool>,
    payoff_years: Option<u32>,
    payoff_total_interest: Option<f64>,
    payoff_reason: Option<String>,
}

/// Write the schedule as CSV with a header row
pub fn write_schedule_csv<W: Write>(writer: W, schedule: &[YearlyScheduleEntry]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for entry in schedule {
        wtr.serialize(entry)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write an export document as pretty-printed JSON
pub fn write_json_export<W: Write>(mut writer: W, document: &ExportDocument) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, document)?;
    writeln!(writer)?;
    Ok(())
}

/// Write one summary row per scenario outcome
pub fn write_batch_summary_csv<W: Write>(writer: W, outcomes: &[ScenarioOutcome]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for outcome in outcomes {
        let summary = &outcome.summary;
        let payoff = outcome.payoff.as_ref();

        wtr.serialize(BatchSummaryRow {
            scenario_id: &outcome.scenario_id,
            loan_amount: summary.loan_amount,
            annual_payment: summary.annual_payment,
            monthly_payment: summary.monthly_payment,
            years: summary.years,
            total_interest: summary.total_interest,
            total_amortization: summary.total_amortization,
            total_paid: summary.total_paid(),
            remaining_debt: summary.remaining_debt,
            payoff_monthly_payment: payoff.map(|p| p.monthly_payment),
            payoff_feasible: payoff.map(|p| p.feasible),
            payoff_years: payoff.and_then(|p| p.years),
            payoff_total_interest: payoff.and_then(|p| p.total_interest),
            payoff_reason: payoff.and_then(|p| p.reason()),
        })?;
    }

    wtr.flush()?;
    Ok(())
}
