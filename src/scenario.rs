//! Scenario runner for batch schedule and affordability runs
//!
//! Every scenario gets its own engine, so the payment lock-in done by a
//! payoff computation never leaks from one scenario into another.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::amortization::{
    AmortizationEngine, EngineConfig, PayoffResult, ScheduleSummary, YearlyScheduleEntry,
};
use crate::loan::{LoanConfiguration, LoanScenario};

/// Schedule and summary for one loan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub summary: ScheduleSummary,
    pub schedule: Vec<YearlyScheduleEntry>,
}

/// Result of running a named scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario_id: String,

    /// Summary under the formula-derived payment plan
    pub summary: ScheduleSummary,

    /// Payoff projection, when the scenario names a monthly payment
    pub payoff: Option<PayoffResult>,
}

/// Runs many loan scenarios with one engine configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let scenarios = load_scenarios("scenarios.csv")?;
/// let outcomes = runner.run_batch(&scenarios, 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: EngineConfig,
}

impl ScenarioRunner {
    /// Create runner with the default engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn engine(&self, loan: &LoanConfiguration) -> AmortizationEngine {
        AmortizationEngine::with_config(loan.clone(), self.config.clone())
    }

    /// Compute schedule and summary for a single configuration
    pub fn run(&self, loan: &LoanConfiguration, years: u32) -> ScenarioResult {
        let mut engine = self.engine(loan);
        let schedule = engine.compute_schedule(years).to_vec();
        let summary = engine.get_summary(years);
        ScenarioResult { summary, schedule }
    }

    /// Run one named scenario.
    ///
    /// The summary is taken before the payoff query, so it always reflects the
    /// formula-derived payment rather than the scenario's monthly payment.
    pub fn run_scenario(&self, scenario: &LoanScenario, years: u32) -> ScenarioOutcome {
        let mut engine = self.engine(&scenario.config);
        let summary = engine.get_summary(years);
        let payoff = scenario
            .monthly_payment
            .map(|payment| engine.compute_years_to_payoff(payment));

        ScenarioOutcome {
            scenario_id: scenario.scenario_id.clone(),
            summary,
            payoff,
        }
    }

    /// Run scenarios in parallel; results keep the input order
    pub fn run_batch(&self, scenarios: &[LoanScenario], years: u32) -> Vec<ScenarioOutcome> {
        debug!("Running {} scenarios over {} years", scenarios.len(), years);
        scenarios
            .par_iter()
            .map(|scenario| self.run_scenario(scenario, years))
            .collect()
    }

    /// Payoff projection for each candidate monthly payment
    pub fn affordability_sweep(
        &self,
        loan: &LoanConfiguration,
        monthly_payments: &[f64],
    ) -> Vec<PayoffResult> {
        let engine = self.engine(loan);
        monthly_payments
            .par_iter()
            .map(|&payment| engine.evaluate_payoff(payment))
            .collect()
    }
}
