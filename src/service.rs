//! Request/response layer shared by the CLI and the Lambda handler

use serde::{Deserialize, Serialize};

use crate::amortization::{
    cumulative_progress, AmortizationEngine, CumulativeProgress, EngineConfig, PayoffResult,
    ScheduleSummary, YearlyScheduleEntry,
};
use crate::error::{FinancingError, Result};
use crate::loan::LoanConfiguration;

/// Largest schedule a single request may ask for
pub const MAX_REQUEST_YEARS: u32 = 100;

fn default_years() -> u32 {
    10
}

/// Input for a financing calculation
#[derive(Debug, Clone, Deserialize)]
pub struct FinancingRequest {
    pub loan: LoanConfiguration,

    /// Number of schedule years to return (default: 10)
    #[serde(default = "default_years")]
    pub years: u32,

    /// Affordable monthly payment to project a payoff for
    #[serde(default)]
    pub monthly_payment: Option<f64>,

    /// Engine overrides (payoff ceiling, tolerance, lock-in)
    #[serde(default)]
    pub engine: Option<EngineConfig>,
}

/// Output from a financing calculation
#[derive(Debug, Clone, Serialize)]
pub struct FinancingResponse {
    pub summary: ScheduleSummary,
    pub total_paid: f64,
    pub interest_share: f64,
    pub schedule: Vec<YearlyScheduleEntry>,
    pub cumulative: Vec<CumulativeProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff: Option<PayoffResult>,
}

impl FinancingRequest {
    pub fn validate(&self) -> Result<()> {
        self.loan.validate()?;

        if self.years == 0 || self.years > MAX_REQUEST_YEARS {
            return Err(FinancingError::invalid_input(
                "years",
                format!("must be between 1 and {}, got {}", MAX_REQUEST_YEARS, self.years),
            ));
        }

        Ok(())
    }
}

/// Run a request on a fresh engine.
///
/// When a monthly payment is given and can repay the loan, the schedule and
/// summary are computed with that payment (it is locked into the engine
/// before the schedule is built).
pub fn handle_request(request: &FinancingRequest) -> Result<FinancingResponse> {
    request.validate()?;

    let config = request.engine.clone().unwrap_or_default();
    let mut engine = AmortizationEngine::with_config(request.loan.clone(), config);

    let payoff = request
        .monthly_payment
        .map(|payment| engine.compute_years_to_payoff(payment));

    let schedule = engine.compute_schedule(request.years).to_vec();
    let summary = engine.get_summary(request.years);
    let cumulative = cumulative_progress(&schedule);

    Ok(FinancingResponse {
        total_paid: summary.total_paid(),
        interest_share: summary.interest_share(),
        summary,
        schedule,
        cumulative,
        payoff,
    })
}

/// Parse a JSON request body and run it
pub fn handle_json(body: &str) -> Result<FinancingResponse> {
    let request: FinancingRequest = serde_json::from_str(body)?;
    handle_request(&request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_handle_json_defaults() {
        let body = r#"{"loan": {"purchase_price": 300000, "equity": 60000,
                       "interest_rate": 4.5, "initial_amortization": 3.0}}"#;
        let response = handle_json(body).unwrap();

        assert_eq!(response.schedule.len(), 10);
        assert_eq!(response.cumulative.len(), 10);
        assert!(response.payoff.is_none());
        assert_relative_eq!(response.summary.monthly_payment, 1_500.0, epsilon = 1e-9);
        assert_relative_eq!(
            response.total_paid,
            response.summary.total_interest + response.summary.total_amortization
        );
    }

    #[test]
    fn test_feasible_payoff_drives_schedule() {
        let request = FinancingRequest {
            loan: LoanConfiguration::new(100_000.0, 20_000.0, 0.0, 5.0),
            years: 7,
            monthly_payment: Some(1_000.0),
            engine: None,
        };
        let response = handle_request(&request).unwrap();

        let payoff = response.payoff.unwrap();
        assert_eq!(payoff.years, Some(7));
        assert_eq!(response.schedule[0].annual_payment, 12_000.0);
        assert_eq!(response.summary.monthly_payment, 1_000.0);
    }

    #[test]
    fn test_infeasible_payoff_keeps_formula_payment() {
        let request = FinancingRequest {
            loan: LoanConfiguration::new(300_000.0, 60_000.0, 4.5, 3.0),
            years: 5,
            monthly_payment: Some(500.0),
            engine: None,
        };
        let response = handle_request(&request).unwrap();

        assert!(!response.payoff.unwrap().feasible);
        assert_relative_eq!(response.schedule[0].annual_payment, 18_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_out_of_range_years() {
        let body = r#"{"loan": {"purchase_price": 1000}, "years": 0}"#;
        let err = handle_json(body).unwrap_err();
        assert!(matches!(err, FinancingError::InvalidInput { ref field, .. } if field == "years"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = handle_json("{not json").unwrap_err();
        assert!(matches!(err, FinancingError::Json(_)));
    }
}
