//! Loan configuration matching the calculator input form

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{FinancingError, Result};

/// Default interest binding period in years
fn default_interest_binding_years() -> u32 {
    10
}

/// Explicit nulls count as zero, like missing fields
fn zero_if_null<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// A null or zero binding period falls back to the default
fn binding_years_or_default<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?
        .filter(|&years| years > 0)
        .unwrap_or_else(default_interest_binding_years))
}

/// Inputs for a single property financing
///
/// Rates are annual and expressed in percent (4.5 means 4.5%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanConfiguration {
    /// Purchase price of the property
    #[serde(default, deserialize_with = "zero_if_null")]
    pub purchase_price: f64,

    /// Equity brought in by the buyer
    /// Conventionally <= purchase price, but not enforced
    #[serde(default, deserialize_with = "zero_if_null")]
    pub equity: f64,

    /// Annual interest rate in percent
    #[serde(default, deserialize_with = "zero_if_null")]
    pub interest_rate: f64,

    /// Initial amortization rate in percent
    #[serde(default, deserialize_with = "zero_if_null")]
    pub initial_amortization: f64,

    /// Extra repayment applied to principal every year
    #[serde(default, deserialize_with = "zero_if_null")]
    pub annual_special_payment: f64,

    /// Fixed-rate period in years (display only)
    #[serde(
        default = "default_interest_binding_years",
        deserialize_with = "binding_years_or_default"
    )]
    pub interest_binding_years: u32,
}

impl LoanConfiguration {
    /// Create a configuration with no special payment and a 10 year binding period
    pub fn new(
        purchase_price: f64,
        equity: f64,
        interest_rate: f64,
        initial_amortization: f64,
    ) -> Self {
        Self {
            purchase_price,
            equity,
            interest_rate,
            initial_amortization,
            annual_special_payment: 0.0,
            interest_binding_years: default_interest_binding_years(),
        }
    }

    pub fn with_special_payment(mut self, annual_special_payment: f64) -> Self {
        self.annual_special_payment = annual_special_payment;
        self
    }

    pub fn with_interest_binding_years(mut self, years: u32) -> Self {
        self.interest_binding_years = years;
        self
    }

    /// Borrowed amount: purchase price minus equity (may be negative)
    pub fn loan_amount(&self) -> f64 {
        self.purchase_price - self.equity
    }

    /// Interest rate as a decimal fraction
    pub fn rate(&self) -> f64 {
        self.interest_rate / 100.0
    }

    /// Annual payment implied by interest rate plus initial amortization
    pub fn initial_annual_payment(&self) -> f64 {
        self.loan_amount() * (self.rate() + self.initial_amortization / 100.0)
    }

    /// Reject values the engine cannot meaningfully simulate (NaN, infinities).
    ///
    /// Degenerate but finite inputs (equity above the purchase price, zero rates)
    /// are accepted; equity above price only logs a warning.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("purchase_price", self.purchase_price),
            ("equity", self.equity),
            ("interest_rate", self.interest_rate),
            ("initial_amortization", self.initial_amortization),
            ("annual_special_payment", self.annual_special_payment),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(FinancingError::invalid_input(
                    field,
                    format!("must be a finite number, got {}", value),
                ));
            }
        }

        if self.equity > self.purchase_price {
            warn!(
                "Equity {:.2} exceeds purchase price {:.2}; loan amount is negative",
                self.equity, self.purchase_price
            );
        }

        Ok(())
    }
}

impl Default for LoanConfiguration {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// A named loan configuration, optionally paired with an affordable monthly payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanScenario {
    /// Identifier used to label batch output
    pub scenario_id: String,

    pub config: LoanConfiguration,

    /// Monthly payment to test for payoff, if any
    #[serde(default)]
    pub monthly_payment: Option<f64>,
}

impl LoanScenario {
    pub fn new(scenario_id: impl Into<String>, config: LoanConfiguration) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            config,
            monthly_payment: None,
        }
    }

    pub fn with_monthly_payment(mut self, monthly_payment: f64) -> Self {
        self.monthly_payment = Some(monthly_payment);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_basic_configuration() {
        let config = LoanConfiguration::new(300_000.0, 60_000.0, 4.5, 3.0);

        assert_eq!(config.purchase_price, 300_000.0);
        assert_eq!(config.equity, 60_000.0);
        assert_eq!(config.annual_special_payment, 0.0);
        assert_eq!(config.interest_binding_years, 10);
    }

    #[test]
    fn test_builder_overrides() {
        let config = LoanConfiguration::new(500_000.0, 100_000.0, 3.5, 2.0)
            .with_special_payment(5_000.0)
            .with_interest_binding_years(15);

        assert_eq!(config.annual_special_payment, 5_000.0);
        assert_eq!(config.interest_binding_years, 15);
    }

    #[test]
    fn test_derived_amounts() {
        let config = LoanConfiguration::new(300_000.0, 60_000.0, 4.5, 3.0);

        assert_eq!(config.loan_amount(), 240_000.0);
        assert_relative_eq!(config.initial_annual_payment(), 18_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_loan_is_permitted() {
        let config = LoanConfiguration::new(100_000.0, 120_000.0, 4.0, 2.0);

        assert!(config.validate().is_ok());
        assert_eq!(config.loan_amount(), -20_000.0);
        assert!(config.initial_annual_payment() < 0.0);
    }

    #[test]
    fn test_validate_rejects_nan() {
        let config = LoanConfiguration::new(f64::NAN, 0.0, 4.0, 2.0);

        match config.validate() {
            Err(FinancingError::InvalidInput { field, .. }) => assert_eq!(field, "purchase_price"),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: LoanConfiguration =
            serde_json::from_str(r#"{"purchase_price": 250000, "interest_rate": 3.0}"#).unwrap();

        assert_eq!(config.equity, 0.0);
        assert_eq!(config.initial_amortization, 0.0);
        assert_eq!(config.annual_special_payment, 0.0);
        assert_eq!(config.interest_binding_years, 10);
    }

    #[test]
    fn test_null_fields_use_defaults() {
        let config: LoanConfiguration = serde_json::from_str(
            r#"{"purchase_price": 250000, "equity": null, "interest_rate": 3.0,
                "initial_amortization": null, "annual_special_payment": null,
                "interest_binding_years": null}"#,
        )
        .unwrap();

        assert_eq!(config.equity, 0.0);
        assert_eq!(config.initial_amortization, 0.0);
        assert_eq!(config.annual_special_payment, 0.0);
        assert_eq!(config.interest_binding_years, 10);
    }

    #[test]
    fn test_zero_binding_years_uses_default() {
        let config: LoanConfiguration =
            serde_json::from_str(r#"{"purchase_price": 250000, "interest_binding_years": 0}"#)
                .unwrap();

        assert_eq!(config.interest_binding_years, 10);
    }
}
