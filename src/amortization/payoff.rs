//! Result types for the affordability (years-to-payoff) computation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a payoff computation could not reach zero debt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Infeasibility {
    /// Monthly payment was zero or negative; nothing was simulated
    NonPositivePayment { monthly_payment: f64 },

    /// Payment plus special payment did not exceed the interest due
    InsufficientPayment {
        monthly_payment: f64,
        annual_payment: f64,
        interest_due: f64,
        year: u32,
    },

    /// Debt was still outstanding after the maximum number of years
    HorizonExceeded { max_years: u32 },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::NonPositivePayment { monthly_payment } => {
                write!(f, "Payment must be positive (got {:.2})", monthly_payment)
            }
            Infeasibility::InsufficientPayment {
                monthly_payment,
                interest_due,
                year,
                ..
            } => write!(
                f,
                "Payment of {:.2} per month is insufficient to cover interest of {:.2} in year {}",
                monthly_payment, interest_due, year
            ),
            Infeasibility::HorizonExceeded { max_years } => {
                write!(f, "Loan would take too long to pay off (more than {} years)", max_years)
            }
        }
    }
}

/// Outcome of a single simulated payoff year
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PayoffStep {
    /// Debt reduced, still outstanding
    Continue,
    /// Remaining debt fell below the tolerance
    FullyPaid,
    /// Amortization was zero or negative
    InsufficientPayment { interest_due: f64 },
}

/// Result of an affordability computation
///
/// Feasible and infeasible outcomes share this shape; callers branch on
/// `feasible` rather than on an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffResult {
    pub feasible: bool,

    /// Years until payoff. `Some(0)` when the payment was rejected up front,
    /// `None` when the simulation ran but did not pay off the loan.
    pub years: Option<u32>,

    /// Interest paid until payoff (same convention as `years`)
    pub total_interest: Option<f64>,

    /// Debt left at the end of the computation
    pub remaining_debt: f64,

    pub annual_payment: f64,
    pub monthly_payment: f64,
    pub loan_amount: f64,
    pub interest_rate: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infeasibility: Option<Infeasibility>,
}

impl PayoffResult {
    pub(crate) fn paid_off(
        years: u32,
        total_interest: f64,
        remaining_debt: f64,
        monthly_payment: f64,
        loan_amount: f64,
        interest_rate: f64,
    ) -> Self {
        Self {
            feasible: true,
            years: Some(years),
            total_interest: Some(total_interest),
            remaining_debt: remaining_debt.max(0.0),
            annual_payment: monthly_payment * 12.0,
            monthly_payment,
            loan_amount,
            interest_rate,
            infeasibility: None,
        }
    }

    pub(crate) fn infeasible(
        reason: Infeasibility,
        remaining_debt: f64,
        monthly_payment: f64,
        loan_amount: f64,
        interest_rate: f64,
    ) -> Self {
        // Rejected inputs never start simulating: zero years, zero interest
        let (years, total_interest) = match reason {
            Infeasibility::NonPositivePayment { .. } => (Some(0), Some(0.0)),
            _ => (None, None),
        };

        Self {
            feasible: false,
            years,
            total_interest,
            remaining_debt,
            annual_payment: monthly_payment * 12.0,
            monthly_payment,
            loan_amount,
            interest_rate,
            infeasibility: Some(reason),
        }
    }

    /// Human-readable reason for an infeasible result
    pub fn reason(&self) -> Option<String> {
        self.infeasibility.map(|i| i.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_reason_names_payment() {
        let reason = Infeasibility::InsufficientPayment {
            monthly_payment: 500.0,
            annual_payment: 6_000.0,
            interest_due: 10_800.0,
            year: 1,
        }
        .to_string();

        assert!(reason.contains("insufficient"));
        assert!(reason.contains("500.00"));
    }

    #[test]
    fn test_rejected_payment_shape() {
        let result = PayoffResult::infeasible(
            Infeasibility::NonPositivePayment { monthly_payment: 0.0 },
            240_000.0,
            0.0,
            240_000.0,
            4.5,
        );

        assert!(!result.feasible);
        assert_eq!(result.years, Some(0));
        assert_eq!(result.remaining_debt, 240_000.0);
        assert!(result.reason().unwrap().contains("must be positive"));
    }

    #[test]
    fn test_serialized_kind_tag() {
        let result = PayoffResult::infeasible(
            Infeasibility::HorizonExceeded { max_years: 500 },
            1_000.0,
            10.0,
            50_000.0,
            1.0,
        );
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["infeasibility"]["kind"], "horizon_exceeded");
        assert_eq!(json["years"], serde_json::Value::Null);
    }

    #[test]
    fn test_feasible_clamps_remaining_debt() {
        let result = PayoffResult::paid_off(7, 0.0, -0.0, 1_000.0, 80_000.0, 0.0);

        assert!(result.feasible);
        assert_eq!(result.annual_payment, 12_000.0);
        assert_eq!(result.remaining_debt, 0.0);
        assert!(result.reason().is_none());
    }
}
