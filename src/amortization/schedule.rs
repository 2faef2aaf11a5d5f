//! Schedule output structures for amortization runs

use serde::{Deserialize, Serialize};

/// A single row of the yearly amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyScheduleEntry {
    /// Year of the loan (1-indexed)
    pub year: u32,

    /// Principal outstanding at the start of the year
    pub debt_start: f64,

    /// Fixed payment for the year (interest plus regular repayment)
    pub annual_payment: f64,

    /// Interest portion: debt_start * rate
    pub interest_payment: f64,

    /// Principal repaid: annual payment - interest + special payment
    pub amortization: f64,

    /// Principal outstanding at the end of the year
    pub debt_end: f64,
}

/// Summary statistics over the first `years` entries of a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    // Inputs
    pub purchase_price: f64,
    pub equity: f64,
    pub interest_rate: f64,
    pub initial_amortization: f64,
    pub annual_special_payment: f64,
    pub interest_binding_years: u32,

    // Payment plan
    pub loan_amount: f64,
    pub annual_payment: f64,
    pub monthly_payment: f64,

    // Aggregates
    pub years: u32,
    pub total_interest: f64,
    pub total_amortization: f64,
    pub remaining_debt: f64,
}

impl ScheduleSummary {
    /// Everything paid over the window: principal repaid plus interest
    pub fn total_paid(&self) -> f64 {
        self.total_amortization + self.total_interest
    }

    /// Fraction of total payments that went to interest
    pub fn interest_share(&self) -> f64 {
        let total_paid = self.total_paid();
        if total_paid == 0.0 {
            0.0
        } else {
            self.total_interest / total_paid
        }
    }

    /// Fraction of the loan amount repaid over the window
    pub fn repaid_share(&self) -> f64 {
        if self.loan_amount == 0.0 {
            0.0
        } else {
            self.total_amortization / self.loan_amount
        }
    }
}

/// Running totals at the end of a schedule year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativeProgress {
    pub year: u32,
    pub cumulative_amortization: f64,
    pub cumulative_interest: f64,
    pub debt_end: f64,
}

/// Running sums of amortization and interest for each schedule entry
pub fn cumulative_progress(schedule: &[YearlyScheduleEntry]) -> Vec<CumulativeProgress> {
    let mut cumulative_amortization = 0.0;
    let mut cumulative_interest = 0.0;

    schedule
        .iter()
        .map(|entry| {
            cumulative_amortization += entry.amortization;
            cumulative_interest += entry.interest_payment;
            CumulativeProgress {
                year: entry.year,
                cumulative_amortization,
                cumulative_interest,
                debt_end: entry.debt_end,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn entry(year: u32, debt_start: f64, interest: f64, amortization: f64) -> YearlyScheduleEntry {
        YearlyScheduleEntry {
            year,
            debt_start,
            annual_payment: interest + amortization,
            interest_payment: interest,
            amortization,
            debt_end: debt_start - amortization,
        }
    }

    fn summary(total_interest: f64, total_amortization: f64, loan_amount: f64) -> ScheduleSummary {
        ScheduleSummary {
            purchase_price: loan_amount,
            equity: 0.0,
            interest_rate: 4.5,
            initial_amortization: 3.0,
            annual_special_payment: 0.0,
            interest_binding_years: 10,
            loan_amount,
            annual_payment: 0.0,
            monthly_payment: 0.0,
            years: 1,
            total_interest,
            total_amortization,
            remaining_debt: loan_amount - total_amortization,
        }
    }

    #[test]
    fn test_cumulative_progress() {
        let schedule = vec![
            entry(1, 240_000.0, 10_800.0, 7_200.0),
            entry(2, 232_800.0, 10_476.0, 7_524.0),
        ];
        let progress = cumulative_progress(&schedule);

        assert_eq!(progress.len(), 2);
        assert_eq!(progress[1].year, 2);
        assert_relative_eq!(progress[1].cumulative_interest, 21_276.0);
        assert_relative_eq!(progress[1].cumulative_amortization, 14_724.0);
        assert_relative_eq!(progress[1].debt_end, 225_276.0);
    }

    #[test]
    fn test_cumulative_progress_empty() {
        assert!(cumulative_progress(&[]).is_empty());
    }

    #[test]
    fn test_cost_distribution() {
        let s = summary(10_800.0, 7_200.0, 240_000.0);

        assert_relative_eq!(s.total_paid(), 18_000.0);
        assert_relative_eq!(s.interest_share(), 0.6);
        assert_relative_eq!(s.repaid_share(), 0.03);
    }

    #[test]
    fn test_shares_without_loan() {
        let s = summary(0.0, 0.0, 0.0);

        assert_eq!(s.interest_share(), 0.0);
        assert_eq!(s.repaid_share(), 0.0);
    }
}
