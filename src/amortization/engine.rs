//! Core amortization engine for yearly schedules and payoff projections

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::loan::LoanConfiguration;
use super::payoff::{Infeasibility, PayoffResult, PayoffStep};
use super::schedule::{ScheduleSummary, YearlyScheduleEntry};
use super::state::DebtState;

/// Default cap on simulated years for a payoff computation
pub const DEFAULT_MAX_PAYOFF_YEARS: u32 = 500;

/// Default remaining debt below which a loan counts as paid off
pub const DEFAULT_PAYOFF_TOLERANCE: f64 = 1.0;

fn default_max_payoff_years() -> u32 {
    DEFAULT_MAX_PAYOFF_YEARS
}

fn default_payoff_tolerance() -> f64 {
    DEFAULT_PAYOFF_TOLERANCE
}

fn default_lock_in() -> bool {
    true
}

/// Configuration for the payoff simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Safety ceiling on simulated years (not a modeled loan term)
    #[serde(default = "default_max_payoff_years")]
    pub max_payoff_years: u32,

    /// Remaining debt below this amount is treated as fully repaid
    #[serde(default = "default_payoff_tolerance")]
    pub payoff_tolerance: f64,

    /// Whether a feasible payoff replaces the engine's payment plan
    #[serde(default = "default_lock_in")]
    pub lock_in_payoff_payment: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_payoff_years: DEFAULT_MAX_PAYOFF_YEARS,
            payoff_tolerance: DEFAULT_PAYOFF_TOLERANCE,
            lock_in_payoff_payment: true,
        }
    }
}

impl EngineConfig {
    /// Read overrides from PAYOFF_MAX_YEARS, PAYOFF_TOLERANCE and PAYOFF_LOCK_IN.
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            max_payoff_years: lookup("PAYOFF_MAX_YEARS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_payoff_years),
            payoff_tolerance: lookup("PAYOFF_TOLERANCE")
                .and_then(|s| s.parse::<f64>().ok())
                .and_then(|tolerance| {
                    if tolerance.is_finite() && tolerance > 0.0 {
                        Some(tolerance)
                    } else {
                        warn!(
                            "Ignoring PAYOFF_TOLERANCE={}: must be a positive number",
                            tolerance
                        );
                        None
                    }
                })
                .unwrap_or(defaults.payoff_tolerance),
            lock_in_payoff_payment: lookup("PAYOFF_LOCK_IN")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.lock_in_payoff_payment),
        }
    }
}

/// Main amortization engine
///
/// Built from one loan configuration. The payment plan (annual and monthly
/// payment) is derived at construction and only changes through
/// [`AmortizationEngine::apply_payment_plan`], which
/// [`AmortizationEngine::compute_years_to_payoff`] calls on success.
#[derive(Debug, Clone)]
pub struct AmortizationEngine {
    loan: LoanConfiguration,
    config: EngineConfig,
    loan_amount: f64,
    annual_payment: f64,
    monthly_payment: f64,

    /// Last computed schedule; cleared whenever the payment plan changes
    schedule: Vec<YearlyScheduleEntry>,
}

impl AmortizationEngine {
    /// Create an engine with the default payoff configuration
    pub fn new(loan: LoanConfiguration) -> Self {
        Self::with_config(loan, EngineConfig::default())
    }

    /// Create an engine with an explicit payoff configuration
    pub fn with_config(loan: LoanConfiguration, config: EngineConfig) -> Self {
        let loan_amount = loan.loan_amount();
        let annual_payment = loan.initial_annual_payment();

        Self {
            loan,
            config,
            loan_amount,
            annual_payment,
            monthly_payment: annual_payment / 12.0,
            schedule: Vec::new(),
        }
    }

    pub fn loan(&self) -> &LoanConfiguration {
        &self.loan
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn loan_amount(&self) -> f64 {
        self.loan_amount
    }

    pub fn annual_payment(&self) -> f64 {
        self.annual_payment
    }

    pub fn monthly_payment(&self) -> f64 {
        self.monthly_payment
    }

    /// The most recently computed schedule (empty until one is requested)
    pub fn schedule(&self) -> &[YearlyScheduleEntry] {
        &self.schedule
    }

    /// Compute the forward schedule for `years` years.
    ///
    /// Debt is not floored at zero: overpayment in later years shows up as
    /// negative debt, and a payment below the interest due grows the debt.
    /// The cached schedule is reused when it already has exactly `years`
    /// entries and is regenerated otherwise.
    pub fn compute_schedule(&mut self, years: u32) -> &[YearlyScheduleEntry] {
        if self.schedule.len() != years as usize {
            self.schedule = self.build_schedule(years);
            debug!(
                "Computed {} year schedule for loan {:.2} at annual payment {:.2}",
                years, self.loan_amount, self.annual_payment
            );
        }
        &self.schedule
    }

    fn build_schedule(&self, years: u32) -> Vec<YearlyScheduleEntry> {
        let rate = self.loan.rate();
        let special = self.loan.annual_special_payment;
        let mut state = DebtState::from_loan_amount(self.loan_amount);
        let mut schedule = Vec::with_capacity(years as usize);

        for _ in 0..years {
            let interest = state.interest_due(rate);
            let amortization = self.annual_payment - interest + special;
            let step = state.advance_year(interest, amortization);

            trace!(
                "Year {}: start {:.2} interest {:.2} amortization {:.2} end {:.2}",
                state.year, step.debt_start, step.interest, step.amortization, step.debt_end
            );

            schedule.push(YearlyScheduleEntry {
                year: state.year,
                debt_start: step.debt_start,
                annual_payment: self.annual_payment,
                interest_payment: step.interest,
                amortization: step.amortization,
                debt_end: step.debt_end,
            });
        }

        schedule
    }

    /// Summary over the first `years` years of the schedule.
    ///
    /// Computes the schedule first if none is cached or the cached one is too
    /// short. A longer cached schedule is reused; its prefix is identical.
    pub fn get_summary(&mut self, years: u32) -> ScheduleSummary {
        if self.schedule.len() < years as usize {
            self.compute_schedule(years);
        }

        let window = &self.schedule[..(years as usize).min(self.schedule.len())];
        let total_interest: f64 = window.iter().map(|e| e.interest_payment).sum();
        let total_amortization: f64 = window.iter().map(|e| e.amortization).sum();

        // No years simulated means the full loan is still outstanding
        let remaining_debt = match years {
            0 => self.loan_amount,
            n => self
                .schedule
                .get(n as usize - 1)
                .map(|e| e.debt_end)
                .unwrap_or(0.0),
        };

        ScheduleSummary {
            purchase_price: self.loan.purchase_price,
            equity: self.loan.equity,
            interest_rate: self.loan.interest_rate,
            initial_amortization: self.loan.initial_amortization,
            annual_special_payment: self.loan.annual_special_payment,
            interest_binding_years: self.loan.interest_binding_years,
            loan_amount: self.loan_amount,
            annual_payment: self.annual_payment,
            monthly_payment: self.monthly_payment,
            years,
            total_interest,
            total_amortization,
            remaining_debt,
        }
    }

    /// How many years an affordable monthly payment needs to repay the loan.
    ///
    /// NOTE: on a feasible result this also replaces the engine's payment plan
    /// with `monthly_payment` (unless `lock_in_payoff_payment` is disabled), so
    /// later `compute_schedule` / `get_summary` calls use the affordable payment.
    /// Use [`AmortizationEngine::evaluate_payoff`] for a side-effect-free query.
    pub fn compute_years_to_payoff(&mut self, monthly_payment: f64) -> PayoffResult {
        let result = self.evaluate_payoff(monthly_payment);
        if self.config.lock_in_payoff_payment {
            self.apply_payment_plan(&result);
        }
        result
    }

    /// Simulate repayment at `monthly_payment` without touching the engine.
    ///
    /// Unlike the forward schedule, the final year's repayment is capped at the
    /// outstanding debt, so debt never goes below zero here.
    pub fn evaluate_payoff(&self, monthly_payment: f64) -> PayoffResult {
        let rate = self.loan.interest_rate;

        if monthly_payment <= 0.0 || monthly_payment.is_nan() {
            info!("Rejected payoff query: monthly payment {:.2} is not positive", monthly_payment);
            return PayoffResult::infeasible(
                Infeasibility::NonPositivePayment { monthly_payment },
                self.loan_amount,
                monthly_payment,
                self.loan_amount,
                rate,
            );
        }

        let annual_payment = monthly_payment * 12.0;
        let mut state = DebtState::from_loan_amount(self.loan_amount);

        while state.year < self.config.max_payoff_years {
            match self.payoff_year(&mut state, annual_payment) {
                PayoffStep::Continue => {}
                PayoffStep::FullyPaid => {
                    info!(
                        "Loan of {:.2} paid off in {} years at {:.2} per month",
                        self.loan_amount, state.year, monthly_payment
                    );
                    return PayoffResult::paid_off(
                        state.year,
                        state.total_interest,
                        state.remaining_debt,
                        monthly_payment,
                        self.loan_amount,
                        rate,
                    );
                }
                PayoffStep::InsufficientPayment { interest_due } => {
                    let reason = Infeasibility::InsufficientPayment {
                        monthly_payment,
                        annual_payment,
                        interest_due,
                        year: state.year + 1,
                    };
                    info!("{}", reason);
                    // Report the original loan, not the partially repaid balance
                    return PayoffResult::infeasible(
                        reason,
                        self.loan_amount,
                        monthly_payment,
                        self.loan_amount,
                        rate,
                    );
                }
            }
        }

        let reason = Infeasibility::HorizonExceeded {
            max_years: self.config.max_payoff_years,
        };
        info!("{} (remaining debt {:.2})", reason, state.remaining_debt);
        PayoffResult::infeasible(
            reason,
            state.remaining_debt,
            monthly_payment,
            self.loan_amount,
            rate,
        )
    }

    /// Simulate one payoff year
    fn payoff_year(&self, state: &mut DebtState, annual_payment: f64) -> PayoffStep {
        let interest = state.interest_due(self.loan.rate());
        let mut amortization = annual_payment - interest + self.loan.annual_special_payment;

        if amortization <= 0.0 {
            return PayoffStep::InsufficientPayment { interest_due: interest };
        }

        // Final year: repay exactly what is left
        if amortization > state.remaining_debt {
            amortization = state.remaining_debt;
        }

        let step = state.advance_year(interest, amortization);
        trace!(
            "Payoff year {}: interest {:.2} amortization {:.2} remaining {:.2}",
            state.year, step.interest, step.amortization, step.debt_end
        );

        // Exact zero after the final-year cap counts as paid for any tolerance
        if state.remaining_debt <= 0.0 || state.remaining_debt < self.config.payoff_tolerance {
            state.remaining_debt = 0.0;
            PayoffStep::FullyPaid
        } else {
            PayoffStep::Continue
        }
    }

    /// Adopt the payment from a feasible payoff result as the engine's plan.
    ///
    /// Returns whether the plan changed. Infeasible results are ignored.
    pub fn apply_payment_plan(&mut self, result: &PayoffResult) -> bool {
        if !result.feasible {
            return false;
        }

        self.annual_payment = result.annual_payment;
        self.monthly_payment = result.monthly_payment;
        self.schedule.clear();

        debug!(
            "Payment plan locked in at {:.2} per month ({:.2} per year)",
            self.monthly_payment, self.annual_payment
        );
        true
    }
}
