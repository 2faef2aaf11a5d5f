//! Financing Calculator - amortization schedules and affordability projections for property loans
//!
//! This library provides:
//! - Yearly amortization schedules from purchase price, equity, interest and initial amortization
//! - Summary statistics (interest paid, principal repaid, remaining debt)
//! - Payoff projections: years needed to repay the loan at an affordable monthly payment
//! - CSV/JSON loading and export, batch scenario runs

pub mod error;
pub mod loan;
pub mod amortization;
pub mod export;
pub mod scenario;
pub mod service;

// Re-export commonly used types
pub use error::{FinancingError, Result};
pub use loan::{LoanConfiguration, LoanScenario};
pub use amortization::{
    AmortizationEngine, EngineConfig, Infeasibility, PayoffResult, ScheduleSummary,
    YearlyScheduleEntry,
};
pub use scenario::ScenarioRunner;
