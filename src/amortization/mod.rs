//! Amortization engine for yearly schedules and affordability projections

mod state;
mod engine;
mod schedule;
mod payoff;

pub use state::{DebtState, YearStep};
pub use engine::{
    AmortizationEngine, EngineConfig, DEFAULT_MAX_PAYOFF_YEARS, DEFAULT_PAYOFF_TOLERANCE,
};
pub use schedule::{cumulative_progress, CumulativeProgress, ScheduleSummary, YearlyScheduleEntry};
pub use payoff::{Infeasibility, PayoffResult};
