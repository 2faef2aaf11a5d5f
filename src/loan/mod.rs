//! Loan inputs and scenario loading

mod data;
pub mod loader;

pub use data::{LoanConfiguration, LoanScenario};
pub use loader::{
    load_configuration, load_configuration_from_reader, load_scenarios,
    load_scenarios_from_reader,
};
