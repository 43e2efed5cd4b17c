//! Worker input data structures and scenario loading

mod data;
pub mod loader;

pub use data::{CalculationInput, InputError, RetirementPlan};
pub use loader::{load_scenarios, load_scenarios_from_reader, ScenarioRecord};
