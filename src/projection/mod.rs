//! Monthly income projection from the exit date to age 65

mod engine;
mod records;
mod state;

pub use engine::{ProjectionConfig, ProjectionEngine};
pub use records::{AnnualSummary, MonthlyRecord, ProjectionResult, ProjectionSummary};
pub use state::ProjectionState;
