//! Monthly goals module.
//!
//! Tracks the commercial plan:
//! - A month-indexed table of weight and revenue targets
//! - Percent-of-goal evaluation with a three-tier status band

pub mod evaluator;
pub mod types;

// Re-exports for convenience
pub use evaluator::{evaluate_goal, resolve_goal, resolve_goal_for_date, resolve_month};
pub use types::{GoalEvaluation, GoalMetric, GoalStatus, GoalTable, GoalTableError, MonthlyGoal};
