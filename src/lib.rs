//! KpiBoard - Sales KPI Dashboard
//!
//! Builds the slides of a rotating sales dashboard: revenue, order count,
//! average ticket, shipped weight and average price against the same period
//! one year earlier, with percent-of-goal for revenue and weight against a
//! configurable monthly goal table.

pub mod dashboard;
pub mod format;
pub mod goals;
pub mod metrics;
pub mod storage;

// Re-export commonly used types
pub use dashboard::{build_slides, Slide};
pub use goals::{evaluate_goal, GoalEvaluation, GoalMetric, GoalStatus, GoalTable, MonthlyGoal};
pub use metrics::{format_variation, DashboardData, KpiCalculator, MetricSnapshot, Variation};
pub use storage::config::AppConfig;
