//! Goal type definitions.
//!
//! The goal table maps each calendar month to a weight target (kg) and a
//! revenue target. It is built once and handed to the evaluator by reference.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Targets for a single calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyGoal {
    /// Calendar month (1-12)
    pub month: u32,
    /// Weight target in kilograms
    pub weight_target: f64,
    /// Revenue target in BRL
    pub revenue_target: f64,
}

impl MonthlyGoal {
    /// Create a new monthly goal.
    pub fn new(month: u32, weight_target: f64, revenue_target: f64) -> Self {
        Self {
            month,
            weight_target,
            revenue_target,
        }
    }

    /// Get the target for the given metric.
    pub fn target_for(&self, metric: GoalMetric) -> f64 {
        match metric {
            GoalMetric::Weight => self.weight_target,
            GoalMetric::Revenue => self.revenue_target,
        }
    }
}

/// Metric a goal is tracked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalMetric {
    /// Total shipped weight
    Weight,
    /// Revenue including IPI
    Revenue,
}

impl GoalMetric {
    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            GoalMetric::Weight => "KG Total",
            GoalMetric::Revenue => "Faturamento",
        }
    }
}

impl std::fmt::Display for GoalMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Status band of a percent-of-goal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalStatus {
    /// At or above 100% of the goal
    Ok,
    /// Between 80% (inclusive) and 100%
    Warning,
    /// Below 80%, or no usable target
    Critical,
}

impl GoalStatus {
    /// Lower bound (inclusive) of the OK band.
    pub const OK_THRESHOLD: f64 = 100.0;
    /// Lower bound (inclusive) of the warning band.
    pub const WARNING_THRESHOLD: f64 = 80.0;

    /// Classify a percent-of-goal value.
    pub fn from_percent(percent: f64) -> Self {
        if percent >= Self::OK_THRESHOLD {
            GoalStatus::Ok
        } else if percent >= Self::WARNING_THRESHOLD {
            GoalStatus::Warning
        } else {
            GoalStatus::Critical
        }
    }

    /// CSS class used by the dashboard markup.
    pub fn css_class(&self) -> &'static str {
        match self {
            GoalStatus::Ok => "meta-ok",
            GoalStatus::Warning => "meta-atencao",
            GoalStatus::Critical => "meta-ruim",
        }
    }

    /// Get display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            GoalStatus::Ok => "Meta atingida",
            GoalStatus::Warning => "Atenção",
            GoalStatus::Critical => "Abaixo da meta",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Result of evaluating a metric against its monthly goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalEvaluation {
    /// Month the goal was resolved for
    pub month: u32,
    /// Target for that month (0 when the table has no entry)
    pub target: f64,
    /// Percent of goal reached
    pub percent: f64,
    /// Status band
    pub status: GoalStatus,
}

/// Errors raised while building a goal table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GoalTableError {
    #[error("Month {0} is outside 1-12")]
    InvalidMonth(u32),

    #[error("Month {0} is defined more than once")]
    DuplicateMonth(u32),

    #[error("Invalid {metric} target for month {month}: {value}")]
    InvalidTarget {
        month: u32,
        metric: GoalMetric,
        value: f64,
    },
}

/// Month-indexed goal table.
///
/// Serialized as a list of [`MonthlyGoal`] entries so it reads naturally in
/// TOML (`[[goals]]` blocks).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MonthlyGoal>", into = "Vec<MonthlyGoal>")]
pub struct GoalTable {
    goals: BTreeMap<u32, MonthlyGoal>,
}

impl GoalTable {
    /// Build a table, validating months and targets.
    pub fn from_goals(
        goals: impl IntoIterator<Item = MonthlyGoal>,
    ) -> Result<Self, GoalTableError> {
        let mut map = BTreeMap::new();

        for goal in goals {
            if !(1..=12).contains(&goal.month) {
                return Err(GoalTableError::InvalidMonth(goal.month));
            }
            for metric in [GoalMetric::Weight, GoalMetric::Revenue] {
                let value = goal.target_for(metric);
                if !value.is_finite() || value < 0.0 {
                    return Err(GoalTableError::InvalidTarget {
                        month: goal.month,
                        metric,
                        value,
                    });
                }
            }
            if map.insert(goal.month, goal).is_some() {
                return Err(GoalTableError::DuplicateMonth(goal.month));
            }
        }

        Ok(Self { goals: map })
    }

    /// Get the goal for a month, if the table defines one.
    pub fn get(&self, month: u32) -> Option<&MonthlyGoal> {
        self.goals.get(&month)
    }

    /// Number of months defined.
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Whether every month 1-12 has a goal.
    pub fn is_complete(&self) -> bool {
        (1..=12).all(|m| self.goals.contains_key(&m))
    }

    /// Iterate goals in month order.
    pub fn iter(&self) -> impl Iterator<Item = &MonthlyGoal> {
        self.goals.values()
    }
}

impl Default for GoalTable {
    /// The commercial plan targets (kg, BRL) per month.
    fn default() -> Self {
        const PLAN: [(u32, f64, f64); 12] = [
            (1, 100_000.0, 1_324_746.56),
            (2, 100_000.0, 1_324_746.56),
            (3, 120_000.0, 1_598_757.69),
            (4, 130_000.0, 1_910_459.23),
            (5, 130_000.0, 1_892_998.21),
            (6, 130_000.0, 1_892_995.74),
            (7, 150_000.0, 2_199_365.46),
            (8, 150_000.0, 2_199_350.47),
            (9, 150_000.0, 2_199_340.46),
            (10, 150_000.0, 2_199_335.81),
            (11, 150_000.0, 2_199_360.62),
            (12, 98_000.0, 1_409_516.02),
        ];

        let goals = PLAN
            .iter()
            .map(|&(month, kg, revenue)| (month, MonthlyGoal::new(month, kg, revenue)))
            .collect();

        Self { goals }
    }
}

impl TryFrom<Vec<MonthlyGoal>> for GoalTable {
    type Error = GoalTableError;

    fn try_from(goals: Vec<MonthlyGoal>) -> Result<Self, Self::Error> {
        Self::from_goals(goals)
    }
}

impl From<GoalTable> for Vec<MonthlyGoal> {
    fn from(table: GoalTable) -> Self {
        table.goals.into_values().collect()
    }
}
