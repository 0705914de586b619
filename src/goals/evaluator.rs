//! Percent-of-goal evaluation.
//!
//! Every input degrades to a displayable result: an unusable reference date
//! resolves to month 1 and a missing or zero target yields 0% / Critical.

use super::types::{GoalEvaluation, GoalMetric, GoalStatus, GoalTable, MonthlyGoal};

/// Month used when the reference date cannot be read.
pub const DEFAULT_MONTH: u32 = 1;

/// Extract the month from a `dd/mm/yyyy` date.
///
/// Falls back to [`DEFAULT_MONTH`] when the date is absent, has no `/`
/// separator, or the month field is not a number in 1-12.
pub fn resolve_month(reference_date: Option<&str>) -> u32 {
    let month = reference_date
        .filter(|date| date.contains('/'))
        .and_then(|date| date.split('/').nth(1))
        .and_then(|field| field.trim().parse::<u32>().ok())
        .filter(|month| (1..=12).contains(month));

    match month {
        Some(month) => month,
        None => {
            tracing::debug!(
                "Reference date {:?} has no usable month, using month {}",
                reference_date,
                DEFAULT_MONTH
            );
            DEFAULT_MONTH
        }
    }
}

/// Look up the goal for a month, falling back to month 1 when out of range.
pub fn resolve_goal(table: &GoalTable, month: u32) -> Option<&MonthlyGoal> {
    let month = if (1..=12).contains(&month) {
        month
    } else {
        DEFAULT_MONTH
    };
    table.get(month)
}

/// Look up the goal for the month of a `dd/mm/yyyy` date.
pub fn resolve_goal_for_date<'a>(
    table: &'a GoalTable,
    reference_date: Option<&str>,
) -> Option<&'a MonthlyGoal> {
    resolve_goal(table, resolve_month(reference_date))
}

/// Percent of `target` reached by `current`, or `None` when undefined.
fn percent_of(current: f64, target: f64) -> Option<f64> {
    if target == 0.0 || !target.is_finite() {
        return None;
    }
    let percent = current / target * 100.0;
    percent.is_finite().then_some(percent)
}

/// Evaluate a metric value against the goal for the reference date's month.
pub fn evaluate_goal(
    current: f64,
    reference_date: Option<&str>,
    table: &GoalTable,
    metric: GoalMetric,
) -> GoalEvaluation {
    let month = resolve_month(reference_date);
    let target = resolve_goal(table, month)
        .map(|goal| goal.target_for(metric))
        .unwrap_or(0.0);

    evaluate_against(month, current, target)
}

/// Evaluate a metric value against an explicit target.
pub fn evaluate_against(month: u32, current: f64, target: f64) -> GoalEvaluation {
    match percent_of(current, target) {
        Some(percent) => GoalEvaluation {
            month,
            target,
            percent,
            status: GoalStatus::from_percent(percent),
        },
        None => {
            tracing::debug!("No usable target for month {}, reporting 0%", month);
            GoalEvaluation {
                month,
                target,
                percent: 0.0,
                status: GoalStatus::Critical,
            }
        }
    }
}
