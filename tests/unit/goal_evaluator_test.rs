//! Unit tests for monthly goal evaluation.

use kpiboard::goals::{
    evaluate_goal, resolve_goal, resolve_goal_for_date, GoalMetric, GoalStatus, GoalTable,
    MonthlyGoal,
};

#[test]
fn test_every_month_resolves() {
    let table = GoalTable::default();
    for month in 1..=12 {
        let goal = resolve_goal(&table, month).expect("goal for every month");
        assert_eq!(goal.month, month);
        assert!(goal.weight_target > 0.0);
        assert!(goal.revenue_target > 0.0);
    }
}

#[test]
fn test_bad_dates_resolve_like_january() {
    let table = GoalTable::default();
    let january = resolve_goal(&table, 1);

    for date in [None, Some(""), Some("   "), Some("15-07-2025"), Some("15/99/2025"), Some("//")] {
        assert_eq!(resolve_goal_for_date(&table, date), january, "date {:?}", date);
    }
}

#[test]
fn test_weight_july_is_warning() {
    let table = GoalTable::default();
    let eval = evaluate_goal(130_000.0, Some("15/07/2025"), &table, GoalMetric::Weight);

    assert_eq!(eval.target, 150_000.0);
    assert!((eval.percent - 86.7).abs() < 0.05);
    assert_eq!(eval.status, GoalStatus::Warning);
}

#[test]
fn test_revenue_december_exactly_on_goal() {
    let table = GoalTable::default();
    let eval = evaluate_goal(1_409_516.02, Some("31/12/2025"), &table, GoalMetric::Revenue);

    assert_eq!(eval.target, 1_409_516.02);
    assert_eq!(eval.percent, 100.0);
    assert_eq!(eval.status, GoalStatus::Ok);
}

#[test]
fn test_zero_target_has_no_division_artifact() {
    let table = GoalTable::from_goals([MonthlyGoal::new(1, 0.0, 0.0)]).unwrap();
    let eval = evaluate_goal(0.0, Some("01/01/2026"), &table, GoalMetric::Weight);

    assert_eq!(eval.target, 0.0);
    assert_eq!(eval.percent, 0.0);
    assert!(eval.percent.is_finite());
    assert_eq!(eval.status, GoalStatus::Critical);
}

#[test]
fn test_status_bands() {
    let table = GoalTable::default();
    // March revenue goal: 1.598.757,69
    let target = table.get(3).unwrap().revenue_target;

    let at = |fraction: f64| {
        evaluate_goal(target * fraction, Some("10/03/2026"), &table, GoalMetric::Revenue).status
    };
    assert_eq!(at(1.2), GoalStatus::Ok);
    assert_eq!(at(0.9), GoalStatus::Warning);
    assert_eq!(at(0.5), GoalStatus::Critical);
}

#[test]
fn test_evaluation_is_idempotent() {
    let table = GoalTable::default();
    let first = evaluate_goal(987_654.32, Some("20/05/2026"), &table, GoalMetric::Revenue);
    let second = evaluate_goal(987_654.32, Some("20/05/2026"), &table, GoalMetric::Revenue);
    assert_eq!(first, second);
}
