//! Unit test modules.

mod goal_evaluator_test;
mod variation_test;
