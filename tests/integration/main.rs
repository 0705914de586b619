//! Integration test modules.

mod dashboard_refresh_test;
