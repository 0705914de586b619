//! KPI snapshots as consumed by the dashboard.
//!
//! These are the canonical, already-normalized shapes. File formats live in
//! [`crate::storage::data_files`].

use serde::{Deserialize, Serialize};

/// Current value against the same period one year earlier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub current: f64,
    pub prior_year: f64,
    /// Percent change vs prior year, absent when the prior value was zero.
    pub percent_change: Option<f64>,
}

impl MetricSnapshot {
    /// Create a snapshot with the percent change derived from both values.
    pub fn from_values(current: f64, prior_year: f64) -> Self {
        Self {
            current,
            prior_year,
            percent_change: percent_change(current, prior_year),
        }
    }
}

/// Revenue snapshot with its reporting period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueData {
    pub snapshot: MetricSnapshot,
    /// Last day of the current period (`dd/mm/yyyy`)
    pub reference_date: Option<String>,
    /// Last day of the prior-year period (`dd/mm/yyyy`)
    pub prior_reference_date: Option<String>,
    /// First day of the current period; the first of the month when absent
    pub period_start: Option<String>,
    /// First day of the prior-year period
    pub prior_period_start: Option<String>,
}

/// Number of orders in each period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCount {
    pub current: u64,
    pub prior_year: u64,
}

impl OrderCount {
    /// Percent change vs prior year.
    pub fn percent_change(&self) -> Option<f64> {
        percent_change(self.current as f64, self.prior_year as f64)
    }
}

/// Average price per weight unit and per area unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    /// BRL per kg
    pub per_kg: f64,
    /// BRL per m²
    pub per_m2: f64,
    pub as_of: Option<String>,
}

/// Average price, optionally split into current and prior-year periods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AveragePriceData {
    pub current: PriceSnapshot,
    pub prior_year: Option<PriceSnapshot>,
}

/// Everything one dashboard refresh needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub revenue: RevenueData,
    pub orders: OrderCount,
    pub ticket: MetricSnapshot,
    pub weight: MetricSnapshot,
    pub price: Option<AveragePriceData>,
}

/// Percent change from `prior` to `current`, rounded to one decimal.
///
/// `None` when `prior` is zero.
pub fn percent_change(current: f64, prior: f64) -> Option<f64> {
    if prior == 0.0 {
        return None;
    }
    let change = (current / prior - 1.0) * 100.0;
    change.is_finite().then(|| round_to(change, 1))
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
