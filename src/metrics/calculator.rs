//! KPI calculation from raw order rows.
//!
//! Compares the current window (month-to-date by default, or an explicit
//! period) with the same calendar days one year earlier and derives revenue,
//! order count, average ticket, weight and average price.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::snapshot::{
    percent_change, round_to, AveragePriceData, DashboardData, MetricSnapshot, OrderCount,
    PriceSnapshot, RevenueData,
};

/// Order kind counted by the dashboard; others (bonus, replacement) are ignored.
pub const COUNTED_ORDER_KIND: &str = "NORMAL";

/// Date format used throughout the dashboard files.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// A single order row from the sales export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order number
    pub number: String,
    /// Order kind (only `NORMAL` is counted)
    pub kind: String,
    pub date: NaiveDate,
    /// Order value including IPI, in BRL
    pub value: f64,
    pub weight_kg: f64,
    pub area_m2: f64,
}

impl OrderRecord {
    /// Whether this order counts towards the KPIs.
    pub fn is_counted(&self) -> bool {
        self.kind.trim().eq_ignore_ascii_case(COUNTED_ORDER_KIND)
    }
}

/// Totals over one window of orders.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodTotals {
    pub orders: u64,
    pub value: f64,
    pub weight_kg: f64,
    pub area_m2: f64,
}

impl PeriodTotals {
    fn add(&mut self, order: &OrderRecord) {
        self.orders += 1;
        self.value += order.value;
        self.weight_kg += order.weight_kg;
        self.area_m2 += order.area_m2;
    }

    /// Average order value, 0 when there are no orders.
    pub fn ticket(&self) -> f64 {
        if self.orders > 0 {
            self.value / self.orders as f64
        } else {
            0.0
        }
    }

    /// BRL per kg, 0 when no weight was shipped.
    pub fn price_per_kg(&self) -> f64 {
        if self.weight_kg > 0.0 {
            self.value / self.weight_kg
        } else {
            0.0
        }
    }

    /// BRL per m², 0 when no area was shipped.
    pub fn price_per_m2(&self) -> f64 {
        if self.area_m2 > 0.0 {
            self.value / self.area_m2
        } else {
            0.0
        }
    }
}

/// Errors building a reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("Period start {start} is after its end {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}

/// Builds dashboard KPIs for a reporting period.
pub struct KpiCalculator {
    start: NaiveDate,
    reference: NaiveDate,
    prior_start: NaiveDate,
    prior_reference: NaiveDate,
}

impl KpiCalculator {
    /// Create a calculator for the month-to-date period ending on `reference`.
    pub fn new(reference: NaiveDate) -> Self {
        let start = reference.with_day(1).unwrap_or(reference);
        Self {
            start,
            reference,
            prior_start: same_day_prior_year(start),
            prior_reference: same_day_prior_year(reference),
        }
    }

    /// Create a calculator for an explicit `start..=end` period.
    ///
    /// The prior-year window covers the same calendar days one year earlier.
    pub fn with_period(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if start > end {
            return Err(PeriodError::StartAfterEnd { start, end });
        }
        Ok(Self {
            start,
            reference: end,
            prior_start: same_day_prior_year(start),
            prior_reference: same_day_prior_year(end),
        })
    }

    /// First day of the current window.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the current window.
    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    /// First day of the prior-year window.
    pub fn prior_start(&self) -> NaiveDate {
        self.prior_start
    }

    /// Last day of the prior-year window.
    pub fn prior_reference(&self) -> NaiveDate {
        self.prior_reference
    }

    /// Totals for counted orders dated within `start..=end`.
    fn totals(orders: &[OrderRecord], start: NaiveDate, end: NaiveDate) -> PeriodTotals {
        let mut totals = PeriodTotals::default();
        for order in orders
            .iter()
            .filter(|o| o.is_counted() && (start..=end).contains(&o.date))
        {
            totals.add(order);
        }
        totals
    }

    /// Compute all KPIs.
    pub fn build(&self, orders: &[OrderRecord]) -> DashboardData {
        let current = Self::totals(orders, self.start, self.reference);
        let prior = Self::totals(orders, self.prior_start, self.prior_reference);

        tracing::info!(
            "KPI windows: {} orders in {}..={}, {} orders in {}..={}",
            current.orders,
            self.start,
            self.reference,
            prior.orders,
            self.prior_start,
            self.prior_reference
        );

        let revenue = MetricSnapshot {
            current: round_to(current.value, 2),
            prior_year: round_to(prior.value, 2),
            percent_change: percent_change(current.value, prior.value),
        };

        let ticket = MetricSnapshot {
            current: round_to(current.ticket(), 2),
            prior_year: round_to(prior.ticket(), 2),
            percent_change: percent_change(current.ticket(), prior.ticket()),
        };

        let weight = MetricSnapshot {
            current: round_to(current.weight_kg, 0),
            prior_year: round_to(prior.weight_kg, 0),
            percent_change: percent_change(current.weight_kg, prior.weight_kg),
        };

        let price = AveragePriceData {
            current: price_snapshot(&current, self.reference),
            prior_year: Some(price_snapshot(&prior, self.prior_reference)),
        };

        DashboardData {
            revenue: RevenueData {
                snapshot: revenue,
                reference_date: Some(self.reference.format(DATE_FORMAT).to_string()),
                prior_reference_date: Some(self.prior_reference.format(DATE_FORMAT).to_string()),
                period_start: Some(self.start.format(DATE_FORMAT).to_string()),
                prior_period_start: Some(self.prior_start.format(DATE_FORMAT).to_string()),
            },
            orders: OrderCount {
                current: current.orders,
                prior_year: prior.orders,
            },
            ticket,
            weight,
            price: Some(price),
        }
    }
}

fn price_snapshot(totals: &PeriodTotals, as_of: NaiveDate) -> PriceSnapshot {
    PriceSnapshot {
        per_kg: round_to(totals.price_per_kg(), 2),
        per_m2: round_to(totals.price_per_m2(), 2),
        as_of: Some(as_of.format(DATE_FORMAT).to_string()),
    }
}

/// Same calendar day one year earlier; 29 February maps to 28 February.
pub fn same_day_prior_year(date: NaiveDate) -> NaiveDate {
    date.with_year(date.year() - 1)
        .or_else(|| NaiveDate::from_ymd_opt(date.year() - 1, date.month(), 28))
        .unwrap_or(date)
}
