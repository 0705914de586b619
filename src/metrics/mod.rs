//! Metrics module for KPI snapshots, calculation and variation display.

pub mod calculator;
pub mod snapshot;
pub mod variation;

pub use calculator::{KpiCalculator, OrderRecord, PeriodError};
pub use snapshot::{
    percent_change, AveragePriceData, DashboardData, MetricSnapshot, OrderCount, PriceSnapshot,
    RevenueData,
};
pub use variation::{format_variation, Glyph, Variation};
