//! Storage module for configuration, KPI data files and order imports.

pub mod config;
pub mod data_files;
pub mod orders;

pub use config::{AppConfig, ConfigError, DisplaySettings};
pub use data_files::{load_dashboard_data, write_dashboard_data, LoadError};
pub use orders::{read_orders, OrderImportError};
