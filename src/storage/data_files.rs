//! The `kpi_*.json` data files shared with the refresh job.
//!
//! Field names follow the files as written in production (Portuguese). The
//! reference date may appear under several keys; it is normalized here once
//! so nothing downstream has to probe field names.

use crate::metrics::snapshot::{
    AveragePriceData, DashboardData, MetricSnapshot, OrderCount, PriceSnapshot, RevenueData,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const REVENUE_FILE: &str = "kpi_faturamento.json";
pub const ORDER_COUNT_FILE: &str = "kpi_quantidade_pedidos.json";
pub const TICKET_FILE: &str = "kpi_ticket_medio.json";
pub const WEIGHT_FILE: &str = "kpi_kg_total.json";
pub const PRICE_FILE: &str = "kpi_preco_medio.json";

/// Errors reading or writing data files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Missing data file: {0}")]
    MissingFile(PathBuf),

    #[error("IO error on {path}: {message}")]
    IoError { path: PathBuf, message: String },

    #[error("Malformed JSON in {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

/// Current / prior-year metric as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MetricFile {
    atual: f64,
    ano_anterior: f64,
    #[serde(default)]
    variacao: Option<f64>,
}

impl From<MetricFile> for MetricSnapshot {
    fn from(file: MetricFile) -> Self {
        Self {
            current: file.atual,
            prior_year: file.ano_anterior,
            percent_change: file.variacao,
        }
    }
}

impl From<&MetricSnapshot> for MetricFile {
    fn from(snapshot: &MetricSnapshot) -> Self {
        Self {
            atual: snapshot.current,
            ano_anterior: snapshot.prior_year,
            variacao: snapshot.percent_change,
        }
    }
}

/// Revenue file; the reference date has historically used several keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RevenueFile {
    #[serde(flatten)]
    metric: MetricFile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_atual: Option<String>,
    #[serde(default, skip_serializing)]
    data: Option<String>,
    #[serde(default, skip_serializing)]
    data_ref: Option<String>,
    #[serde(default, skip_serializing)]
    periodo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_ano_anterior: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inicio_mes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inicio_mes_anterior: Option<String>,
}

impl RevenueFile {
    /// First non-empty of `data_atual`, `data`, `data_ref`, `periodo`.
    fn reference_date(&self) -> Option<String> {
        [&self.data_atual, &self.data, &self.data_ref, &self.periodo]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map(str::to_string)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct OrderCountFile {
    atual: u64,
    ano_anterior: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variacao: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PriceEntry {
    preco_medio_kg: f64,
    preco_medio_m2: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<String>,
}

impl From<PriceEntry> for PriceSnapshot {
    fn from(entry: PriceEntry) -> Self {
        Self {
            per_kg: entry.preco_medio_kg,
            per_m2: entry.preco_medio_m2,
            as_of: entry.data,
        }
    }
}

impl From<&PriceSnapshot> for PriceEntry {
    fn from(snapshot: &PriceSnapshot) -> Self {
        Self {
            preco_medio_kg: snapshot.per_kg,
            preco_medio_m2: snapshot.per_m2,
            data: snapshot.as_of.clone(),
        }
    }
}

/// The price file is either flat or split into current / prior-year entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum PriceFile {
    Split {
        atual: PriceEntry,
        #[serde(default)]
        ano_anterior: Option<PriceEntry>,
    },
    Flat(PriceEntry),
}

impl From<PriceFile> for AveragePriceData {
    fn from(file: PriceFile) -> Self {
        match file {
            PriceFile::Split {
                atual,
                ano_anterior,
            } => Self {
                current: atual.into(),
                prior_year: ano_anterior.map(Into::into),
            },
            PriceFile::Flat(entry) => Self {
                current: entry.into(),
                prior_year: None,
            },
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    if !path.exists() {
        return Err(LoadError::MissingFile(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::IoError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| LoadError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), LoadError> {
    let io_err = |e: std::io::Error| LoadError::IoError {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let content = serde_json::to_string_pretty(value).map_err(|e| LoadError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    std::fs::write(path, content).map_err(io_err)
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Load all dashboard data from `dir`.
///
/// The price file is optional; every other file is required.
pub fn load_dashboard_data(dir: &Path) -> Result<DashboardData, LoadError> {
    let revenue: RevenueFile = read_json(&dir.join(REVENUE_FILE))?;
    let orders: OrderCountFile = read_json(&dir.join(ORDER_COUNT_FILE))?;
    let ticket: MetricFile = read_json(&dir.join(TICKET_FILE))?;
    let weight: MetricFile = read_json(&dir.join(WEIGHT_FILE))?;

    let price = match read_json::<PriceFile>(&dir.join(PRICE_FILE)) {
        Ok(file) => Some(file.into()),
        Err(LoadError::MissingFile(path)) => {
            tracing::debug!("No price file at {}, skipping price slide", path.display());
            None
        }
        Err(e) => return Err(e),
    };

    let reference_date = revenue.reference_date();
    if reference_date.is_none() {
        tracing::warn!("Revenue file has no reference date; goals fall back to month 1");
    }

    tracing::info!("Loaded dashboard data from {}", dir.display());

    Ok(DashboardData {
        revenue: RevenueData {
            reference_date,
            prior_reference_date: revenue.data_ano_anterior.clone(),
            period_start: non_empty(revenue.inicio_mes),
            prior_period_start: non_empty(revenue.inicio_mes_anterior),
            snapshot: revenue.metric.into(),
        },
        orders: OrderCount {
            current: orders.atual,
            prior_year: orders.ano_anterior,
        },
        ticket: ticket.into(),
        weight: weight.into(),
        price,
    })
}

/// Write dashboard data as the `kpi_*.json` files in `dir`.
pub fn write_dashboard_data(dir: &Path, data: &DashboardData) -> Result<(), LoadError> {
    std::fs::create_dir_all(dir).map_err(|e| LoadError::IoError {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let revenue = RevenueFile {
        metric: MetricFile::from(&data.revenue.snapshot),
        data_atual: data.revenue.reference_date.clone(),
        data_ano_anterior: data.revenue.prior_reference_date.clone(),
        inicio_mes: data.revenue.period_start.clone(),
        inicio_mes_anterior: data.revenue.prior_period_start.clone(),
        ..Default::default()
    };
    write_json(&dir.join(REVENUE_FILE), &revenue)?;

    let orders = OrderCountFile {
        atual: data.orders.current,
        ano_anterior: data.orders.prior_year,
        variacao: data.orders.percent_change(),
    };
    write_json(&dir.join(ORDER_COUNT_FILE), &orders)?;

    write_json(&dir.join(TICKET_FILE), &MetricFile::from(&data.ticket))?;
    write_json(&dir.join(WEIGHT_FILE), &MetricFile::from(&data.weight))?;

    if let Some(price) = &data.price {
        let file = PriceFile::Split {
            atual: PriceEntry::from(&price.current),
            ano_anterior: price.prior_year.as_ref().map(PriceEntry::from),
        };
        write_json(&dir.join(PRICE_FILE), &file)?;
    }

    tracing::info!("Wrote dashboard data to {}", dir.display());
    Ok(())
}
