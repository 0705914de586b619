//! Command handling for the `kpiboard` binary.

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use kpiboard::dashboard::{build_slides, SlideKind};
use kpiboard::metrics::calculator::DATE_FORMAT;
use kpiboard::storage::config::{self, AppConfig};
use kpiboard::storage::{data_files, orders};
use kpiboard::KpiCalculator;

/// KpiBoard - sales KPI dashboard
#[derive(Parser, Debug)]
#[command(name = "kpiboard")]
#[command(version)]
#[command(about = "Sales KPI dashboard: goals, year-over-year variation and slides")]
pub struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the kpi_*.json files (overrides the config)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the slides built from the data files
    Show,
    /// Rebuild the data files from an order export
    Refresh {
        /// Order export (CSV)
        orders: PathBuf,
        /// Last day of the period, dd/mm/yyyy (defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// First day of the period, dd/mm/yyyy (defaults to the first of the month)
        #[arg(long, value_parser = parse_date, requires = "date")]
        from: Option<NaiveDate>,
    },
    /// Print the configured goal table
    Goals,
}

fn parse_date(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| format!("invalid date {:?}, expected dd/mm/yyyy", text))
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .context("Failed to load configuration")?;

    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

/// Execute the parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.clone().unwrap_or(Command::Show) {
        Command::Show => show(&cli),
        Command::Goals => goals(&cli),
        Command::Refresh { orders, date, from } => refresh(&cli, &orders, from, date),
    }
}

fn show(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    let data = data_files::load_dashboard_data(&config.data_dir)
        .with_context(|| format!("Failed to load data from {}", config.data_dir.display()))?;

    let mut slides = build_slides(&data, &config.goals);
    if !config.display.show_price_slide {
        slides.retain(|slide| slide.kind != SlideKind::AveragePrice);
    }

    for slide in &slides {
        println!("{}", slide);
    }
    Ok(())
}

fn goals(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    println!("{:>4}  {:>14}  {:>18}", "Mês", "Meta KG", "Meta Faturamento");
    for goal in config.goals.iter() {
        println!(
            "{:>4}  {:>14}  {:>18}",
            goal.month,
            kpiboard::format::format_number(goal.weight_target),
            kpiboard::format::format_currency(goal.revenue_target)
        );
    }
    Ok(())
}

/// Calculator for the requested period: `from..=date`, or month-to-date.
fn calculator(
    from: Option<NaiveDate>,
    date: Option<NaiveDate>,
) -> anyhow::Result<KpiCalculator> {
    let end = date.unwrap_or_else(|| chrono::Local::now().date_naive());
    match from {
        Some(start) => Ok(KpiCalculator::with_period(start, end)?),
        None => Ok(KpiCalculator::new(end)),
    }
}

fn refresh(
    cli: &Cli,
    orders_path: &Path,
    from: Option<NaiveDate>,
    date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let calculator = calculator(from, date)?;
    let config = load_config(cli)?;

    let orders = orders::read_orders(orders_path)
        .with_context(|| format!("Failed to read orders from {}", orders_path.display()))?;

    let data = calculator.build(&orders);
    data_files::write_dashboard_data(&config.data_dir, &data)?;

    tracing::info!(
        "Refreshed KPIs for {} to {}: revenue {}",
        calculator.start().format(DATE_FORMAT),
        calculator.reference().format(DATE_FORMAT),
        kpiboard::format::format_currency(data.revenue.snapshot.current)
    );
    Ok(())
}
