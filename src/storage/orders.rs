//! Order export (CSV) import.
//!
//! Expected header: `pedido,tipo,data,valor,kg,m2` (case-insensitive, any
//! order, extra columns ignored). Numbers may use Brazilian formatting.

use crate::format::parse_brl_number;
use crate::metrics::calculator::{OrderRecord, DATE_FORMAT};
use chrono::NaiveDate;
use std::path::Path;
use thiserror::Error;

/// Errors importing an order export.
#[derive(Debug, Error)]
pub enum OrderImportError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing column: {0}")]
    MissingColumn(&'static str),
}

const COL_NUMBER: &str = "pedido";
const COL_KIND: &str = "tipo";
const COL_DATE: &str = "data";
const COL_VALUE: &str = "valor";
const COL_WEIGHT: &str = "kg";
const COL_AREA: &str = "m2";

/// Parse a `dd/mm/yyyy` or ISO `yyyy-mm-dd` date.
pub fn parse_order_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .ok()
}

/// Read orders from a CSV file.
pub fn read_orders(path: &Path) -> Result<Vec<OrderRecord>, OrderImportError> {
    let text = std::fs::read_to_string(path).map_err(|e| OrderImportError::IoError(e.to_string()))?;
    parse_orders(&text)
}

/// Parse orders from CSV text. Rows with an unreadable date are skipped.
pub fn parse_orders(csv_text: &str) -> Result<Vec<OrderRecord>, OrderImportError> {
    // Strip UTF-8 BOM if present
    let text = csv_text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or(OrderImportError::MissingColumn(name))
    };

    let number_idx = column(COL_NUMBER)?;
    let kind_idx = column(COL_KIND)?;
    let date_idx = column(COL_DATE)?;
    let value_idx = column(COL_VALUE)?;
    let weight_idx = column(COL_WEIGHT)?;
    let area_idx = column(COL_AREA)?;

    let mut orders = Vec::new();
    let mut skipped = 0usize;

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let Some(date) = parse_order_date(field(date_idx)) else {
            tracing::warn!(
                "Skipping order row {}: unreadable date {:?}",
                line + 2,
                field(date_idx)
            );
            skipped += 1;
            continue;
        };

        orders.push(OrderRecord {
            number: field(number_idx).to_string(),
            kind: field(kind_idx).to_string(),
            date,
            value: parse_brl_number(field(value_idx)),
            weight_kg: parse_brl_number(field(weight_idx)),
            area_m2: parse_brl_number(field(area_idx)),
        });
    }

    tracing::info!("Read {} orders ({} skipped)", orders.len(), skipped);
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_orders() {
        let csv_text = "\u{FEFF}Pedido;ignored\n";
        assert!(matches!(
            parse_orders(csv_text),
            Err(OrderImportError::MissingColumn(_))
        ));

        let csv_text = "\
PEDIDO,Tipo,Data,Valor,Kg,M2,Cliente
101,NORMAL,15/07/2025,\"R$ 1.234,50\",\"120,5\",30,ACME
102,BONIFICACAO,2025-07-16,10,1,1,ACME
103,NORMAL,sem data,10,1,1,ACME
";
        let orders = parse_orders(csv_text).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].number, "101");
        assert_eq!(orders[0].value, 1234.5);
        assert_eq!(orders[0].weight_kg, 120.5);
        assert_eq!(orders[0].area_m2, 30.0);
        assert!(orders[0].is_counted());
        assert_eq!(orders[1].date, NaiveDate::from_ymd_opt(2025, 7, 16).unwrap());
        assert!(!orders[1].is_counted());
    }

    #[test]
    fn test_parse_order_date() {
        assert_eq!(
            parse_order_date(" 01/02/2026 "),
            NaiveDate::from_ymd_opt(2026, 2, 1)
        );
        assert_eq!(parse_order_date("31/02/2026"), None);
        assert_eq!(parse_order_date(""), None);
    }
}
