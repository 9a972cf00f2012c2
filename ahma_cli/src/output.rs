use std::io;

use ahma_core::{AhmaConfig, AhmaSeries};
use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::metrics::Summary;
use crate::parser::ParseIssue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
}

/// One table row; absent values become empty CSV cells or JSON `null`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow<'a> {
    pub label: &'a str,
    pub price: Option<f64>,
    pub hma: Option<f64>,
    pub ahma: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub config: &'a AhmaConfig,
    pub rows: &'a [OutputRow<'a>],
    pub summary: &'a Summary,
    pub issues: &'a [ParseIssue],
}

pub fn build_rows<'a>(labels: &'a [String], prices: &[f64], series: &AhmaSeries) -> Vec<OutputRow<'a>> {
    labels
        .iter()
        .zip(ahma_core::sanitize(prices))
        .zip(series.hma.iter().zip(&series.ahma))
        .map(|((label, price), (hma, ahma))| OutputRow {
            label,
            price,
            hma: *hma,
            ahma: *ahma,
        })
        .collect()
}

pub fn write_csv<W: io::Write>(writer: W, rows: &[OutputRow]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: io::Write>(writer: W, report: &Report) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, report)
}
