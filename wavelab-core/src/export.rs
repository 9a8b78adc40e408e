//! Artifact export: waves as CSV, the full analysis as JSON.

use crate::analysis::Analysis;
use crate::domain::Wave;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flat CSV row for one wave.
#[derive(Debug, Serialize)]
struct WaveRow {
    cycle: usize,
    label: String,
    direction: String,
    start_index: usize,
    start_time: String,
    start_price: f64,
    end_index: usize,
    end_time: String,
    end_price: f64,
    pct_change: f64,
    confirmed: bool,
}

impl From<&Wave> for WaveRow {
    fn from(w: &Wave) -> Self {
        Self {
            cycle: w.cycle,
            label: w.label.to_string(),
            direction: w.direction.to_string(),
            start_index: w.start.index,
            start_time: w.start.point.timestamp.to_rfc3339(),
            start_price: w.start.price(),
            end_index: w.end.index,
            end_time: w.end.point.timestamp.to_rfc3339(),
            end_price: w.end.price(),
            pct_change: w.pct_change() * 100.0,
            confirmed: w.end.confirmed,
        }
    }
}

pub fn waves_to_csv(waves: &[Wave]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for w in waves {
        wtr.serialize(WaveRow::from(w))?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn write_waves_csv(waves: &[Wave], path: &Path) -> Result<(), ExportError> {
    std::fs::write(path, waves_to_csv(waves)?)?;
    Ok(())
}

pub fn write_analysis_json(analysis: &Analysis, path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(analysis)?;
    std::fs::write(path, json)?;
    Ok(())
}
