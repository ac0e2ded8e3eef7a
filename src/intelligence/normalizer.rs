//! Unit and bin conversions feeding the risk matrix lookup.
//!
//! All functions are pure. Values outside the chart are clamped to the nearest
//! bound rather than rejected.

use serde::{Deserialize, Serialize};

/// Divisor converting total cholesterol from mg/dL to mmol/L.
pub const CHOLESTEROL_MG_DL_PER_MMOL: f64 = 38.67;

pub const MIN_CHOLESTEROL_COLUMN: u32 = 4;
pub const MAX_CHOLESTEROL_COLUMN: u32 = 8;
pub const MIN_BP_ROW: u32 = 120;
pub const MAX_BP_ROW: u32 = 180;
const BP_ROW_STEP: f64 = 20.0;

/// Position of a patient on the risk chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskBin {
    /// 40, 50, 60 or 70.
    pub age_group: u32,
    /// 120, 140, 160 or 180 mmHg.
    pub bp_row: u32,
    /// 4 through 8 mmol/L.
    pub chol_col: u32,
}

impl RiskBin {
    pub fn age_index(&self) -> usize {
        ((self.age_group - 40) / 10) as usize
    }

    pub fn bp_index(&self) -> usize {
        ((self.bp_row - MIN_BP_ROW) / 20) as usize
    }

    pub fn chol_index(&self) -> usize {
        (self.chol_col - MIN_CHOLESTEROL_COLUMN) as usize
    }
}

/// mg/dL to mmol/L, rounded to two decimals.
pub fn cholesterol_to_millimolar(mg_dl: f64) -> f64 {
    (mg_dl / CHOLESTEROL_MG_DL_PER_MMOL * 100.0).round() / 100.0
}

/// Chart age group. Only meaningful for ages 40 and above.
pub fn age_group(age_years: u32) -> u32 {
    match age_years {
        0..=44 => 40,
        45..=54 => 50,
        55..=64 => 60,
        _ => 70,
    }
}

pub fn cholesterol_column(mmol: f64) -> u32 {
    let column = mmol
        .round()
        .clamp(MIN_CHOLESTEROL_COLUMN as f64, MAX_CHOLESTEROL_COLUMN as f64);
    column as u32
}

pub fn bp_row(systolic: f64) -> u32 {
    let row = ((systolic / BP_ROW_STEP).round() * BP_ROW_STEP)
        .clamp(MIN_BP_ROW as f64, MAX_BP_ROW as f64);
    row as u32
}

/// Bin a complete set of risk factors.
pub fn bin(age_years: u32, systolic: f64, cholesterol_mg_dl: f64) -> RiskBin {
    RiskBin {
        age_group: age_group(age_years),
        bp_row: bp_row(systolic),
        chol_col: cholesterol_column(cholesterol_to_millimolar(cholesterol_mg_dl)),
    }
}

/// Whether binning had to clamp either value onto the chart edge.
pub fn is_clamped(systolic: f64, cholesterol_mg_dl: f64) -> bool {
    let raw_row = (systolic / BP_ROW_STEP).round() * BP_ROW_STEP;
    let raw_col = cholesterol_to_millimolar(cholesterol_mg_dl).round();
    raw_row < MIN_BP_ROW as f64
        || raw_row > MAX_BP_ROW as f64
        || raw_col < MIN_CHOLESTEROL_COLUMN as f64
        || raw_col > MAX_CHOLESTEROL_COLUMN as f64
}
