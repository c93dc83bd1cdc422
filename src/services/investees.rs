//! Portfolio-company / add-on counts per sector.

use std::collections::BTreeSet;

use crate::models::{find_sheet, RawRow, RawSheet};
use crate::services::classifier::classify_segments;
use crate::services::columns::lookup;
use crate::types::InvesteeRecord;

pub const INVESTEE_SHEET_HINTS: &[&str] = &["investida", "add-on", "addon", "portfolio"];

const SECTOR_COLUMN: &[&str] = &["Setor", "Sector"];
const COUNT_COLUMN: &[&str] = &["Num", "Quantidade", "Count"];
const SEGMENT_COLUMN: &[&str] = &["Segmentos", "Segments"];
const UNKNOWN_SECTOR: &str = "Outros";

fn parse_count(text: &str) -> Option<u32> {
    let value: f64 = text.trim().replace(',', ".").parse().ok()?;
    (value.is_finite() && value >= 0.0).then(|| value.round() as u32)
}

fn investee(row: &RawRow, headers: &[String], position: usize) -> InvesteeRecord {
    let sector = lookup(row, headers, SECTOR_COLUMN)
        .or_else(|| {
            row.cells()
                .iter()
                .map(|c| c.trim())
                .find(|c| !c.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNKNOWN_SECTOR.to_string());
    let investee_count = lookup(row, headers, COUNT_COLUMN)
        .and_then(|t| parse_count(&t))
        .unwrap_or(1);
    let segments = lookup(row, headers, SEGMENT_COLUMN)
        .map(|t| classify_segments(&t))
        .unwrap_or_else(BTreeSet::new);
    InvesteeRecord {
        id: format!("investida-{position}"),
        sector,
        investee_count,
        segments,
    }
}

/// Rows of the first investee/add-on sheet; empty when the workbook has none.
pub fn extract_investees(sheets: &[RawSheet]) -> Vec<InvesteeRecord> {
    let Some(sheet) = find_sheet(sheets, INVESTEE_SHEET_HINTS) else {
        return Vec::new();
    };
    tracing::debug!(sheet = %sheet.sheet_name, rows = sheet.row_count(), "investee sheet selected");
    sheet
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| investee(row, &sheet.headers, i + 1))
        .collect()
}
