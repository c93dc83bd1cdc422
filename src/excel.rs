use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader};
use std::io::Cursor;

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::models::RawSheet;
use crate::types::SheetPreview;

/// Column index to Excel letter (0→A, 1→B, 25→Z, 26→AA).
pub fn column_letter(index: usize) -> String {
    let mut n = index;
    let mut s = String::new();
    loop {
        let r = (n % 26) as u8;
        s.insert(0, (b'A' + r) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    s
}

/// Display text of one cell. Empty cells are "", numbers keep calamine's formatting.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        other => other.as_string().unwrap_or_else(|| format!("{}", other)),
    }
}

/// Cell grid with absolute column positions; a used range starting at column C gets two empty cells prepended.
fn range_to_grid(range: &Range<Data>) -> Vec<Vec<String>> {
    let left_pad = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    range
        .rows()
        .map(|row| {
            let mut cells = vec![String::new(); left_pad];
            cells.extend(row.iter().map(cell_text));
            cells
        })
        .collect()
}

/// Decode every sheet of an .xlsx/.xls/.ods workbook held in memory.
///
/// The first row of each sheet's used range is its header row. Fails only when the bytes are
/// too large, not a workbook, or hold no non-blank sheet.
pub fn decode_workbook(bytes: &[u8], config: &ImportConfig) -> Result<Vec<RawSheet>, ImportError> {
    let size = bytes.len() as u64;
    if size > config.max_workbook_bytes {
        return Err(ImportError::TooLarge {
            size,
            limit: config.max_workbook_bytes,
        });
    }
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| ImportError::Unreadable(e.to_string()))?;
    let names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| ImportError::Unreadable(format!("sheet {}: {}", name, e)))?;
        sheets.push(RawSheet::from_grid(name, range_to_grid(&range)));
    }
    if sheets.iter().all(RawSheet::is_blank) {
        return Err(ImportError::Empty);
    }
    tracing::debug!(sheets = sheets.len(), bytes = size, "workbook decoded");
    Ok(sheets)
}

/// Headers, row count and the first `preview_rows` rows of each sheet.
pub fn describe(sheets: &[RawSheet], preview_rows: usize) -> Vec<SheetPreview> {
    sheets
        .iter()
        .map(|sheet| SheetPreview {
            sheet_name: sheet.sheet_name.clone(),
            headers: sheet.headers.clone(),
            row_count: sheet.row_count(),
            sample_rows: sheet.rows.iter().take(preview_rows).cloned().collect(),
        })
        .collect()
}
