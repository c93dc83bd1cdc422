use serde::Serialize;
use std::sync::Arc;

/// One data row, addressable by header name or by 0-based column index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRow {
    /// 1-based row number in the source sheet (header is row 1).
    pub number: usize,
    cells: Vec<String>,
    #[serde(skip)]
    headers: Arc<[String]>,
}

impl RawRow {
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Raw cell text at a column position; `None` past the sheet width.
    pub fn at(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    /// Cell text under the first column whose header equals `header` exactly.
    pub fn get(&self, header: &str) -> Option<&str> {
        if header.is_empty() {
            return None;
        }
        let index = self.headers.iter().position(|h| h == header)?;
        self.at(index)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

/// A decoded sheet: trimmed header row plus every non-blank data row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSheet {
    pub sheet_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawSheet {
    /// Build from a cell grid. Row 0 is the header row whatever it holds; blank rows are dropped
    /// and every row is padded to the widest one.
    pub fn from_grid(sheet_name: impl Into<String>, grid: Vec<Vec<String>>) -> Self {
        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        let mut grid = grid.into_iter();
        let mut headers: Vec<String> = grid
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();
        headers.resize(width, String::new());
        let shared: Arc<[String]> = headers.clone().into();

        let rows = grid
            .enumerate()
            .map(|(i, mut cells)| {
                cells.resize(width, String::new());
                RawRow {
                    number: i + 2,
                    cells,
                    headers: Arc::clone(&shared),
                }
            })
            .filter(|row| !row.is_blank())
            .collect();

        Self {
            sheet_name: sheet_name.into(),
            headers,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// No header text and no rows at all.
    pub fn is_blank(&self) -> bool {
        self.rows.is_empty() && self.headers.iter().all(|h| h.is_empty())
    }
}

/// First sheet whose lowercased name contains any of `hints`.
pub fn find_sheet<'a>(sheets: &'a [RawSheet], hints: &[&str]) -> Option<&'a RawSheet> {
    sheets.iter().find(|s| {
        let name = s.sheet_name.to_lowercase();
        hints.iter().any(|hint| name.contains(hint))
    })
}
