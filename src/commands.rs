use std::fs;
use std::io::Read;
use std::path::Path;

use crate::config::ImportConfig;
use crate::db::Repository;
use crate::error::{ImportError, StoreError};
use crate::excel;
use crate::services::criteria::current_criteria;
use crate::services::fund_extractor::{extract_funds, select_fund_sheet};
use crate::services::investees::extract_investees;
use crate::services::transactions::extract_transactions;
use crate::types::{FundRecord, ImportReport, TrackerData, ValidationResult};

const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xls"];
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
const OLE_MAGIC: [u8; 4] = [0xD0, 0xCF, 0x11, 0xE0];

/// Cheap pre-flight check before a full import: existence, size, extension, magic bytes.
pub fn validate_excel_file(path: &Path, config: &ImportConfig) -> Result<ValidationResult, ImportError> {
    if !path.exists() {
        return Ok(ValidationResult::invalid("File not found."));
    }
    let metadata = fs::metadata(path)?;
    if metadata.len() > config.max_workbook_bytes {
        return Ok(ValidationResult::invalid(format!(
            "File too large (max {}MB).",
            config.max_workbook_bytes / (1024 * 1024)
        )));
    }
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !EXCEL_EXTENSIONS.contains(&extension.as_str()) {
        return Ok(ValidationResult::invalid("Not an Excel file (.xlsx or .xls)."));
    }
    let mut f = fs::File::open(path)?;
    let mut header = [0u8; 4];
    if f.read(&mut header).unwrap_or(0) < 4 {
        return Ok(ValidationResult::invalid(
            "Not a valid Excel file (could not read header).",
        ));
    }
    if header != ZIP_MAGIC && header != OLE_MAGIC {
        return Ok(ValidationResult::invalid("Not a valid Excel file."));
    }
    Ok(ValidationResult::ok())
}

/// Full extraction over workbook bytes: funds, investees, transactions and sheet previews.
pub fn import_workbook(bytes: &[u8], config: &ImportConfig) -> Result<ImportReport, ImportError> {
    let sheets = excel::decode_workbook(bytes, config)?;

    let fund_sheet = select_fund_sheet(&sheets);
    let (funds, rejected) = fund_sheet.map(extract_funds).unwrap_or_default();
    if let Some(sheet) = fund_sheet {
        tracing::debug!(sheet = %sheet.sheet_name, rows = sheet.row_count(), "fund sheet selected");
    }
    let investees = extract_investees(&sheets);
    let transactions = extract_transactions(&sheets);

    tracing::info!(
        sheets = sheets.len(),
        funds = funds.len(),
        rejected = rejected.len(),
        investees = investees.len(),
        transactions = transactions.len(),
        "workbook imported"
    );

    Ok(ImportReport {
        file_name: None,
        file_size: bytes.len() as u64,
        fund_sheet: fund_sheet.map(|s| s.sheet_name.clone()),
        sheets: excel::describe(&sheets, config.preview_rows),
        funds,
        rejected,
        investees,
        transactions,
    })
}

/// [`import_workbook`] for a file on disk; the size bound is checked before reading.
pub fn import_file(path: &Path, config: &ImportConfig) -> Result<ImportReport, ImportError> {
    if !path.exists() {
        return Err(ImportError::NotFound(path.to_path_buf()));
    }
    let size = fs::metadata(path)?.len();
    if size > config.max_workbook_bytes {
        return Err(ImportError::TooLarge {
            size,
            limit: config.max_workbook_bytes,
        });
    }
    let bytes = fs::read(path)?;
    let mut report = import_workbook(&bytes, config)?;
    report.file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());
    Ok(report)
}

/// Replace imported collections in the stored snapshot. Logged interactions are kept.
pub fn save_import(repo: &dyn Repository, report: &ImportReport) -> Result<TrackerData, StoreError> {
    let previous = repo.load()?.unwrap_or_default();
    let data = TrackerData {
        funds: report.funds.clone(),
        investees: report.investees.clone(),
        transactions: report.transactions.clone(),
        interactions: previous.interactions,
        last_import: Some(chrono::Utc::now().to_rfc3339()),
        file_name: report.file_name.clone(),
    };
    repo.save(&data)?;
    tracing::info!(
        funds = data.funds.len(),
        interactions = data.interactions.len(),
        "import saved"
    );
    Ok(data)
}

/// Funds as the dashboard shows them: imported values overlaid with the latest interaction criteria.
pub fn funds_with_interactions(data: &TrackerData) -> Vec<FundRecord> {
    data.funds
        .iter()
        .map(|fund| {
            let criteria = current_criteria(&data.interactions, &fund.id);
            if criteria.is_empty() {
                fund.clone()
            } else {
                fund.with_criteria(&criteria)
            }
        })
        .collect()
}
