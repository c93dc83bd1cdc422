//! Spreadsheet ingestion for the PE tracker: decode a fund-tracker workbook, resolve its loosely
//! named columns and mine the Portuguese free text for tickets, sectors, deal types and floors.

pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod excel;
pub mod models;
pub mod services;
pub mod types;

pub use commands::{funds_with_interactions, import_file, import_workbook, save_import, validate_excel_file};
pub use config::ImportConfig;
pub use db::{Db, Repository};
pub use error::{ImportError, StoreError};
pub use models::{Currency, DealType, MonetaryRange, RawRow, RawSheet, Sector};
pub use services::classifier::classify;
pub use services::columns::resolve;
pub use services::criteria::{current_criteria, extract_criteria};
pub use services::fund_extractor::assemble;
pub use services::money::extract;
pub use services::narrative::most_recent_entry;
pub use types::{
    FundRecord, ImportReport, Interaction, InteractionCriteria, InvesteeRecord, RejectedRow,
    RejectionReason, TrackerData, TransactionRecord, ValidationResult,
};
