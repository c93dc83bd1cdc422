use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{MonetaryRange, RawRow, Sector};

/// One fund, assembled from a spreadsheet row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundRecord {
    pub id: String,
    pub name: String,
    pub sectors: BTreeSet<Sector>,
    pub segments: BTreeSet<String>,
    /// Ticket expression as written, e.g. "R$ 150-500mi".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_range: Option<MonetaryRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_revenue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_ebitda: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal_deal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_position: Option<String>,
    #[serde(default)]
    pub portfolio_company_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fund_availability: Option<String>,
    /// Columns outside the known field list, header -> cell text.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl FundRecord {
    /// Copy of this record with the latest interaction criteria laid over it.
    pub fn with_criteria(&self, criteria: &InteractionCriteria) -> FundRecord {
        let mut fund = self.clone();
        if let Some(ticket) = &criteria.ticket_size {
            fund.ticket_size = Some(ticket.clone());
            fund.ticket_range = criteria.ticket_range.clone();
        }
        if criteria.ebitda_floor.is_some() {
            fund.minimum_ebitda = criteria.ebitda_floor.clone();
        }
        if criteria.revenue_floor.is_some() {
            fund.minimum_revenue = criteria.revenue_floor.clone();
        }
        if criteria.ideal_deal_type.is_some() {
            fund.ideal_deal_type = criteria.ideal_deal_type.clone();
        }
        if criteria.preferred_position.is_some() {
            fund.preferred_position = criteria.preferred_position.clone();
        }
        if let Some(sectors) = &criteria.sectors {
            fund.sectors = sectors.clone();
        }
        if criteria.fund_availability.is_some() {
            fund.fund_availability = criteria.fund_availability.clone();
        }
        fund
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    EmptyName,
    PlaceholderName,
    UndefinedLiteral,
    GenericFundWord,
}

/// Why a spreadsheet row produced no fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRow {
    pub row_number: usize,
    pub reason: RejectionReason,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvesteeRecord {
    pub id: String,
    pub sector: String,
    pub investee_count: u32,
    pub segments: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_range: Option<MonetaryRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
}

/// Criteria stated in one interaction. `None` means "unchanged", never zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_range: Option<MonetaryRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ebitda_floor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_floor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal_deal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sectors: Option<BTreeSet<Sector>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fund_availability: Option<String>,
}

impl InteractionCriteria {
    pub fn is_empty(&self) -> bool {
        *self == InteractionCriteria::default()
    }

    /// Field-wise merge: values present in `self` win, gaps are filled from `older`.
    pub fn or_older(self, older: &InteractionCriteria) -> InteractionCriteria {
        let (ticket_size, ticket_range) = if self.ticket_size.is_some() {
            (self.ticket_size, self.ticket_range)
        } else {
            (older.ticket_size.clone(), older.ticket_range.clone())
        };
        InteractionCriteria {
            ticket_size,
            ticket_range,
            ebitda_floor: self.ebitda_floor.or_else(|| older.ebitda_floor.clone()),
            revenue_floor: self.revenue_floor.or_else(|| older.revenue_floor.clone()),
            ideal_deal_type: self.ideal_deal_type.or_else(|| older.ideal_deal_type.clone()),
            preferred_position: self
                .preferred_position
                .or_else(|| older.preferred_position.clone()),
            sectors: self.sectors.or_else(|| older.sectors.clone()),
            fund_availability: self
                .fund_availability
                .or_else(|| older.fund_availability.clone()),
        }
    }
}

/// A logged meeting/call with a fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: String,
    pub fund_id: String,
    /// DD/MM/YYYY
    pub date: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<InteractionCriteria>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetPreview {
    pub sheet_name: String,
    pub headers: Vec<String>,
    pub row_count: usize,
    pub sample_rows: Vec<RawRow>,
}

/// Everything one workbook import produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub file_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fund_sheet: Option<String>,
    pub sheets: Vec<SheetPreview>,
    pub funds: Vec<FundRecord>,
    pub rejected: Vec<RejectedRow>,
    pub investees: Vec<InvesteeRecord>,
    pub transactions: Vec<TransactionRecord>,
}

/// Persisted dashboard state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerData {
    #[serde(default)]
    pub funds: Vec<FundRecord>,
    #[serde(default)]
    pub investees: Vec<InvesteeRecord>,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
    #[serde(default)]
    pub interactions: Vec<Interaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_import: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(message.into()),
        }
    }
}
