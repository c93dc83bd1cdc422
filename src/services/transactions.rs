//! M&A transaction log rows.

use crate::models::{find_sheet, RawRow, RawSheet};
use crate::services::columns::lookup;
use crate::services::money::extract_in_money_field;
use crate::types::TransactionRecord;

pub const TRANSACTION_SHEET_HINTS: &[&str] = &["transac", "deal", "m&a"];

fn transaction(row: &RawRow, headers: &[String], position: usize) -> TransactionRecord {
    let deal_value = lookup(row, headers, &["Value", "Valor"]);
    let deal_range = deal_value
        .as_deref()
        .map(extract_in_money_field)
        .filter(|r| !r.is_empty());
    TransactionRecord {
        id: format!("transacao-{position}"),
        date: lookup(row, headers, &["Data", "Date"]),
        target: lookup(row, headers, &["Target", "Empresa"]),
        buyer: lookup(row, headers, &["Buyer", "Comprador"]),
        deal_value,
        deal_range,
        sector: lookup(row, headers, &["Setor", "Sector"]),
    }
}

/// Rows of the first transaction sheet; empty when the workbook has none.
pub fn extract_transactions(sheets: &[RawSheet]) -> Vec<TransactionRecord> {
    let Some(sheet) = find_sheet(sheets, TRANSACTION_SHEET_HINTS) else {
        return Vec::new();
    };
    tracing::debug!(sheet = %sheet.sheet_name, rows = sheet.row_count(), "transaction sheet selected");
    sheet
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| transaction(row, &sheet.headers, i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_fields_and_value_range() {
        let sheets = vec![RawSheet::from_grid(
            "Transações M&A",
            vec![
                vec!["Data".into(), "Empresa".into(), "Comprador".into(), "Valor".into(), "Setor".into()],
                vec!["03/2024".into(), "Alpha".into(), "Beta".into(), "R$ 1,2 bi".into(), "Saúde".into()],
                vec!["".into(), "Gama".into(), "".into(), "n/d".into(), "".into()],
            ],
        )];
        let deals = extract_transactions(&sheets);
        assert_eq!(deals.len(), 2);
        let first = &deals[0];
        assert_eq!(first.id, "transacao-1");
        assert_eq!(first.date.as_deref(), Some("03/2024"));
        assert_eq!(first.target.as_deref(), Some("Alpha"));
        assert_eq!(first.buyer.as_deref(), Some("Beta"));
        assert_eq!(first.sector.as_deref(), Some("Saúde"));
        assert_eq!(first.deal_range.as_ref().and_then(|r| r.min), Some(1200.0));
        assert_eq!(deals[1].buyer, None);
        assert_eq!(deals[1].deal_value.as_deref(), Some("n/d"));
        assert_eq!(deals[1].deal_range, None);
    }

    #[test]
    fn no_transaction_sheet() {
        let sheets = vec![RawSheet::from_grid("Targets", vec![vec!["Fundo".into()]])];
        assert!(extract_transactions(&sheets).is_empty());
    }
}
