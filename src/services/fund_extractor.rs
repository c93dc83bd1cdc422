//! Fund rows -> `FundRecord`s.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::models::{find_sheet, join_deal_types, RawRow, RawSheet};
use crate::services::classifier::{classify, classify_deal_types, classify_positions};
use crate::services::columns::{
    is_known, lookup, lookup_or_position, CONTACT_ALIASES, DEAL_ALIASES, EMAIL_ALIASES, FUND_FIELDS,
    NAME_ALIASES, NAME_POSITIONS, PHONE_ALIASES, PORTFOLIO_ALIASES, SECTOR_ALIASES, TICKET_ALIASES,
};
use crate::services::money::{extract_ebitda_floor, extract_revenue_floor, extract_ticket};
use crate::services::narrative::most_recent_entry;
use crate::types::{FundRecord, RejectedRow, RejectionReason};

const MAX_PORTFOLIO_NAMES: usize = 15;
const FUND_SHEET_HINTS: &[&str] = &["fundo", "pe", "gestor"];

const STOPWORDS: &[&str] = &[
    "Add", "Para", "Mas", "Das", "Dos", "São", "Não", "Que", "Com", "Por", "Uma", "Tem", "Ver",
    "Sim", "Já", "Ainda", "Também", "Outros", "Outras", "Entre", "Sobre",
];

/// "Targets" (any case), else a sheet whose name hints at funds, else the first sheet.
pub fn select_fund_sheet(sheets: &[RawSheet]) -> Option<&RawSheet> {
    sheets
        .iter()
        .find(|s| s.sheet_name.trim().eq_ignore_ascii_case("targets"))
        .or_else(|| find_sheet(sheets, FUND_SHEET_HINTS))
        .or_else(|| sheets.first())
}

fn rejection(name: &str, position: usize) -> Option<RejectionReason> {
    let lower = name.to_lowercase();
    if name.is_empty() {
        Some(RejectionReason::EmptyName)
    } else if name == "undefined" {
        Some(RejectionReason::UndefinedLiteral)
    } else if lower == "fundo" || lower == "fund" {
        Some(RejectionReason::GenericFundWord)
    } else if name == format!("Fundo {position}") || name == format!("Fund {position}") {
        Some(RejectionReason::PlaceholderName)
    } else {
        None
    }
}

fn portfolio_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([A-Z][A-Za-zÀ-ÿ0-9\s&\-\.]*?)\s*(?:\([^)]*\))?\s*(?:,|;|\.(?:\s|$)|$)")
            .expect("portfolio name regex")
    })
}

/// Company names from a portfolio cell ("Alpha (logística), Beta; Gama").
pub fn portfolio_names(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in portfolio_re().captures_iter(text) {
        let Some(name) = caps.get(1).map(|m| m.as_str().trim()) else {
            continue;
        };
        if name.chars().count() <= 2 || STOPWORDS.contains(&name) {
            continue;
        }
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
        if names.len() == MAX_PORTFOLIO_NAMES {
            break;
        }
    }
    names
}

fn extra_fields(row: &RawRow, headers: &[String]) -> BTreeMap<String, String> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !h.is_empty())
        .filter(|(_, h)| !FUND_FIELDS.iter().any(|aliases| is_known(h, aliases)))
        .filter_map(|(i, h)| {
            let value = row.at(i)?.trim();
            (!value.is_empty()).then(|| (h.clone(), value.to_string()))
        })
        .fold(BTreeMap::new(), |mut extra, (header, value)| {
            extra.entry(header).or_insert(value);
            extra
        })
}

/// Build one fund from a row, or say why the row is not a fund.
///
/// `position` is the 1-based index of the row among the sheet's data rows.
pub fn assemble(row: &RawRow, headers: &[String], position: usize) -> Result<FundRecord, RejectedRow> {
    let name = lookup_or_position(row, headers, NAME_ALIASES, NAME_POSITIONS).unwrap_or_default();
    if let Some(reason) = rejection(&name, position) {
        return Err(RejectedRow {
            row_number: row.number,
            reason,
            name,
        });
    }

    let ticket_text = lookup(row, headers, TICKET_ALIASES);
    let deal_text = lookup(row, headers, DEAL_ALIASES);
    let sector_text = lookup(row, headers, SECTOR_ALIASES);

    let ticket_range = ticket_text.as_deref().and_then(extract_ticket);
    // size is the matched expression so it never disagrees with the range
    let ticket_size = ticket_range.as_ref().and_then(|r| r.matched.clone());

    let (ideal_deal_type, preferred_position) = match deal_text.as_deref().map(most_recent_entry) {
        Some(text) => (
            join_deal_types(&classify_deal_types(text)),
            join_deal_types(&classify_positions(text)),
        ),
        None => (None, None),
    };

    let (sectors, segments) = sector_text
        .as_deref()
        .map(classify)
        .unwrap_or_default();

    // sectors cell, then deal cell, then ticket cell
    let floor_sources = [&sector_text, &deal_text, &ticket_text];
    let minimum_revenue = floor_sources
        .iter()
        .filter_map(|t| t.as_deref())
        .find_map(extract_revenue_floor);
    let minimum_ebitda = floor_sources
        .iter()
        .filter_map(|t| t.as_deref())
        .find_map(extract_ebitda_floor);

    let portfolio_company_names = lookup(row, headers, PORTFOLIO_ALIASES)
        .map(|t| portfolio_names(&t))
        .unwrap_or_default();

    Ok(FundRecord {
        id: format!("fundo-{position}"),
        name,
        sectors,
        segments,
        ticket_size,
        ticket_range,
        minimum_revenue,
        minimum_ebitda,
        ideal_deal_type,
        preferred_position,
        portfolio_company_names,
        contact_name: lookup(row, headers, CONTACT_ALIASES),
        phone: lookup(row, headers, PHONE_ALIASES),
        email: lookup(row, headers, EMAIL_ALIASES),
        fund_availability: None,
        extra: extra_fields(row, headers),
    })
}

/// Funds from one sheet; rejected rows are returned separately, never as errors.
pub fn extract_funds(sheet: &RawSheet) -> (Vec<FundRecord>, Vec<RejectedRow>) {
    let mut funds = Vec::new();
    let mut rejected = Vec::new();
    for (i, row) in sheet.rows.iter().enumerate() {
        match assemble(row, &sheet.headers, i + 1) {
            Ok(fund) => funds.push(fund),
            Err(reject) => {
                tracing::debug!(
                    sheet = %sheet.sheet_name,
                    row = reject.row_number,
                    reason = ?reject.reason,
                    name = %reject.name,
                    "row rejected"
                );
                rejected.push(reject);
            }
        }
    }
    (funds, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sector;

    fn sheet(name: &str, rows: &[&[&str]]) -> RawSheet {
        RawSheet::from_grid(
            name,
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn targets_sheet_wins_over_hints() {
        let sheets = vec![
            sheet("Gestores", &[&["Fundo"]]),
            sheet("TARGETS", &[&["Fundo"]]),
        ];
        assert_eq!(select_fund_sheet(&sheets).map(|s| s.sheet_name.as_str()), Some("TARGETS"));
    }

    #[test]
    fn hint_then_first_sheet() {
        let sheets = vec![sheet("Resumo", &[&["x"]]), sheet("Fundos PE", &[&["x"]])];
        assert_eq!(select_fund_sheet(&sheets).map(|s| s.sheet_name.as_str()), Some("Fundos PE"));
        let sheets = vec![sheet("Resumo", &[&["x"]]), sheet("Notas", &[&["x"]])];
        assert_eq!(select_fund_sheet(&sheets).map(|s| s.sheet_name.as_str()), Some("Resumo"));
        assert!(select_fund_sheet(&[]).is_none());
    }

    #[test]
    fn full_row_is_assembled() {
        let s = sheet(
            "Targets",
            &[
                &["Fundo", "Ticket", "Tipo ideal", "Setores", "Portfolio", "Contato", "Telefone", "E-mail", "AUM"],
                &[
                    "Pátria",
                    "02/25: R$ 150-500mi. 03/24: R$ 100mi",
                    "Controle ou minoritário com governança",
                    "Tecnologia e Saúde; faturamento mínimo de R$ 50mi; EBITDA acima de R$ 10mi",
                    "Alpha (logística), Beta Saúde; Gama",
                    "Ana",
                    "+55 11 9999-0000",
                    "ana@patria.com",
                    "R$ 30 bi",
                ],
            ],
        );
        let fund = assemble(&s.rows[0], &s.headers, 1).unwrap();
        assert_eq!(fund.id, "fundo-1");
        assert_eq!(fund.name, "Pátria");
        assert_eq!(fund.ticket_size.as_deref(), Some("R$ 150-500mi"));
        let range = fund.ticket_range.unwrap();
        assert_eq!((range.min, range.max), (Some(150.0), Some(500.0)));
        assert_eq!(fund.ideal_deal_type.as_deref(), Some("Controle, Minoritário"));
        assert_eq!(fund.preferred_position.as_deref(), Some("Controle, Minoritário"));
        assert!(fund.sectors.contains(&Sector::Technology));
        assert!(fund.sectors.contains(&Sector::Health));
        assert_eq!(fund.minimum_revenue.as_deref(), Some("R$ 50mi"));
        assert_eq!(fund.minimum_ebitda.as_deref(), Some("R$ 10mi"));
        assert_eq!(fund.portfolio_company_names, vec!["Alpha", "Beta Saúde", "Gama"]);
        assert_eq!(fund.contact_name.as_deref(), Some("Ana"));
        assert_eq!(fund.phone.as_deref(), Some("+55 11 9999-0000"));
        assert_eq!(fund.email.as_deref(), Some("ana@patria.com"));
        assert_eq!(fund.extra.get("AUM").map(String::as_str), Some("R$ 30 bi"));
        assert_eq!(fund.extra.len(), 1);
    }

    #[test]
    fn deal_type_reads_only_the_newest_entry() {
        let s = sheet(
            "Targets",
            &[
                &["Fundo", "Tipo ideal"],
                &["Pátria", "02/25: minoritário. 03/24: controle"],
            ],
        );
        let fund = assemble(&s.rows[0], &s.headers, 1).unwrap();
        assert_eq!(fund.ideal_deal_type.as_deref(), Some("Minoritário"));
        assert_eq!(fund.preferred_position.as_deref(), Some("Minoritário"));
    }

    #[test]
    fn ticket_size_tracks_the_parsed_range() {
        let s = sheet(
            "Targets",
            &[
                &["Fundo", "Ticket"],
                &["Kinea", "02/25: sem mudança. 03/24: R$ 100mi"],
            ],
        );
        let fund = assemble(&s.rows[0], &s.headers, 1).unwrap();
        let range = fund.ticket_range.unwrap();
        assert_eq!((range.min, range.max), (Some(100.0), Some(100.0)));
        assert_eq!(fund.ticket_size.as_deref(), Some("R$ 100mi"));
        assert_eq!(fund.ticket_size, range.matched);
    }

    #[test]
    fn revenue_floor_falls_back_to_ticket_cell() {
        let s = sheet(
            "Targets",
            &[
                &["Fundo", "Ticket", "Setores"],
                &["Kinea", "R$ 80mi; receita mínima de R$ 200mi", "Agro"],
            ],
        );
        let fund = assemble(&s.rows[0], &s.headers, 1).unwrap();
        assert_eq!(fund.minimum_revenue.as_deref(), Some("R$ 200mi"));
        assert_eq!(fund.minimum_ebitda, None);
    }

    #[test]
    fn missing_fields_stay_absent() {
        let s = sheet("Targets", &[&["Fundo", "Ticket"], &["Vinci", "a definir"]]);
        let fund = assemble(&s.rows[0], &s.headers, 1).unwrap();
        assert_eq!(fund.ticket_size, None);
        assert_eq!(fund.ticket_range, None);
        assert!(fund.sectors.is_empty());
        assert_eq!(fund.ideal_deal_type, None);
        assert!(fund.portfolio_company_names.is_empty());
    }

    #[test]
    fn rejection_gate() {
        let s = sheet(
            "Targets",
            &[
                &["Fundo", "Obs"],
                &["Fundo ", "x"],
                &["Fund 2", "x"],
                &["undefined", "x"],
                &["", "x"],
                &["FUND", "x"],
                &["Fundo Pátria", "x"],
            ],
        );
        let (funds, rejected) = extract_funds(&s);
        assert_eq!(funds.len(), 1);
        assert_eq!(funds[0].name, "Fundo Pátria");
        assert_eq!(funds[0].id, "fundo-6");
        let reasons: Vec<_> = rejected.iter().map(|r| r.reason).collect();
        assert_eq!(
            reasons,
            vec![
                RejectionReason::GenericFundWord,
                RejectionReason::PlaceholderName,
                RejectionReason::UndefinedLiteral,
                RejectionReason::EmptyName,
                RejectionReason::GenericFundWord,
            ]
        );
        assert_eq!(rejected[0].row_number, 2);
    }

    #[test]
    fn empty_name_cell_falls_back_to_second_column() {
        let s = sheet("Targets", &[&["", ""], &["", "Spectra"]]);
        let (funds, rejected) = extract_funds(&s);
        assert!(rejected.is_empty());
        assert_eq!(funds[0].name, "Spectra");
    }

    #[test]
    fn portfolio_names_are_filtered_and_capped() {
        assert_eq!(
            portfolio_names("Add-on em Alpha, Beta (saúde); Com, XY. Delta"),
            vec!["Add-on em Alpha", "Beta", "Delta"]
        );
        let many: Vec<String> = (0..20).map(|i| format!("Empresa{i}")).collect();
        assert_eq!(portfolio_names(&many.join(", ")).len(), MAX_PORTFOLIO_NAMES);
        assert!(portfolio_names("sem portfolio ainda").is_empty());
    }
}
