//! Investment criteria stated in interaction notes, and the fund's current view across notes.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use crate::models::join_deal_types;
use crate::services::classifier::{classify_deal_types, classify_positions, classify_sectors};
use crate::services::money::{extract_ebitda_floor, extract_revenue_floor, extract_ticket};
use crate::services::narrative::most_recent_entry;
use crate::types::{Interaction, InteractionCriteria};

fn availability_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(metade|um\s+ter[çc]o|dois\s+ter[çc]os|\d+\s*/\s*\d+|\d+(?:[.,]\d+)?\s*%)(?:\s+d[oa]\s+(?:fundo|capital|ve[ií]culo))?\s+(?:ainda\s+)?(dispon[ií]ve(?:l|is)|a\s+investir|para\s+investir|livre)",
        )
        .expect("fund availability regex")
    })
}

/// "metade do fundo disponível", "2/3 disponível", "40% do fundo a investir".
pub fn extract_fund_availability(text: &str) -> Option<String> {
    availability_re()
        .find(text)
        .map(|m| m.as_str().trim().to_string())
}

/// Criteria from one note. Only the newest dated entry is read; absent fields stay `None`.
pub fn extract_criteria(text: &str) -> InteractionCriteria {
    let current = most_recent_entry(text);
    if current.trim().is_empty() {
        return InteractionCriteria::default();
    }
    let ticket_range = extract_ticket(current);
    let sectors = classify_sectors(current);
    InteractionCriteria {
        ticket_size: ticket_range.as_ref().and_then(|r| r.matched.clone()),
        ticket_range,
        ebitda_floor: extract_ebitda_floor(current),
        revenue_floor: extract_revenue_floor(current),
        ideal_deal_type: join_deal_types(&classify_deal_types(current)),
        preferred_position: join_deal_types(&classify_positions(current)),
        sectors: (!sectors.is_empty()).then_some(sectors),
        fund_availability: extract_fund_availability(current),
    }
}

fn interaction_date(interaction: &Interaction) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(interaction.date.trim(), "%d/%m/%Y").ok()
}

/// Newest-wins merge of every interaction logged for `fund_id`.
///
/// Notes with an unparsable date sort after every dated one. A note without stored criteria
/// has its summary read instead.
pub fn current_criteria(interactions: &[Interaction], fund_id: &str) -> InteractionCriteria {
    let mut notes: Vec<&Interaction> = interactions.iter().filter(|i| i.fund_id == fund_id).collect();
    notes.sort_by(|a, b| interaction_date(b).cmp(&interaction_date(a)));
    notes
        .into_iter()
        .map(|note| {
            note.criteria
                .clone()
                .unwrap_or_else(|| extract_criteria(&note.summary))
        })
        .fold(InteractionCriteria::default(), |merged, older| merged.or_older(&older))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sector;

    fn note(id: &str, date: &str, summary: &str) -> Interaction {
        Interaction {
            id: id.to_string(),
            fund_id: "fundo-1".to_string(),
            date: date.to_string(),
            participants: Vec::new(),
            summary: summary.to_string(),
            criteria: None,
        }
    }

    #[test]
    fn availability_phrases() {
        assert_eq!(
            extract_fund_availability("Ainda têm metade do fundo disponível.").as_deref(),
            Some("metade do fundo disponível")
        );
        assert_eq!(extract_fund_availability("2/3 disponível").as_deref(), Some("2/3 disponível"));
        assert_eq!(
            extract_fund_availability("cerca de 40% do fundo a investir").as_deref(),
            Some("40% do fundo a investir")
        );
        assert_eq!(extract_fund_availability("fundo totalmente investido"), None);
    }

    #[test]
    fn criteria_from_a_note() {
        let c = extract_criteria(
            "Não mudou. Ticket R$ 100-200mi, controle ou growth, foco em tech e saúde. \
             EBITDA mínimo de R$ 15mi. Metade do fundo disponível.",
        );
        let range = c.ticket_range.as_ref().unwrap();
        assert_eq!((range.min, range.max), (Some(100.0), Some(200.0)));
        assert_eq!(c.ticket_size.as_deref(), Some("R$ 100-200mi"));
        assert_eq!(c.ideal_deal_type.as_deref(), Some("Controle, Growth"));
        assert_eq!(c.preferred_position.as_deref(), Some("Controle"));
        assert_eq!(c.ebitda_floor.as_deref(), Some("R$ 15mi"));
        assert_eq!(c.revenue_floor, None);
        let sectors = c.sectors.unwrap();
        assert!(sectors.contains(&Sector::Technology));
        assert!(sectors.contains(&Sector::Health));
        assert_eq!(c.fund_availability.as_deref(), Some("Metade do fundo disponível"));
    }

    #[test]
    fn silent_note_has_no_criteria() {
        assert!(extract_criteria("Café com o time, sem novidades").is_empty());
        assert!(extract_criteria("").is_empty());
    }

    #[test]
    fn newer_notes_win_field_by_field() {
        let notes = vec![
            note("1", "10/01/2024", "Ticket R$ 50-100mi, minoritário, foco em agro"),
            note("2", "05/03/2025", "Agora ticket R$ 200mi"),
            note("3", "20/06/2024", "Controle apenas"),
            Interaction {
                fund_id: "fundo-2".to_string(),
                ..note("4", "01/01/2026", "Ticket R$ 1 bi")
            },
        ];
        let current = current_criteria(&notes, "fundo-1");
        assert_eq!(current.ticket_size.as_deref(), Some("R$ 200mi"));
        assert_eq!(current.ideal_deal_type.as_deref(), Some("Controle"));
        assert_eq!(current.preferred_position.as_deref(), Some("Controle"));
        assert!(current.sectors.unwrap().contains(&Sector::Agribusiness));
    }

    #[test]
    fn stored_criteria_are_used_as_is() {
        let mut stored = note("1", "01/02/2025", "texto livre sem valores");
        stored.criteria = Some(InteractionCriteria {
            revenue_floor: Some("R$ 300mi".to_string()),
            ..InteractionCriteria::default()
        });
        let current = current_criteria(&[stored], "fundo-1");
        assert_eq!(current.revenue_floor.as_deref(), Some("R$ 300mi"));
        assert!(current_criteria(&[], "fundo-1").is_empty());
    }
}
