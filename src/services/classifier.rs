//! Sector, segment and deal-type tagging against the shared keyword tables.

use std::collections::BTreeSet;

use crate::models::{DealType, Sector};
use crate::services::vocabulary::{deal_type_table, normalize_text, sector_table, segment_table};

pub fn classify_sectors(text: &str) -> BTreeSet<Sector> {
    sector_table().matches(&normalize_text(text)).collect()
}

pub fn classify_segments(text: &str) -> BTreeSet<String> {
    segment_table()
        .matches(&normalize_text(text))
        .map(str::to_string)
        .collect()
}

/// Sectors and segments of one free-text cell. Every table row is tested; hits accumulate.
pub fn classify(text: &str) -> (BTreeSet<Sector>, BTreeSet<String>) {
    let normalized = normalize_text(text);
    let sectors = sector_table().matches(&normalized).collect();
    let segments = segment_table()
        .matches(&normalized)
        .map(str::to_string)
        .collect();
    (sectors, segments)
}

/// Deal shapes mentioned in `text`, in table order (Controle, Minoritário, Majoritário, Growth, VC).
pub fn classify_deal_types(text: &str) -> Vec<DealType> {
    deal_type_table().matches(&normalize_text(text)).collect()
}

/// The stake-size subset of [`classify_deal_types`].
pub fn classify_positions(text: &str) -> Vec<DealType> {
    classify_deal_types(text)
        .into_iter()
        .filter(|t| t.is_position())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sectors_co_occur() {
        let sectors = classify_sectors("Rede de hospital com forte uso de tecnologia");
        assert!(sectors.contains(&Sector::Health));
        assert!(sectors.contains(&Sector::Technology));
    }

    #[test]
    fn result_does_not_depend_on_word_order() {
        assert_eq!(
            classify_sectors("tecnologia, hospital"),
            classify_sectors("hospital, tecnologia")
        );
    }

    #[test]
    fn portuguese_pair_hits_exactly_two_sectors() {
        let (sectors, _) = classify("Tecnologia e Saúde");
        assert_eq!(
            sectors.into_iter().collect::<Vec<_>>(),
            vec![Sector::Technology, Sector::Health]
        );
    }

    #[test]
    fn no_trigger_means_empty_sets() {
        let (sectors, segments) = classify("a definir");
        assert!(sectors.is_empty());
        assert!(segments.is_empty());
    }

    #[test]
    fn segments_from_a_mixed_cell() {
        let segments = classify_segments("SaaS B2B, fintech e clínicas odontológicas");
        for expected in ["SaaS", "SaaS B2B", "Fintech", "Clínicas", "Dental/Odonto"] {
            assert!(segments.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn deal_types_keep_table_order() {
        assert_eq!(
            classify_deal_types("Growth ou minoritário relevante; controle em casos específicos"),
            vec![DealType::Control, DealType::Minority, DealType::Growth]
        );
        assert_eq!(
            classify_positions("Growth, minoritário"),
            vec![DealType::Minority]
        );
        assert!(classify_deal_types("a definir").is_empty());
    }

    #[test]
    fn bare_school_words_need_context() {
        assert!(classify_segments("suporte técnico é fundamental").is_empty());
        let segments = classify_segments("ensino fundamental e ensino técnico");
        assert!(segments.contains("Ensino Básico/K-12"));
        assert!(segments.contains("Cursos Livres"));
        assert!(classify_segments("seguranca patrimonial").contains("Segurança"));
    }

    #[test]
    fn vc_is_a_whole_word() {
        assert_eq!(classify_deal_types("VC"), vec![DealType::VentureCapital]);
        assert!(classify_deal_types("mvc platform").is_empty());
    }
}
