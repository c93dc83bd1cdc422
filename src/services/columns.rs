//! Header resolution for loosely named spreadsheet columns.
//!
//! Exact header first, then case-insensitive "header contains alias", then (for callers that
//! know the sheet shape) a fixed column position. A miss is `None`, never an error.

use crate::models::RawRow;

pub const NAME_ALIASES: &[&str] = &["Fundo", "Nome", "Nome do Fundo", "Fund", "Name", "Fund Name"];
pub const NAME_POSITIONS: &[usize] = &[0, 1];
pub const TICKET_ALIASES: &[&str] = &["Ticket", "Ticket Médio", "Cheque"];
pub const DEAL_ALIASES: &[&str] = &[
    "Tipo ideal",
    "Tipo de deal",
    "Deal ideal",
    "Tipo ideal de deal",
    "Deal type",
];
pub const SECTOR_ALIASES: &[&str] = &[
    "Setores",
    "Setores de maior interesse",
    "Setor",
    "Interesse",
    "restrições",
    "Sectors",
];
pub const PORTFOLIO_ALIASES: &[&str] = &["Portfolio", "Portfólio", "Empresas"];
pub const CONTACT_ALIASES: &[&str] = &["Contatos chave", "Contato", "Contatos", "Responsável", "Contact"];
pub const PHONE_ALIASES: &[&str] = &["Telefone", "Tel", "Phone", "Celular"];
pub const EMAIL_ALIASES: &[&str] = &["E-mail", "Email", "Mail", "E-Mail"];

/// Every alias list a fund row is read through; headers outside these land in `extra`.
pub const FUND_FIELDS: &[&[&str]] = &[
    NAME_ALIASES,
    TICKET_ALIASES,
    DEAL_ALIASES,
    SECTOR_ALIASES,
    PORTFOLIO_ALIASES,
    CONTACT_ALIASES,
    PHONE_ALIASES,
    EMAIL_ALIASES,
];

fn contains_ignore_case(header: &str, candidate: &str) -> bool {
    !header.is_empty() && header.to_lowercase().contains(&candidate.to_lowercase())
}

fn exact_columns<'a>(
    headers: &'a [String],
    candidates: &'a [&'a str],
) -> impl Iterator<Item = usize> + 'a {
    candidates.iter().flat_map(move |candidate| {
        headers
            .iter()
            .enumerate()
            .filter(move |(_, h)| !h.is_empty() && h.as_str() == *candidate)
            .map(|(i, _)| i)
    })
}

fn substring_columns<'a>(
    headers: &'a [String],
    candidates: &'a [&'a str],
) -> impl Iterator<Item = usize> + 'a {
    candidates.iter().flat_map(move |candidate| {
        headers
            .iter()
            .enumerate()
            .filter(move |(_, h)| contains_ignore_case(h, candidate))
            .map(|(i, _)| i)
    })
}

/// Column index for the first candidate that names a header.
pub fn resolve(headers: &[String], candidates: &[&str]) -> Option<usize> {
    exact_columns(headers, candidates)
        .next()
        .or_else(|| substring_columns(headers, candidates).next())
}

/// True when `header` would be picked up by any alias in `candidates`.
pub fn is_known(header: &str, candidates: &[&str]) -> bool {
    candidates
        .iter()
        .any(|c| header == *c || contains_ignore_case(header, c))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trimmed, non-empty cell text for a field.
///
/// Columns with an exact header match are tried first, each in turn, so a blank duplicate does not
/// hide a filled one. Then the first substring-matched column is used.
pub fn lookup(row: &RawRow, headers: &[String], candidates: &[&str]) -> Option<String> {
    exact_columns(headers, candidates)
        .find_map(|i| non_empty(row.at(i)))
        .or_else(|| {
            substring_columns(headers, candidates)
                .next()
                .and_then(|i| non_empty(row.at(i)))
        })
}

/// [`lookup`] when some header resolves; otherwise the first non-empty cell among `positions`.
pub fn lookup_or_position(
    row: &RawRow,
    headers: &[String],
    candidates: &[&str],
    positions: &[usize],
) -> Option<String> {
    if resolve(headers, candidates).is_some() {
        return lookup(row, headers, candidates);
    }
    positions.iter().find_map(|&i| non_empty(row.at(i)))
}
