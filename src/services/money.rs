//! Money expressions in PT-BR / English deal shorthand ("R$ 150-400mi", "USD 50-70mi", "R$ 3,6 bi").
//!
//! Pattern families are tried most specific first and the first family with a hit wins.
//! Every figure is returned in millions.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::models::{Currency, MonetaryRange};
use crate::services::narrative::most_recent_entry;

const CURRENCY: &str = r"(?P<cur>R\$|US\$|USD|BRL|EUR|€)";
const NUMBER_LO: &str = r"(?P<lo>\d+(?:[.,]\d+)?)";
const NUMBER_HI: &str = r"(?P<hi>\d+(?:[.,]\d+)?)";
const RANGE_SEP: &str = r"\s*(?:-|–|—|a|até|to)\s*";
const MILLIONS: &str = r"(?P<scale>milh[õo]es|milh[ãa]o|mi|mm|m)\b";
const BILLIONS: &str = r"(?P<scale>bilh[õo]es|bilh[ãa]o|bi|bn|b)\b";
const ANY_SCALE: &str = r"(?P<scale>milh[õo]es|milh[ãa]o|mi|mm|m|bilh[õo]es|bilh[ãa]o|bi|bn|b)\b";

/// Which family produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFamily {
    /// "R$ 100-300mi"
    CurrencyRange,
    /// "R$ 100mi"
    CurrencySingle,
    /// "R$ 3,6 bi", "R$ 1-2 bi"
    CurrencyBillions,
    /// "100-300mi" in a field already known to hold money
    Bare,
}

struct MoneyPattern {
    family: PatternFamily,
    regex: Regex,
}

fn compile(family: PatternFamily, pattern: String) -> MoneyPattern {
    MoneyPattern {
        family,
        regex: Regex::new(&format!("(?i){}", pattern)).expect("money pattern"),
    }
}

fn patterns() -> &'static [MoneyPattern] {
    static PATTERNS: OnceLock<Vec<MoneyPattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            compile(
                PatternFamily::CurrencyRange,
                format!(r"{CURRENCY}\s*{NUMBER_LO}{RANGE_SEP}{NUMBER_HI}\s*{MILLIONS}"),
            ),
            compile(
                PatternFamily::CurrencySingle,
                format!(r"{CURRENCY}\s*{NUMBER_LO}\s*{MILLIONS}"),
            ),
            compile(
                PatternFamily::CurrencyBillions,
                format!(r"{CURRENCY}\s*{NUMBER_LO}(?:{RANGE_SEP}{NUMBER_HI})?\s*{BILLIONS}"),
            ),
            compile(
                PatternFamily::Bare,
                format!(r"\b{NUMBER_LO}{RANGE_SEP}{NUMBER_HI}\s*{ANY_SCALE}"),
            ),
            compile(PatternFamily::Bare, format!(r"\b{NUMBER_LO}\s*{ANY_SCALE}")),
        ]
    })
}

/// "3,6" and "3.6" both parse to 3.6.
fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok()
}

fn round_millions(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

fn to_range(caps: &Captures<'_>) -> Option<MonetaryRange> {
    let low = parse_decimal(caps.name("lo")?.as_str())?;
    let high = match caps.name("hi") {
        Some(hi) => parse_decimal(hi.as_str())?,
        None => low,
    };
    let factor = match caps.name("scale").map(|s| s.as_str().to_lowercase()) {
        Some(scale) if scale.starts_with('b') => 1000.0,
        _ => 1.0,
    };
    let currency = caps
        .name("cur")
        .and_then(|c| Currency::from_token(c.as_str()));
    Some(MonetaryRange::millions(
        round_millions(low * factor),
        round_millions(high * factor),
        currency,
        caps.get(0)?.as_str(),
    ))
}

fn extract_with(text: &str, allow_bare: bool) -> Option<(PatternFamily, MonetaryRange)> {
    patterns()
        .iter()
        .filter(|p| allow_bare || p.family != PatternFamily::Bare)
        .find_map(|p| {
            let caps = p.regex.captures(text)?;
            to_range(&caps).map(|range| (p.family, range))
        })
}

/// First money expression with an explicit currency token. No match is an empty range.
pub fn extract(text: &str) -> MonetaryRange {
    extract_with(text, false)
        .map(|(_, range)| range)
        .unwrap_or_default()
}

/// Like [`extract`], but also accepts bare figures ("150-400mi") since the field is known to hold money.
pub fn extract_in_money_field(text: &str) -> MonetaryRange {
    extract_with(text, true)
        .map(|(_, range)| range)
        .unwrap_or_default()
}

#[cfg(test)]
fn matching_family(text: &str, allow_bare: bool) -> Option<PatternFamily> {
    extract_with(text, allow_bare).map(|(family, _)| family)
}

/// Ticket from a running-log cell: newest entry first, then the whole cell.
pub fn extract_ticket(text: &str) -> Option<MonetaryRange> {
    if text.trim().is_empty() {
        return None;
    }
    [most_recent_entry(text), text]
        .into_iter()
        .map(extract_in_money_field)
        .find(|range| !range.is_empty())
}

fn revenue_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?i)\b(?:faturamento|fat\.?|receita(?:\s+l[ií]quida)?)\s*(?:m[ií]n(?:imo|ima)?\.?|acima\s+de|maior\s+que|superior\s+a|>|l[ií]quido)?\s*(?:de\s+|deve\s+ser\s+maior\s+que\s+)?(?P<value>(?:R\$|US\$|USD)\s*\d+(?:[.,]\d+)?(?:\s*(?:-|–|a)\s*\d+(?:[.,]\d+)?)?\s*(?:milh[õo]es|mi|mm|m|bilh[õo]es|bi)\b)",
            r"(?i)\b(?:faturamento|receita)(?:\s+l[ií]quida)?\s+(?:m[ií]nim[oa]\s+)?(?:de\s+)?(?P<value>(?:R\$|US\$|USD)\s*\d+(?:[.,]\d+)?)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("revenue floor regex"))
        .collect()
    })
}

fn ebitda_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?i)\bebitda\s*(?:m[ií]n(?:imo)?\.?|acima\s+de|maior\s+que|positivo\s+de|>)?\s*(?:de\s+)?(?P<value>(?:R\$|US\$|USD)\s*\d+(?:[.,]\d+)?(?:\s*(?:-|–|a)\s*\d+(?:[.,]\d+)?)?(?:\s*(?:milh[õo]es|mi|mm|m|bilh[õo]es|bi)\b)?)",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("ebitda floor regex"))
        .collect()
    })
}

fn first_value(patterns: &[Regex], text: &str) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }
    [most_recent_entry(text), text].into_iter().find_map(|t| {
        patterns.iter().find_map(|re| {
            re.captures(t)
                .and_then(|caps| caps.name("value"))
                .map(|m| m.as_str().trim().to_string())
        })
    })
}

/// Minimum revenue ("faturamento mínimo de R$ 50mi") stated in a free-text cell.
pub fn extract_revenue_floor(text: &str) -> Option<String> {
    first_value(revenue_patterns(), text)
}

/// Minimum EBITDA ("EBITDA mínimo de R$ 10 mi") stated in a free-text cell.
pub fn extract_ebitda_floor(text: &str) -> Option<String> {
    first_value(ebitda_patterns(), text)
}
