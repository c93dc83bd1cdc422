//! Running-log cells: "02/25: latest note. 03/24: older note. 05/22: oldest".
//!
//! Authors write the newest entry first. That order is trusted, not re-sorted; when the
//! embedded dates disagree we only log it.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{2})/(\d{4}|\d{2}):\s*").expect("narrative marker regex"))
}

/// One dated entry of a running log.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeEntry<'a> {
    /// Marker as written, without the colon ("02/25").
    pub marker: &'a str,
    /// First day of the marked month, when the marker is a valid month.
    pub period: Option<NaiveDate>,
    pub text: &'a str,
}

fn parse_period(month: &str, year: &str) -> Option<NaiveDate> {
    let month: u32 = month.parse().ok()?;
    let mut year: i32 = year.parse().ok()?;
    if year < 100 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// All dated entries in source order. Empty when the text carries no marker.
pub fn split_entries(text: &str) -> Vec<NarrativeEntry<'_>> {
    let markers: Vec<_> = marker_re().captures_iter(text).collect();
    markers
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            let month = caps.get(1)?;
            let year = caps.get(2)?;
            let end = markers
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(text.len());
            Some(NarrativeEntry {
                marker: &text[month.start()..year.end()],
                period: parse_period(month.as_str(), year.as_str()),
                text: text[whole.end()..end].trim(),
            })
        })
        .collect()
}

/// True unless some entry is dated later than an entry written before it.
pub fn is_newest_first(entries: &[NarrativeEntry<'_>]) -> bool {
    let periods: Vec<NaiveDate> = entries.iter().filter_map(|e| e.period).collect();
    periods.windows(2).all(|w| w[0] >= w[1])
}

/// Text of the first (newest) dated entry, or the whole input when no marker is present.
pub fn most_recent_entry(text: &str) -> &str {
    let entries = split_entries(text);
    let Some(first) = entries.first() else {
        return text;
    };
    if !is_newest_first(&entries) {
        let markers: Vec<&str> = entries.iter().map(|e| e.marker).collect();
        tracing::warn!(
            markers = ?markers,
            chosen = first.marker,
            "dated entries are not newest-first; using the first entry"
        );
    }
    first.text
}
