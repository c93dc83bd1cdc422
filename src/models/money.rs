use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Brl,
    Usd,
    Eur,
}

impl Currency {
    /// Map a currency token as written in the source ("R$", "US$", "usd", "€").
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_uppercase().as_str() {
            "R$" | "BRL" => Some(Currency::Brl),
            "US$" | "USD" => Some(Currency::Usd),
            "EUR" | "€" => Some(Currency::Eur),
            _ => None,
        }
    }
}

/// A money figure or range, always expressed in **millions** of `currency_hint`.
///
/// Both bounds `None` means nothing was found, which is a normal outcome.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonetaryRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub currency_hint: Option<Currency>,
    /// Source expression the figures came from, e.g. "R$ 150-400mi".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
}

impl MonetaryRange {
    pub fn none() -> Self {
        Self::default()
    }

    /// Builds a range in millions, swapping bounds so `min <= max`.
    pub fn millions(low: f64, high: f64, currency_hint: Option<Currency>, matched: &str) -> Self {
        let (min, max) = if low <= high { (low, high) } else { (high, low) };
        Self {
            min: Some(min),
            max: Some(max),
            currency_hint,
            matched: Some(matched.trim().to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn is_point(&self) -> bool {
        matches!((self.min, self.max), (Some(a), Some(b)) if a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_bounds_are_swapped() {
        let r = MonetaryRange::millions(400.0, 150.0, Some(Currency::Brl), " R$ 400-150mi ");
        assert_eq!(r.min, Some(150.0));
        assert_eq!(r.max, Some(400.0));
        assert_eq!(r.matched.as_deref(), Some("R$ 400-150mi"));
        assert!(!r.is_point());
    }

    #[test]
    fn currency_tokens() {
        assert_eq!(Currency::from_token("r$"), Some(Currency::Brl));
        assert_eq!(Currency::from_token("US$"), Some(Currency::Usd));
        assert_eq!(Currency::from_token("€"), Some(Currency::Eur));
        assert_eq!(Currency::from_token("GBP"), None);
        assert!(MonetaryRange::none().is_empty());
    }
}
