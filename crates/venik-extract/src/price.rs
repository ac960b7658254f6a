//! Currency amounts from localized price text.

use std::sync::LazyLock;

use regex::Regex;

/// An amount introduced by a euro sign or code: `€2,19`, `€ 2.19`, `EUR 3`.
static CURRENCY_AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:€|\beur\b)\s*(\d+(?:[.,]\d+)?)").expect("valid currency amount regex")
});

/// A bare decimal amount with exactly two fraction digits: `2,19`.
static BARE_AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d+[.,]\d{2})\b").expect("valid bare amount regex")
});

/// Parses the first currency amount in `text`, accepting either a comma or a
/// period as decimal separator.
///
/// Amounts marked with a currency symbol are preferred; when none is present
/// a bare two-decimal amount is accepted. Returns `None` when the text holds
/// no amount.
///
/// ```
/// use venik_extract::extract_price;
///
/// assert_eq!(extract_price("Prijs: €2,19"), Some(2.19));
/// assert_eq!(extract_price("Prijs: €2.19"), Some(2.19));
/// assert_eq!(extract_price("Niet leverbaar"), None);
/// ```
#[must_use]
pub fn extract_price(text: &str) -> Option<f64> {
    let caps = CURRENCY_AMOUNT_RE
        .captures(text)
        .or_else(|| BARE_AMOUNT_RE.captures(text))?;
    let raw = caps.get(1)?.as_str();
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_decimal_separator() {
        assert_eq!(extract_price("Prijs: €2,19"), Some(2.19));
    }

    #[test]
    fn period_decimal_separator() {
        assert_eq!(extract_price("Prijs: €2.19"), Some(2.19));
    }

    #[test]
    fn space_after_currency_symbol() {
        assert_eq!(extract_price("€ 12,50"), Some(12.5));
    }

    #[test]
    fn whole_euro_amount() {
        assert_eq!(extract_price("Prijs: €3"), Some(3.0));
        assert_eq!(extract_price("EUR 4"), Some(4.0));
    }

    #[test]
    fn first_amount_wins() {
        assert_eq!(extract_price("Nu €1,99, was €2,49"), Some(1.99));
    }

    #[test]
    fn bare_amount_without_symbol() {
        assert_eq!(extract_price("Prijs: 0,89"), Some(0.89));
    }

    #[test]
    fn symbol_amount_preferred_over_earlier_bare_number() {
        assert_eq!(extract_price("2 voor 3,00 of €1,75 per stuk"), Some(1.75));
    }

    #[test]
    fn text_without_amount() {
        assert!(extract_price("Prijs onbekend").is_none());
        assert!(extract_price("").is_none());
    }

    #[test]
    fn bare_integer_is_not_a_price() {
        assert!(extract_price("Bevat 3 stuks").is_none());
    }

    #[test]
    fn overlong_amount_is_rejected() {
        let text = format!("Prijs: €{},00", "9".repeat(400));
        assert!(extract_price(&text).is_none());
    }

    #[test]
    fn euro_inside_word_is_not_a_currency_code() {
        assert!(extract_price("Europese kwaliteit 100").is_none());
    }
}
