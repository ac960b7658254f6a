//! Reduction of free-text quantity descriptors to base units.
//!
//! Two entry points exist because vendor pages state quantities in two ways:
//! a package subtitle such as `"500 gram"` or `"1,5 L"` ([`normalize_unit`]),
//! and the reference unit of a price-per-unit block such as `"kilo"` or
//! `"100 gram"` ([`normalize_reference_unit`]). Both return magnitudes in
//! grams, millilitres or a plain count.

use std::sync::LazyLock;

use regex::Regex;
use venik_core::UnitType;

/// Normalized quantity of a product.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitInfo {
    pub unit_type: UnitType,
    /// Magnitude in the base unit of `unit_type`.
    pub value: f64,
    pub description: String,
}

impl UnitInfo {
    /// The result for products sold without any quantity descriptor.
    #[must_use]
    pub fn per_piece() -> Self {
        Self {
            unit_type: UnitType::Piece,
            value: 1.0,
            description: "per stuk".to_string(),
        }
    }

    /// The result for descriptors that match no known unit.
    #[must_use]
    pub fn package(text: &str) -> Self {
        Self {
            unit_type: UnitType::Package,
            value: 1.0,
            description: text.to_string(),
        }
    }
}

struct UnitPattern {
    re: Regex,
    unit_type: UnitType,
    factor: f64,
}

/// Ordered pattern groups: weight, volume, piece. Within each group the larger
/// unit comes first. Every unit token must end on a word boundary so that
/// `"500 ml"` is never read as liters.
static UNIT_PATTERNS: LazyLock<Vec<UnitPattern>> = LazyLock::new(|| {
    let pattern = |unit_type, factor, re: &str| UnitPattern {
        re: Regex::new(re).expect("valid unit regex"),
        unit_type,
        factor,
    };
    vec![
        pattern(
            UnitType::Weight,
            1000.0,
            r"(\d+(?:[.,]\d+)?)\s*(?:kilogram|kilo|kg)s?\b",
        ),
        pattern(UnitType::Weight, 1.0, r"(\d+(?:[.,]\d+)?)\s*(?:grams?|gr|g)\b"),
        pattern(
            UnitType::Volume,
            1000.0,
            r"(\d+(?:[.,]\d+)?)\s*(?:liters?|litres?|ltr|l)\b",
        ),
        pattern(
            UnitType::Volume,
            10.0,
            r"(\d+(?:[.,]\d+)?)\s*(?:centiliters?|cl)\b",
        ),
        pattern(
            UnitType::Volume,
            1.0,
            r"(\d+(?:[.,]\d+)?)\s*(?:milliliters?|millilitres?|ml)\b",
        ),
        pattern(UnitType::Piece, 1.0, r"(\d+)\s*(?:stukken|stuks|stuk|st)\b"),
        pattern(UnitType::Piece, 1.0, r"\bper\s*stuk\b"),
    ]
});

static REFERENCE_UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:per\s+)?(?:(\d+(?:[.,]\d+)?)\s*)?([a-z]+)\.?$")
        .expect("valid reference unit regex")
});

/// Normalizes a package quantity descriptor such as `"500 gram"`, `"1 KG"`,
/// `"1,5 L"` or `"6 stuks"`.
///
/// Never fails: absent or blank text yields `(piece, 1, "per stuk")` and text
/// matching no pattern yields `(package, 1, text)`. The description is the
/// trimmed input text.
#[must_use]
pub fn normalize_unit(text: Option<&str>) -> UnitInfo {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return UnitInfo::per_piece();
    };
    parse_unit(text).unwrap_or_else(|| UnitInfo::package(text))
}

/// Like [`normalize_unit`] but returns `None` when `text` is blank or matches
/// no known unit, so callers can tell a recognized unit from the fallback.
#[must_use]
pub fn parse_unit(text: &str) -> Option<UnitInfo> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let lower = text.to_lowercase();

    // First matching pattern wins; matches are never merged.
    UNIT_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.re.captures(&lower)?;
        let quantity = match caps.get(1) {
            Some(m) => parse_decimal(m.as_str())?,
            None => 1.0,
        };
        Some(UnitInfo {
            unit_type: pattern.unit_type,
            value: scale(quantity, pattern.factor)?,
            description: text.to_string(),
        })
    })
}

/// Normalizes the reference unit of a price-per-unit block, e.g. the `"kilo"`
/// in `"€11,53 / kilo"`.
///
/// The quantity defaults to 1 when omitted and the description is synthesized
/// from a canonical unit name (`"kilo"` becomes `"1 kilogram"`). Text that is
/// not a bare quantity-plus-unit falls back to [`normalize_unit`].
#[must_use]
pub fn normalize_reference_unit(text: &str) -> UnitInfo {
    let text = text.trim();
    if text.is_empty() {
        return UnitInfo::per_piece();
    }
    parse_reference_unit(text).unwrap_or_else(|| normalize_unit(Some(text)))
}

/// Like [`normalize_reference_unit`] but returns `None` for unrecognized text.
#[must_use]
pub fn parse_reference_unit(text: &str) -> Option<UnitInfo> {
    let lower = text.trim().to_lowercase();
    let Some(caps) = REFERENCE_UNIT_RE.captures(&lower) else {
        return parse_unit(text);
    };
    let quantity = match caps.get(1) {
        Some(m) => parse_decimal(m.as_str())?,
        None => 1.0,
    };
    let keyword = caps.get(2).map_or("", |m| m.as_str());
    let (unit_type, factor, name) = reference_keyword(keyword)?;

    let description = match unit_type {
        UnitType::Piece if (quantity - 1.0).abs() < f64::EPSILON => "per stuk".to_string(),
        UnitType::Piece => format!("{quantity} stuks"),
        _ => format!("{quantity} {name}"),
    };
    Some(UnitInfo {
        unit_type,
        value: scale(quantity, factor)?,
        description,
    })
}

fn reference_keyword(word: &str) -> Option<(UnitType, f64, &'static str)> {
    let unit = match word {
        "kilo" | "kilos" | "kg" | "kilogram" | "kilograms" => {
            (UnitType::Weight, 1000.0, "kilogram")
        }
        "gram" | "grams" | "gr" | "g" => (UnitType::Weight, 1.0, "gram"),
        "liter" | "liters" | "litre" | "ltr" | "l" => (UnitType::Volume, 1000.0, "liter"),
        "centiliter" | "cl" => (UnitType::Volume, 10.0, "centiliter"),
        "milliliter" | "millilitre" | "ml" => (UnitType::Volume, 1.0, "milliliter"),
        "stuk" | "stuks" | "stukken" | "st" => (UnitType::Piece, 1.0, "stuk"),
        _ => return None,
    };
    Some(unit)
}

/// Parses a numeric literal that may use a comma as decimal separator.
/// Digit runs too long for an `f64` are rejected.
fn parse_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Scales to the base unit, rounded to 3 decimals to absorb binary
/// floating-point noise such as `0.33 * 10 = 3.3000000000000003`.
/// `None` when the scaled magnitude overflows.
fn scale(quantity: f64, factor: f64) -> Option<f64> {
    let value = (quantity * factor * 1000.0).round() / 1000.0;
    value.is_finite().then_some(value)
}

#[cfg(test)]
#[path = "unit_test.rs"]
mod tests;
