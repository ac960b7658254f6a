//! Extraction orchestrator: one archived product page in, three records out.
//!
//! The orchestrator only fails when the byte stream cannot be read as a
//! document at all. Every other problem (a missing node, an unrecognized
//! unit, a price without an amount) is logged, recorded as a
//! [`FieldWarning`], and leaves the affected field unset.

use chrono::{DateTime, Utc};
use venik_core::{
    ExtractorConfig, FieldWarning, NutritionSnapshot, PriceSnapshot, Product, ProductExtraction,
    WarningKind,
};

use crate::error::ExtractError;
use crate::identifier::{resolve_sku, sku_from_canonical};
use crate::locator::{Field, FieldLocator, HtmlDocument};
use crate::price::extract_price;
use crate::storage_key::category_from_key;
use crate::unit::{
    normalize_reference_unit, normalize_unit, parse_reference_unit, parse_unit, UnitInfo,
};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Diagnostic field name for the storage-key category, which has no locator field.
const CATEGORY_FIELD: &str = "category";

/// Extracts product records from archived vendor pages.
///
/// Holds only immutable configuration, so one instance can serve concurrent
/// extractions on any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    #[must_use]
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extracts the product, price and nutrition records of one document,
    /// stamping the snapshots with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::DocumentUnparsable`] when `document` is empty or
    /// not valid UTF-8.
    pub fn extract(
        &self,
        document: &[u8],
        source_key: &str,
    ) -> Result<ProductExtraction, ExtractError> {
        self.extract_at(document, source_key, Utc::now())
    }

    /// Like [`Extractor::extract`] with an explicit snapshot timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::DocumentUnparsable`] when `document` is empty or
    /// not valid UTF-8.
    pub fn extract_at(
        &self,
        document: &[u8],
        source_key: &str,
        scraped_at: DateTime<Utc>,
    ) -> Result<ProductExtraction, ExtractError> {
        let text = decode_document(document, source_key)?;
        let html = HtmlDocument::parse(text);
        Ok(self.extract_from(&html, source_key, scraped_at))
    }

    /// Assembles the records from any [`FieldLocator`]. Infallible: absent
    /// fields become diagnostics.
    pub fn extract_from<L: FieldLocator>(
        &self,
        locator: &L,
        source_key: &str,
        scraped_at: DateTime<Utc>,
    ) -> ProductExtraction {
        let mut diagnostics = Diagnostics::new(source_key);

        let name = diagnostics.locate_text(locator, Field::Title);
        let description = diagnostics.locate_text(locator, Field::DescriptionBody);

        let category =
            category_from_key(source_key, &self.config.vendor_prefix).map(str::to_owned);
        if category.is_none() {
            diagnostics.record(
                CATEGORY_FIELD,
                WarningKind::FieldMissing,
                format!(
                    "storage key has no category segment after prefix {:?}",
                    self.config.vendor_prefix
                ),
            );
        }

        let unit = resolve_unit(locator, &mut diagnostics);
        let regular_price = locate_regular_price(locator, &mut diagnostics);
        let country_of_origin = self.country_of_origin(locator, &mut diagnostics);

        let canonical_link = diagnostics.locate(locator, Field::CanonicalLink);
        if let Some(url) = canonical_link.as_deref() {
            if sku_from_canonical(url).is_none() {
                diagnostics.record(
                    Field::CanonicalLink.as_str(),
                    WarningKind::ValueRejected,
                    format!("no SKU token in canonical link {url:?}; using storage key"),
                );
            }
        }
        let resolved = resolve_sku(
            canonical_link.as_deref(),
            source_key,
            self.config.sku_fallback_prefix.as_deref(),
        );

        let product = Product {
            store_id: self.config.store_id,
            external_sku: resolved.sku,
            name,
            category,
            unit_type: Some(unit.unit_type),
            unit_value: Some(unit.value),
            unit_description: Some(unit.description),
            description,
            country_of_origin,
        };

        let mut price = PriceSnapshot::new(scraped_at);
        price.regular_price = regular_price;
        price.recompute_price_per_kg(&product);

        tracing::debug!(
            source_key,
            sku = %product.external_sku,
            sku_source = ?resolved.source,
            warnings = diagnostics.warnings.len(),
            "extracted product"
        );

        ProductExtraction {
            product,
            price,
            nutrition: NutritionSnapshot::empty(scraped_at),
            diagnostics: diagnostics.warnings,
        }
    }

    fn country_of_origin<L: FieldLocator>(
        &self,
        locator: &L,
        diagnostics: &mut Diagnostics<'_>,
    ) -> Option<String> {
        let text = diagnostics.locate_text(locator, Field::OriginBlock)?;
        let max_chars = self.config.origin_max_chars;
        if text.chars().count() >= max_chars {
            diagnostics.record(
                Field::OriginBlock.as_str(),
                WarningKind::ValueRejected,
                format!("origin text is {max_chars} characters or longer"),
            );
            return None;
        }
        Some(text)
    }
}

/// Extracts one document with the default vendor configuration and the given
/// `store_id`.
///
/// # Errors
///
/// Returns [`ExtractError::DocumentUnparsable`] when `document` is empty or not
/// valid UTF-8.
pub fn extract_product_data(
    document: &[u8],
    source_key: &str,
    store_id: i32,
) -> Result<ProductExtraction, ExtractError> {
    Extractor::new(ExtractorConfig {
        store_id,
        ..ExtractorConfig::default()
    })
    .extract(document, source_key)
}

/// Unit precedence: the price-per-unit reference unit, then the package
/// subtitle, then the per-piece default. An absent price-per-unit block is
/// reported even when the subtitle supplies the unit.
fn resolve_unit<L: FieldLocator>(locator: &L, diagnostics: &mut Diagnostics<'_>) -> UnitInfo {
    let reference = diagnostics.locate_text(locator, Field::PricePerUnit);
    if let Some(text) = reference.as_deref() {
        if let Some(unit) = parse_reference_unit(text) {
            return unit;
        }
        diagnostics.record(
            Field::PricePerUnit.as_str(),
            WarningKind::UnitUnrecognized,
            format!("unrecognized reference unit {text:?}"),
        );
    }

    match locator.lookup(Field::UnitSubtitle) {
        Some(text) if text.trim().is_empty() => normalize_unit(None),
        Some(text) => parse_unit(&text).unwrap_or_else(|| {
            diagnostics.record(
                Field::UnitSubtitle.as_str(),
                WarningKind::UnitUnrecognized,
                format!("unrecognized unit {text:?}"),
            );
            UnitInfo::package(text.trim())
        }),
        None => {
            if let Some(text) = reference.as_deref() {
                return normalize_reference_unit(text);
            }
            diagnostics.record(
                Field::UnitSubtitle.as_str(),
                WarningKind::FieldMissing,
                "neither a price-per-unit block nor a unit subtitle is present",
            );
            normalize_unit(None)
        }
    }
}

fn locate_regular_price<L: FieldLocator>(
    locator: &L,
    diagnostics: &mut Diagnostics<'_>,
) -> Option<f64> {
    let text = diagnostics.locate(locator, Field::PriceContainer)?;
    let price = extract_price(&text);
    if price.is_none() {
        diagnostics.record(
            Field::PriceContainer.as_str(),
            WarningKind::PriceUnparsable,
            format!("no currency amount in {text:?}"),
        );
    }
    price
}

fn decode_document<'a>(document: &'a [u8], source_key: &str) -> Result<&'a str, ExtractError> {
    let unparsable = |reason: String| ExtractError::DocumentUnparsable {
        source_key: source_key.to_string(),
        reason,
    };
    let bytes = document.strip_prefix(UTF8_BOM).unwrap_or(document);
    let text = std::str::from_utf8(bytes)
        .map_err(|e| unparsable(format!("not valid UTF-8: {e}")))?;
    if text.trim().is_empty() {
        return Err(unparsable("document is empty".to_string()));
    }
    Ok(text)
}

/// Warnings collected for one document, each also emitted as a `warn` event.
struct Diagnostics<'a> {
    source_key: &'a str,
    warnings: Vec<FieldWarning>,
}

impl<'a> Diagnostics<'a> {
    fn new(source_key: &'a str) -> Self {
        Self {
            source_key,
            warnings: Vec::new(),
        }
    }

    fn record(&mut self, field: &str, kind: WarningKind, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!(
            source_key = self.source_key,
            field,
            ?kind,
            reason = %reason,
            "field extraction degraded"
        );
        self.warnings.push(FieldWarning {
            field: field.to_string(),
            source_key: self.source_key.to_string(),
            kind,
            reason,
        });
    }

    /// Looks up `field`, recording a `FieldMissing` warning when it is absent.
    fn locate<L: FieldLocator>(&mut self, locator: &L, field: Field) -> Option<String> {
        let value = locator.lookup(field);
        if value.is_none() {
            self.record(
                field.as_str(),
                WarningKind::FieldMissing,
                "not found in document",
            );
        }
        value
    }

    /// Like [`Diagnostics::locate`], but a field that is present with no text
    /// is recorded as `ValueRejected` and treated as unset.
    fn locate_text<L: FieldLocator>(&mut self, locator: &L, field: Field) -> Option<String> {
        let text = self.locate(locator, field)?;
        if text.trim().is_empty() {
            self.record(field.as_str(), WarningKind::ValueRejected, "found but empty");
            return None;
        }
        Some(text)
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
