//! Output records produced by one extraction run over one archived product page.
//!
//! Every optional column is an `Option`: `None` means the value was not found
//! in the source document. Empty strings and zeroes are never used as
//! stand-ins for absence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit family of a product's packaged quantity.
///
/// `Product::unit_value` is always expressed in the base unit of its family:
/// grams for [`UnitType::Weight`], millilitres for [`UnitType::Volume`], and a
/// plain count for [`UnitType::Piece`] and [`UnitType::Package`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    Weight,
    Volume,
    Piece,
    Package,
}

impl UnitType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            UnitType::Weight => "weight",
            UnitType::Volume => "volume",
            UnitType::Piece => "piece",
            UnitType::Package => "package",
        }
    }
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One distinct item sold by a store, fully determined by one source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Source vendor; fixed per pipeline instance.
    pub store_id: i32,
    /// Resolved stable identifier. Never empty.
    pub external_sku: String,
    pub name: Option<String>,
    /// Storage-path segment following the vendor prefix, e.g.
    /// `"ontbijt,-broodbeleg-en-bakproducten"`.
    pub category: Option<String>,
    pub unit_type: Option<UnitType>,
    /// Magnitude in the base unit implied by `unit_type`.
    pub unit_value: Option<f64>,
    /// Human-readable label, either the source text or a synthesized one
    /// such as `"1 kilogram"`.
    pub unit_description: Option<String>,
    /// Description paragraphs and list items, one per line.
    pub description: Option<String>,
    pub country_of_origin: Option<String>,
}

/// Price observed for a product at extraction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    /// Assigned by the storage layer once the product row exists.
    pub product_id: Option<i64>,
    pub scraped_at: DateTime<Utc>,
    pub regular_price: Option<f64>,
    pub promo_price: Option<f64>,
    pub on_promotion: bool,
    pub promo_type: Option<String>,
    pub promo_text: Option<String>,
    /// Derived from `regular_price` and the product's unit; only ever set for
    /// weight-based products.
    pub price_per_kg: Option<f64>,
}

impl PriceSnapshot {
    /// Creates an empty snapshot stamped with `scraped_at`.
    #[must_use]
    pub fn new(scraped_at: DateTime<Utc>) -> Self {
        Self {
            product_id: None,
            scraped_at,
            regular_price: None,
            promo_price: None,
            on_promotion: false,
            promo_type: None,
            promo_text: None,
            price_per_kg: None,
        }
    }

    /// Re-derives `price_per_kg` from `regular_price` and the unit data of
    /// `product`. Calling it any number of times yields the same value.
    pub fn recompute_price_per_kg(&mut self, product: &Product) {
        self.price_per_kg = derive_price_per_kg(
            product.unit_type,
            product.unit_value,
            self.regular_price,
        );
    }
}

/// `regular_price / grams * 1000`, or `None` unless the unit is a weight with a
/// positive gram value and a price is known.
#[must_use]
pub fn derive_price_per_kg(
    unit_type: Option<UnitType>,
    unit_value: Option<f64>,
    regular_price: Option<f64>,
) -> Option<f64> {
    if unit_type != Some(UnitType::Weight) {
        return None;
    }
    let grams = unit_value.filter(|g| *g > 0.0)?;
    let price = regular_price?;
    Some(price / grams * 1000.0)
}

/// Nutritional values per 100 g observed at extraction time.
///
/// No current page layout exposes structured nutrition, so extraction leaves
/// every field unset. `raw_json` keeps an unparsed structured blob for sources
/// that do provide one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionSnapshot {
    pub product_id: Option<i64>,
    pub scraped_at: DateTime<Utc>,
    pub kcal_per_100g: Option<f64>,
    pub protein_per_100g: Option<f64>,
    pub fat_per_100g: Option<f64>,
    pub carbs_per_100g: Option<f64>,
    pub sodium_per_100g: Option<f64>,
    pub fiber_per_100g: Option<f64>,
    pub sugar_per_100g: Option<f64>,
    pub raw_json: Option<serde_json::Value>,
}

impl NutritionSnapshot {
    #[must_use]
    pub fn empty(scraped_at: DateTime<Utc>) -> Self {
        Self {
            product_id: None,
            scraped_at,
            kcal_per_100g: None,
            protein_per_100g: None,
            fat_per_100g: None,
            carbs_per_100g: None,
            sodium_per_100g: None,
            fiber_per_100g: None,
            sugar_per_100g: None,
            raw_json: None,
        }
    }

    /// Returns `true` when no nutrient value and no raw blob is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            self.kcal_per_100g,
            self.protein_per_100g,
            self.fat_per_100g,
            self.carbs_per_100g,
            self.sodium_per_100g,
            self.fiber_per_100g,
            self.sugar_per_100g,
        ]
        .iter()
        .all(Option::is_none)
            && self.raw_json.is_none()
    }
}

/// Category of a non-fatal extraction problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// The field's node (or one of its ancestors) is absent from the document.
    FieldMissing,
    /// Unit text was present but matched no known pattern.
    UnitUnrecognized,
    /// Price text was present but held no currency amount.
    PriceUnparsable,
    /// A value was located but failed a plausibility bound.
    ValueRejected,
}

/// A non-fatal diagnostic recorded while extracting one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldWarning {
    pub field: String,
    pub source_key: String,
    pub kind: WarningKind,
    pub reason: String,
}

/// Everything extracted from one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductExtraction {
    pub product: Product,
    pub price: PriceSnapshot,
    pub nutrition: NutritionSnapshot,
    pub diagnostics: Vec<FieldWarning>,
}

impl ProductExtraction {
    /// Diagnostics recorded for `field`, in the order they were raised.
    pub fn warnings_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldWarning> {
        self.diagnostics.iter().filter(move |w| w.field == field)
    }
}
