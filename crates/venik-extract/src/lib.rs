pub mod error;
pub mod extract;
pub mod identifier;
pub mod locator;
pub mod price;
pub mod storage_key;
pub mod unit;

pub use error::ExtractError;
pub use extract::{extract_product_data, Extractor};
pub use identifier::resolve_sku;
pub use locator::{Field, FieldLocator, HtmlDocument};
pub use price::extract_price;
pub use unit::{normalize_reference_unit, normalize_unit, UnitInfo};
