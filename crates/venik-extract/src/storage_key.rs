//! Helpers for the archive storage-key convention
//! `<vendor-prefix>/<category>/<slug>-<sku>.html`.
//!
//! Keys are produced by the scraping run, not by the vendor, so everything
//! derived here is a fallback for data the page itself does not carry.

/// Token used when a key has no usable filename at all.
const UNKNOWN_SKU: &str = "unknown";

/// Returns the category segment that follows `vendor_prefix`.
///
/// The remainder after the prefix must still contain a `/`: a bare filename
/// directly under the prefix has no category. Keys outside the prefix yield
/// `None`.
///
/// ```
/// use venik_extract::storage_key::category_from_key;
///
/// let key = "Jumbo/zuivel,-eieren,-boter/halfvolle-melk-1-l-123456PAK.html";
/// assert_eq!(category_from_key(key, "Jumbo/"), Some("zuivel,-eieren,-boter"));
/// ```
#[must_use]
pub fn category_from_key<'a>(key: &'a str, vendor_prefix: &str) -> Option<&'a str> {
    let rest = key.strip_prefix(vendor_prefix)?;
    let (category, _) = rest.split_once('/')?;
    Some(category).filter(|c| !c.is_empty())
}

/// Filename of the key with its extension stripped.
///
/// A leading dot (hidden file) is not treated as an extension separator.
#[must_use]
pub fn file_stem(key: &str) -> &str {
    let file_name = key.rsplit('/').next().unwrap_or(key);
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => &file_name[..dot],
        _ => file_name,
    }
}

/// SKU token encoded in a key's filename: the text after the last `-` of the
/// file stem, or the whole stem when the slug carries no suffix.
///
/// Always non-empty; a key with no filename degrades to `"unknown"`.
#[must_use]
pub fn sku_token_from_key(key: &str) -> &str {
    let stem = file_stem(key.trim());
    match stem.rsplit('-').next() {
        Some(token) if !token.is_empty() => token,
        _ if !stem.is_empty() => stem,
        _ => UNKNOWN_SKU,
    }
}
