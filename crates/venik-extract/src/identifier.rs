//! Stable external identifier resolution.
//!
//! Fallback order, first success wins:
//! 1. the trailing slug token of the page's canonical link;
//! 2. the trailing slug token of the storage-key filename, optionally
//!    prefixed so it cannot collide with a vendor-assigned SKU.
//!
//! A URL-derived SKU is vendor-assigned and therefore always preferred; a
//! storage key is a scraping artifact only guaranteed unique within one run.

use crate::storage_key::sku_token_from_key;

/// Where a resolved SKU came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkuSource {
    CanonicalLink,
    StorageKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSku {
    pub sku: String,
    pub source: SkuSource,
}

/// Extracts the SKU token from a canonical product URL such as
/// `https://www.jumbo.com/producten/aardappelen-kriel-geel-1-kg-657405ZK?ref=x`.
///
/// Query string and fragment are dropped and the last path segment is split on
/// `-`. The token is rejected (`None`) unless the segment actually had a `-`
/// separator and the token contains a digit, which every vendor SKU does; a
/// link to a listing page such as `/producten/` carries no identifier.
#[must_use]
pub fn sku_from_canonical(url: &str) -> Option<&str> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = url[..end].trim().trim_end_matches('/');
    let segment = path.rsplit('/').next()?;
    let (_, token) = segment.rsplit_once('-')?;
    Some(token).filter(|t| !t.is_empty() && t.bytes().any(|b| b.is_ascii_digit()))
}

/// Resolves the product's external SKU. Never returns an empty SKU.
#[must_use]
pub fn resolve_sku(
    canonical_link: Option<&str>,
    source_key: &str,
    fallback_prefix: Option<&str>,
) -> ResolvedSku {
    if let Some(sku) = canonical_link.and_then(sku_from_canonical) {
        return ResolvedSku {
            sku: sku.to_string(),
            source: SkuSource::CanonicalLink,
        };
    }

    let token = sku_token_from_key(source_key);
    let sku = match fallback_prefix {
        Some(prefix) => format!("{prefix}{token}"),
        None => token.to_string(),
    };
    ResolvedSku {
        sku,
        source: SkuSource::StorageKey,
    }
}
