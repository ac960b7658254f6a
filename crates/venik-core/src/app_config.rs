use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub archive_dir: PathBuf,
    pub vendor_prefix: String,
    pub store_id: i32,
    pub sku_fallback_prefix: Option<String>,
    pub origin_max_chars: usize,
    pub max_concurrent_documents: usize,
}

impl AppConfig {
    /// The extraction settings carried by this configuration.
    #[must_use]
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            store_id: self.store_id,
            vendor_prefix: self.vendor_prefix.clone(),
            sku_fallback_prefix: self.sku_fallback_prefix.clone(),
            origin_max_chars: self.origin_max_chars,
        }
    }
}

/// Per-pipeline settings handed to the extractor. Holds no handles and is
/// cheap to clone into worker tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Stamped on every extracted `Product`.
    pub store_id: i32,
    /// Storage-key prefix naming the vendor, e.g. `"Jumbo/"`.
    pub vendor_prefix: String,
    /// Prepended to SKUs derived from a storage-key filename, to keep them
    /// apart from vendor-assigned SKUs.
    pub sku_fallback_prefix: Option<String>,
    /// Origin captures of this many characters or more are discarded.
    pub origin_max_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            store_id: 1,
            vendor_prefix: "Jumbo/".to_string(),
            sku_fallback_prefix: None,
            origin_max_chars: 30,
        }
    }
}
