use thiserror::Error;

/// Fatal failure of a single document extraction.
///
/// Missing or unparsable fields are not errors; they are reported as
/// [`venik_core::FieldWarning`] diagnostics on the extraction result.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document {source_key} is unparsable: {reason}")]
    DocumentUnparsable { source_key: String, reason: String },
}
