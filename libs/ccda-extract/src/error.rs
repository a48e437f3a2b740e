use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Fatal problems reading the content tree. Conformance mismatches are never
/// reported through this type.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("expected a ClinicalDocument root element, found '{found}'")]
    NotClinicalDocument { found: String },

    #[error("invalid lineNumber attribute '{value}' on <{element}>")]
    InvalidLineNumber { element: String, value: String },
}
