//! C-CDA markup → canonical content tree
//!
//! Evaluates a fixed set of relative location queries against a parsed
//! document and fills a [`ClinicalDocument`]. The read step is stateless and
//! branch-free beyond attribute presence:
//!
//! - an attribute that is present but blank counts as absent
//! - a data element takes its `value` attribute, falling back to the first
//!   child text node
//! - empty repeating node sets read as absent lists (concern lists excepted,
//!   which are always present)
//!
//! Malformed markup is reported as an [`ExtractionError`] before any
//! conformance comparison runs.

use ccda_models::ClinicalDocument;
use roxmltree::Document;

mod constants;
mod error;
mod problems;
mod reader;

pub use constants::templates;
pub use error::{ExtractionError, Result};
pub use problems::{read_past_illness_section, read_problem_section};
pub use reader::{
    read_address, read_address_list, read_author, read_code, read_code_list, read_data_element,
    read_effective_time, read_frequency, read_quantity, read_template_id, read_template_ids,
    read_text_content, read_text_content_list, xpath_of,
};

/// Parse `xml` and extract every supported section.
pub fn extract(xml: &str) -> Result<ClinicalDocument> {
    let doc = Document::parse(xml)?;
    extract_document(&doc)
}

/// Extract every supported section from an already parsed document.
pub fn extract_document(doc: &Document) -> Result<ClinicalDocument> {
    let root = doc.root_element();
    let name = root.tag_name().name();
    if name != constants::CLINICAL_DOCUMENT {
        return Err(ExtractionError::NotClinicalDocument {
            found: name.to_string(),
        });
    }

    tracing::debug!("Extracting canonical tree");

    Ok(ClinicalDocument {
        problems: read_problem_section(root)?,
        past_illness: read_past_illness_section(root)?,
    })
}
