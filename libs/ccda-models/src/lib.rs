//! Canonical C-CDA content tree
//!
//! Typed, read-only value trees for the clinical content a scenario checks:
//! codes, template identifiers, timestamps, quantities, addresses and the
//! composite problem-section entries built from them.
//!
//! Every optional field follows one rule: a value that could not be found in
//! the source document is `None`, never an empty string. A present-but-empty
//! list (`Some(vec![])`) is distinct from an absent list (`None`).
//!
//! No comparison logic lives here - see `ccda-validator`.

mod datatypes;
mod document;
mod problem;

pub use datatypes::{
    Address, Author, Code, DataElement, EffectiveTime, Frequency, Quantity, SourceLocation,
    TemplateId,
};
pub use document::ClinicalDocument;
pub use problem::{
    AssessmentScaleObservation, DiagnosisDateAct, PastIllnessSection, ProblemConcern,
    ProblemObservation, ProblemSection,
};
