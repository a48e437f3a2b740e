use serde::{Deserialize, Serialize};

use crate::problem::{PastIllnessSection, ProblemSection};

/// The sections of one clinical document that scenarios check.
///
/// Built once per document; a section the document does not contain is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problems: Option<ProblemSection>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_illness: Option<PastIllnessSection>,
}
