use crate::reconcile::PairingStrategy;
use crate::steps::past_illness::PAST_ILLNESS_SECTION;
use crate::steps::problems::PROBLEM_SECTION;

/// Compiled, executable form of a [`crate::ValidatorConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPlan {
    /// Sections to compare, in output order.
    pub steps: Vec<Step>,
    pub pairing: PairingStrategy,
    pub parallel_sections: bool,
    pub default_location: String,
    pub default_line: String,
}

/// One top-level section comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Problems,
    PastIllness,
}

impl Step {
    pub fn section_name(&self) -> &'static str {
        match self {
            Self::Problems => PROBLEM_SECTION,
            Self::PastIllness => PAST_ILLNESS_SECTION,
        }
    }
}
