//! Problem section conformance
//!
//! Walk order is fixed: template ids, scalar fields, author, then the child
//! entry lists. Findings therefore come out in reference depth-first order.

use ccda_models::{
    AssessmentScaleObservation, Code, DiagnosisDateAct, ProblemConcern, ProblemObservation,
    ProblemSection, SourceLocation, TemplateId,
};

use crate::compare::{Comparison, Conforms};
use crate::reconcile::Entry;

pub(crate) const PROBLEM_SECTION: &str = "Problem Section";

/// Compare the problem section of a scenario against a submitted document.
pub(crate) fn validate_problems(
    reference: Option<&ProblemSection>,
    submitted: Option<&ProblemSection>,
    cx: &mut Comparison,
) -> bool {
    let span = tracing::info_span!("section", name = PROBLEM_SECTION);
    let _enter = span.enter();

    tracing::info!(
        concerns = reference
            .and_then(|s| s.concerns.as_ref())
            .map_or(0, |c| c.len()),
        "Validating problem section"
    );
    let before = cx.findings().len();
    let matched = cx.compare(reference, submitted, PROBLEM_SECTION);
    tracing::info!(
        findings = cx.findings().len() - before,
        "Problem section validated"
    );
    matched
}

impl Conforms for ProblemSection {
    fn conforms(&self, submitted: &Self, element: &str, cx: &mut Comparison) -> bool {
        let mut matched = true;
        matched &= cx.compare(
            self.template_ids.as_deref(),
            submitted.template_ids.as_deref(),
            element,
        );
        matched &= cx.compare(
            self.code.as_ref(),
            submitted.code.as_ref(),
            &format!("{element} Code"),
        );
        matched &= cx.compare(
            self.author.as_ref(),
            submitted.author.as_ref(),
            &format!("{element} Author"),
        );
        matched &= cx.compare_entries(
            self.concerns.as_deref(),
            submitted.concerns.as_deref(),
            "Problem Concern Act",
        );
        matched
    }
}

impl Conforms for ProblemConcern {
    fn conforms(&self, submitted: &Self, element: &str, cx: &mut Comparison) -> bool {
        let mut matched = true;
        matched &= cx.compare(
            self.template_ids.as_deref(),
            submitted.template_ids.as_deref(),
            element,
        );
        matched &= cx.compare(
            self.concern_code.as_ref(),
            submitted.concern_code.as_ref(),
            &format!("{element} Code"),
        );
        matched &= cx.compare(
            self.status_code.as_ref(),
            submitted.status_code.as_ref(),
            &format!("{element} Status Code"),
        );
        matched &= cx.compare(
            self.effective_time.as_ref(),
            submitted.effective_time.as_ref(),
            &format!("{element} Effective Time"),
        );
        matched &= cx.compare(
            self.author.as_ref(),
            submitted.author.as_ref(),
            &format!("{element} Author"),
        );
        matched &= cx.compare_entries(
            self.observations.as_deref(),
            submitted.observations.as_deref(),
            &format!("{element} Problem Observation"),
        );
        matched
    }

    fn source(&self) -> Option<&SourceLocation> {
        self.effective_time.as_ref().and_then(|t| t.source())
    }
}

/// A concern is identified by the problem it tracks: the code of its first
/// observation, falling back to the concern act code.
impl Entry for ProblemConcern {
    fn primary_code(&self) -> Option<&Code> {
        self.observations
            .as_ref()
            .and_then(|o| o.first())
            .and_then(|o| o.problem_code.as_ref())
            .or(self.concern_code.as_ref())
    }

    fn template_ids(&self) -> Option<&[TemplateId]> {
        self.template_ids.as_deref()
    }
}

impl Conforms for ProblemObservation {
    fn conforms(&self, submitted: &Self, element: &str, cx: &mut Comparison) -> bool {
        let mut matched = true;
        matched &= cx.compare(
            self.template_ids.as_deref(),
            submitted.template_ids.as_deref(),
            element,
        );
        matched &= cx.compare(
            self.problem_type.as_ref(),
            submitted.problem_type.as_ref(),
            &format!("{element} Problem Type"),
        );
        matched &= cx.compare_entries(
            self.problem_type_translations.as_deref(),
            submitted.problem_type_translations.as_deref(),
            &format!("{element} Problem Type Translation"),
        );
        matched &= cx.compare(
            self.effective_time.as_ref(),
            submitted.effective_time.as_ref(),
            &format!("{element} Effective Time"),
        );
        matched &= cx.compare(
            self.problem_code.as_ref(),
            submitted.problem_code.as_ref(),
            &format!("{element} Problem Code"),
        );
        matched &= cx.compare(
            self.author.as_ref(),
            submitted.author.as_ref(),
            &format!("{element} Author"),
        );
        matched &= cx.compare_entries(
            self.assessment_scale_observations.as_deref(),
            submitted.assessment_scale_observations.as_deref(),
            &format!("{element} Assessment Scale Observation"),
        );
        matched &= cx.compare(
            self.date_of_diagnosis.as_ref(),
            submitted.date_of_diagnosis.as_ref(),
            &format!("{element} Date of Diagnosis Act"),
        );
        matched
    }

    fn source(&self) -> Option<&SourceLocation> {
        self.effective_time.as_ref().and_then(|t| t.source())
    }
}

impl Entry for ProblemObservation {
    fn primary_code(&self) -> Option<&Code> {
        self.problem_code.as_ref()
    }

    fn template_ids(&self) -> Option<&[TemplateId]> {
        self.template_ids.as_deref()
    }
}

impl Conforms for AssessmentScaleObservation {
    fn conforms(&self, submitted: &Self, element: &str, cx: &mut Comparison) -> bool {
        let mut matched = true;
        matched &= cx.compare(
            self.template_ids.as_deref(),
            submitted.template_ids.as_deref(),
            element,
        );
        matched &= cx.compare(
            self.code.as_ref(),
            submitted.code.as_ref(),
            &format!("{element} Code"),
        );
        matched &= cx.compare(
            self.effective_time.as_ref(),
            submitted.effective_time.as_ref(),
            &format!("{element} Effective Time"),
        );
        matched &= cx.compare(
            self.value.as_ref(),
            submitted.value.as_ref(),
            &format!("{element} Value"),
        );
        matched
    }

    fn source(&self) -> Option<&SourceLocation> {
        self.effective_time.as_ref().and_then(|t| t.source())
    }
}

impl Entry for AssessmentScaleObservation {
    fn primary_code(&self) -> Option<&Code> {
        self.code.as_ref()
    }

    fn template_ids(&self) -> Option<&[TemplateId]> {
        self.template_ids.as_deref()
    }
}

impl Conforms for DiagnosisDateAct {
    fn conforms(&self, submitted: &Self, element: &str, cx: &mut Comparison) -> bool {
        let mut matched = true;
        matched &= cx.compare(
            self.template_ids.as_deref(),
            submitted.template_ids.as_deref(),
            element,
        );
        matched &= cx.compare(
            self.code.as_ref(),
            submitted.code.as_ref(),
            &format!("{element} Code"),
        );
        matched &= cx.compare(
            self.effective_time.as_ref(),
            submitted.effective_time.as_ref(),
            &format!("{element} Effective Time"),
        );
        matched
    }

    fn source(&self) -> Option<&SourceLocation> {
        self.effective_time.as_ref().and_then(|t| t.source())
    }
}
