//! Past illness section conformance

use ccda_models::PastIllnessSection;

use crate::compare::{Comparison, Conforms};

pub(crate) const PAST_ILLNESS_SECTION: &str = "Past Illness Section";

pub(crate) fn validate_past_illness(
    reference: Option<&PastIllnessSection>,
    submitted: Option<&PastIllnessSection>,
    cx: &mut Comparison,
) -> bool {
    let span = tracing::info_span!("section", name = PAST_ILLNESS_SECTION);
    let _enter = span.enter();

    tracing::info!("Validating past illness section");
    let before = cx.findings().len();
    let matched = cx.compare(reference, submitted, PAST_ILLNESS_SECTION);
    tracing::info!(
        findings = cx.findings().len() - before,
        "Past illness section validated"
    );
    matched
}

impl Conforms for PastIllnessSection {
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
        matched &= cx.compare_entries(
            self.observations.as_deref(),
            submitted.observations.as_deref(),
            "Past Illness Problem Observation",
        );
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccda_models::{Code, ProblemObservation, TemplateId};

    fn past_illness(codes: &[&str]) -> PastIllnessSection {
        PastIllnessSection {
            template_ids: Some(vec![TemplateId::new("2.16.840.1.113883.10.20.22.2.20")]),
            code: Some(Code::new("11348-0", "2.16.840.1.113883.6.1")),
            observations: Some(
                codes
                    .iter()
                    .map(|c| ProblemObservation {
                        problem_code: Some(Code::new(*c, "2.16.840.1.113883.6.96")),
                        ..ProblemObservation::default()
                    })
                    .collect(),
            ),
        }
    }

    #[test]
    fn test_matching_past_illness() {
        let reference = past_illness(&["195967001"]);
        let mut cx = Comparison::default();
        assert!(validate_past_illness(Some(&reference), Some(&reference), &mut cx));
        assert!(cx.findings().is_empty());
    }

    #[test]
    fn test_unexpected_past_illness_section() {
        let submitted = past_illness(&[]);
        let mut cx = Comparison::default();
        assert!(!validate_past_illness(None, Some(&submitted), &mut cx));
        assert_eq!(
            cx.findings().findings()[0].message,
            "The scenario does not require Past Illness Section data, but submitted file does have Past Illness Section data"
        );
    }

    #[test]
    fn test_observation_code_mismatch() {
        let reference = past_illness(&["195967001"]);
        let submitted = past_illness(&["233604007"]);

        let mut cx = Comparison::default();
        validate_past_illness(Some(&reference), Some(&submitted), &mut cx);
        assert_eq!(cx.findings().len(), 1);
        assert!(cx.findings().findings()[0]
            .message
            .starts_with("The scenario requires Past Illness Problem Observation #1 Problem Code code value"));
    }
}
