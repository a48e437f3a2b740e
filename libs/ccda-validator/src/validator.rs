use ccda_models::ClinicalDocument;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use crate::compare::{Comparison, Conforms};
use crate::finding::{Finding, FindingCollector, Severity};
use crate::reconcile::PairingStrategy;
use crate::steps::{past_illness, problems};
use crate::{ConfigError, Step, ValidationPlan, ValidatorConfig};

/// Reusable validator - owns the compiled plan
#[derive(Debug, Clone)]
pub struct Validator {
    plan: ValidationPlan,
}

impl Validator {
    pub fn new(plan: ValidationPlan) -> Self {
        Self { plan }
    }

    pub fn from_config(config: &ValidatorConfig) -> Result<Self, ConfigError> {
        let plan = config.compile()?;
        Ok(Self::new(plan))
    }

    /// Compare a submitted document against a reference scenario.
    pub fn validate(
        &self,
        reference: &ClinicalDocument,
        submitted: &ClinicalDocument,
    ) -> ValidationOutcome {
        ValidationRun::new(&self.plan, reference, submitted).execute()
    }

    /// Validate many submissions against the same scenario.
    pub fn validate_batch(
        &self,
        reference: &ClinicalDocument,
        submissions: &[ClinicalDocument],
    ) -> Vec<ValidationOutcome> {
        submissions
            .iter()
            .map(|s| self.validate(reference, s))
            .collect()
    }

    /// Compare any single reference value against its submitted counterpart
    /// using this validator's pairing policy and report defaults.
    pub fn validate_section<T: Conforms + ?Sized>(
        &self,
        reference: Option<&T>,
        submitted: Option<&T>,
        element_name: &str,
    ) -> Vec<Finding> {
        let mut cx = Comparison::with_collector(self.plan.collector(), self.plan.pairing);
        cx.compare(reference, submitted, element_name);
        cx.into_collector().into_findings()
    }

    pub fn plan(&self) -> &ValidationPlan {
        &self.plan
    }
}

/// Compare `reference` against `submitted` with default settings and return
/// the ordered findings.
pub fn validate<T: Conforms + ?Sized>(
    reference: Option<&T>,
    submitted: Option<&T>,
    element_name: &str,
) -> Vec<Finding> {
    let mut cx = Comparison::new(PairingStrategy::default());
    cx.compare(reference, submitted, element_name);
    cx.into_collector().into_findings()
}

impl ValidationPlan {
    fn collector(&self) -> FindingCollector {
        FindingCollector::with_defaults(self.default_location.as_str(), self.default_line.as_str())
    }
}

/// Short-lived validation execution
struct ValidationRun<'a> {
    plan: &'a ValidationPlan,
    reference: &'a ClinicalDocument,
    submitted: &'a ClinicalDocument,
}

impl<'a> ValidationRun<'a> {
    fn new(
        plan: &'a ValidationPlan,
        reference: &'a ClinicalDocument,
        submitted: &'a ClinicalDocument,
    ) -> Self {
        Self {
            plan,
            reference,
            submitted,
        }
    }

    fn execute(self) -> ValidationOutcome {
        // Every section writes to a private buffer; buffers are joined in
        // plan order so the output never depends on scheduling.
        let buffers: Vec<FindingCollector> = if self.plan.parallel_sections {
            self.plan
                .steps
                .par_iter()
                .map(|step| self.execute_step(*step))
                .collect()
        } else {
            self.plan
                .steps
                .iter()
                .map(|step| self.execute_step(*step))
                .collect()
        };

        let mut findings = self.plan.collector();
        for buffer in buffers {
            findings.append(buffer);
        }

        ValidationOutcome::from_findings(findings.into_findings())
    }

    fn execute_step(&self, step: Step) -> FindingCollector {
        tracing::debug!(section = step.section_name(), "Running section");
        let mut cx = Comparison::with_collector(self.plan.collector(), self.plan.pairing);

        match step {
            Step::Problems => {
                problems::validate_problems(
                    self.reference.problems.as_ref(),
                    self.submitted.problems.as_ref(),
                    &mut cx,
                );
            }
            Step::PastIllness => {
                past_illness::validate_past_illness(
                    self.reference.past_illness.as_ref(),
                    self.submitted.past_illness.as_ref(),
                    &mut cx,
                );
            }
        }

        cx.into_collector()
    }
}

/// Result of validating one submitted document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub findings: Vec<Finding>,
}

impl ValidationOutcome {
    /// Valid exactly when no finding is an error.
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let valid = !findings.iter().any(|f| f.severity == Severity::Error);
        Self { valid, findings }
    }

    pub fn has_errors(&self) -> bool {
        !self.valid
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "valid": self.valid,
            "errorCount": self.error_count(),
            "warningCount": self.warning_count(),
            "infoCount": self.info_count(),
            "findings": self.findings,
        })
    }
}
