//! C-CDA scenario content conformance engine
//!
//! Compares a submitted clinical document against a reference "scenario"
//! document and reports every deviation as a [`Finding`]: required content
//! that is missing, content the scenario does not call for, and content whose
//! attributes differ.
//!
//! # Architecture
//!
//! ```text
//! ValidatorConfig (declarative) → ValidationPlan (executable) → Validator (reusable)
//! ```
//!
//! - [`ValidatorConfig`] selects the sections to compare, the pairing policy
//!   for repeating entries and report defaults. Serializable (YAML/JSON).
//! - [`ValidationPlan`] is the compiled, checked form: an ordered list of
//!   section steps.
//! - [`Validator`] owns the plan. Each `validate()` call creates a short-lived
//!   run that walks the reference tree and returns a [`ValidationOutcome`].
//!
//! # Comparison model
//!
//! Every field goes through one tri-state rule ([`Comparison::compare`]):
//! absent/absent passes, absent/present and present/absent each yield exactly
//! one error, and present/present is delegated to the kind's [`Conforms`]
//! impl. Template identifier lists are subset checks, effective times are
//! compared by the shape of the reference, and repeating entries are paired
//! by a [`PairingStrategy`] before recursion.

use serde::{Deserialize, Serialize};

mod compare;
mod datatypes;
mod error;
mod finding;
mod identity;
mod plan;
mod reconcile;
mod steps;
mod time;
mod validator;

pub use compare::{Comparison, Conforms};
pub use error::ConfigError;
pub use finding::{Finding, FindingCollector, Severity, DOCUMENT_ROOT, UNKNOWN_LINE};
pub use identity::templates_are_found;
pub use plan::{Step, ValidationPlan};
pub use reconcile::{pair, Entry, Pairing, PairingStrategy};
pub use validator::{validate, ValidationOutcome, Validator};

// ============================================================================
// Core Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    #[serde(default)]
    pub sections: SectionsConfig,
    #[serde(default)]
    pub pairing: PairingConfig,
    #[serde(default)]
    pub exec: ExecConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

// ============================================================================
// Sections Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionsConfig {
    #[serde(default = "default_true")]
    pub problems: bool,
    #[serde(default = "default_true")]
    pub past_illness: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            problems: true,
            past_illness: true,
        }
    }
}

// ============================================================================
// Pairing Config
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingConfig {
    #[serde(default)]
    pub strategy: PairingStrategy,
}

// ============================================================================
// Execution Config
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecConfig {
    /// Compare sections on the rayon pool. Output order is unaffected.
    #[serde(default)]
    pub parallel_sections: bool,
}

// ============================================================================
// Report Config
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_location")]
    pub default_location: String,
    #[serde(default = "default_line")]
    pub default_line: String,
}

fn default_location() -> String {
    DOCUMENT_ROOT.to_string()
}

fn default_line() -> String {
    UNKNOWN_LINE.to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_location: default_location(),
            default_line: default_line(),
        }
    }
}

// ============================================================================
// ValidatorConfig Implementation
// ============================================================================

impl ValidatorConfig {
    pub fn defaults() -> Self {
        Self {
            sections: SectionsConfig::default(),
            pairing: PairingConfig::default(),
            exec: ExecConfig::default(),
            report: ReportConfig::default(),
        }
    }

    pub fn compile(&self) -> Result<ValidationPlan, ConfigError> {
        if self.report.default_location.trim().is_empty() {
            return Err(ConfigError::EmptyDefaultLocation);
        }

        let mut steps = Vec::new();

        if self.sections.problems {
            steps.push(Step::Problems);
        }
        if self.sections.past_illness {
            steps.push(Step::PastIllness);
        }

        if steps.is_empty() {
            return Err(ConfigError::NoSectionsEnabled);
        }

        Ok(ValidationPlan {
            steps,
            pairing: self.pairing.strategy,
            parallel_sections: self.exec.parallel_sections,
            default_location: self.report.default_location.clone(),
            default_line: self.report.default_line.clone(),
        })
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn builder() -> ValidatorConfigBuilder {
        ValidatorConfigBuilder::default()
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

// ============================================================================
// Builder Pattern
// ============================================================================

#[derive(Debug, Default, Clone)]
pub struct ValidatorConfigBuilder {
    cfg: Option<ValidatorConfig>,
}

impl ValidatorConfigBuilder {
    pub fn problems(mut self, enabled: bool) -> Self {
        self.cfg().sections.problems = enabled;
        self
    }

    pub fn past_illness(mut self, enabled: bool) -> Self {
        self.cfg().sections.past_illness = enabled;
        self
    }

    pub fn pairing(mut self, strategy: PairingStrategy) -> Self {
        self.cfg().pairing.strategy = strategy;
        self
    }

    pub fn parallel_sections(mut self, parallel: bool) -> Self {
        self.cfg().exec.parallel_sections = parallel;
        self
    }

    pub fn default_location(mut self, location: impl Into<String>) -> Self {
        self.cfg().report.default_location = location.into();
        self
    }

    pub fn default_line(mut self, line: impl Into<String>) -> Self {
        self.cfg().report.default_line = line.into();
        self
    }

    pub fn build(self) -> ValidatorConfig {
        self.cfg.unwrap_or_default()
    }

    fn cfg(&mut self) -> &mut ValidatorConfig {
        self.cfg.get_or_insert_with(ValidatorConfig::defaults)
    }
}
