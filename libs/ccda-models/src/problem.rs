//! Problem section entries
//!
//! Section → concern acts → problem observations, each observation optionally
//! carrying assessment scale observations and a date-of-diagnosis act.

use serde::{Deserialize, Serialize};

use crate::datatypes::{Author, Code, EffectiveTime, Quantity, TemplateId};

/// Problem section (`2.16.840.1.113883.10.20.22.2.5.1`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_ids: Option<Vec<TemplateId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub concerns: Option<Vec<ProblemConcern>>,
}

/// Problem concern act wrapping one or more problem observations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemConcern {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_ids: Option<Vec<TemplateId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub concern_code: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<EffectiveTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<Vec<ProblemObservation>>,
}

/// Problem observation (`2.16.840.1.113883.10.20.22.4.4`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemObservation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_ids: Option<Vec<TemplateId>>,

    /// `observation/code` - the kind of problem (finding, complaint, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_type: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_type_translations: Option<Vec<Code>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<EffectiveTime>,

    /// `observation/value` - the problem itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem_code: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_scale_observations: Option<Vec<AssessmentScaleObservation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_diagnosis: Option<DiagnosisDateAct>,
}

/// Assessment scale observation (`2.16.840.1.113883.10.20.22.4.69`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentScaleObservation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_ids: Option<Vec<TemplateId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<EffectiveTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Quantity>,
}

/// Date of diagnosis act (`2.16.840.1.113883.10.20.22.4.502`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisDateAct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_ids: Option<Vec<TemplateId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<EffectiveTime>,
}

/// History of past illness section (`2.16.840.1.113883.10.20.22.2.20`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastIllnessSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_ids: Option<Vec<TemplateId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<Vec<ProblemObservation>>,
}
