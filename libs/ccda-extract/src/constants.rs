pub(crate) const CLINICAL_DOCUMENT: &str = "ClinicalDocument";
pub(crate) const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Template roots used to locate sections and entries.
pub mod templates {
    pub const PROBLEM_SECTION_ENTRIES_REQUIRED: &str = "2.16.840.1.113883.10.20.22.2.5.1";
    pub const PROBLEM_SECTION_ENTRIES_OPTIONAL: &str = "2.16.840.1.113883.10.20.22.2.5";
    pub const PAST_ILLNESS_SECTION: &str = "2.16.840.1.113883.10.20.22.2.20";
    pub const PROBLEM_OBSERVATION: &str = "2.16.840.1.113883.10.20.22.4.4";
    pub const ASSESSMENT_SCALE_OBSERVATION: &str = "2.16.840.1.113883.10.20.22.4.69";
    pub const DATE_OF_DIAGNOSIS_ACT: &str = "2.16.840.1.113883.10.20.22.4.502";
}
