//! Scalar C-CDA data types shared by every clinical entry
//!
//! No validation - just data representation.

use serde::{Deserialize, Serialize};

/// Where a value was read from in the source document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl SourceLocation {
    pub fn new(path: impl Into<String>, line: u32) -> Self {
        Self {
            path: Some(path.into()),
            line: Some(line),
        }
    }
}

/// A single text value with its origin.
///
/// A data element only exists when a non-blank value was found; readers
/// return `None` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataElement {
    pub value: String,

    #[serde(default, skip_serializing_if = "is_default_location")]
    pub location: SourceLocation,

    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<String>,
}

fn is_default_location(location: &SourceLocation) -> bool {
    *location == SourceLocation::default()
}

impl DataElement {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            location: SourceLocation::default(),
            use_: None,
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }

    pub fn with_use(mut self, use_: impl Into<String>) -> Self {
        self.use_ = Some(use_.into());
        self
    }
}

/// Coded clinical concept (CD/CE/CV)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Code {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_system_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// `xsi:type` discriminator, e.g. `CD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,
}

impl Code {
    pub fn new(code: impl Into<String>, code_system: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            code_system: Some(code_system.into()),
            ..Self::default()
        }
    }

    pub fn with_code_system_name(mut self, name: impl Into<String>) -> Self {
        self.code_system_name = Some(name.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Same concept: `code` and `codeSystem` both equal.
    pub fn same_concept(&self, other: &Code) -> bool {
        self.code == other.code && self.code_system == other.code_system
    }
}

/// Template (or instance) identifier - `root` plus optional `extension`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl TemplateId {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: Some(root.into()),
            extension: None,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Root equal, and either both extensions absent or both equal.
    pub fn matches(&self, other: &TemplateId) -> bool {
        self.root == other.root && self.extension == other.extension
    }

    pub fn is_part_of(&self, ids: &[TemplateId]) -> bool {
        ids.iter().any(|id| self.matches(id))
    }
}

/// Point in time (`value`) or interval (`low`/`high`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<DataElement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<DataElement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<DataElement>,
}

impl EffectiveTime {
    pub fn point(value: DataElement) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    pub fn interval(low: Option<DataElement>, high: Option<DataElement>) -> Self {
        Self {
            value: None,
            low,
            high,
        }
    }

    /// True when either bound is present.
    pub fn is_interval(&self) -> bool {
        self.low.is_some() || self.high.is_some()
    }
}

/// Physical quantity (PQ)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quantity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub xsi_type: Option<String>,
}

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<DataElement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line1: Option<DataElement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<DataElement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<DataElement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<DataElement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<DataElement>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<DataElement>,
}

/// Administration frequency (PIVL_TS)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frequency {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_specified: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_unit: Option<String>,
}

/// Authorship stamp attached to sections and entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_ids: Option<Vec<TemplateId>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<EffectiveTime>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<TemplateId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<Address>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<DataElement>,
}
