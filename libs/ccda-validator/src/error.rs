use thiserror::Error;

/// Invalid validator configuration, reported by [`crate::ValidatorConfig::compile`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no sections enabled: enable at least one of sections.problems or sections.past_illness")]
    NoSectionsEnabled,

    #[error("report.default_location must not be empty")]
    EmptyDefaultLocation,
}
