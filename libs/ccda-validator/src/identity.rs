//! Code and template identifier matching

use ccda_models::{Code, TemplateId};

use crate::compare::{Comparison, Conforms};
use crate::reconcile::Entry;

/// Per-attribute code match. An attribute the reference is silent on is not
/// checked; an attribute it carries must be present and equal.
impl Conforms for Code {
    fn conforms(&self, submitted: &Self, element: &str, cx: &mut Comparison) -> bool {
        let mut matched = true;
        matched &= cx.require(
            self.code.as_deref(),
            submitted.code.as_deref(),
            &format!("{element} code"),
        );
        matched &= cx.require(
            self.code_system.as_deref(),
            submitted.code_system.as_deref(),
            &format!("{element} codeSystem"),
        );
        matched &= cx.require(
            self.code_system_name.as_deref(),
            submitted.code_system_name.as_deref(),
            &format!("{element} codeSystemName"),
        );
        matched &= cx.require(
            self.display_name.as_deref(),
            submitted.display_name.as_deref(),
            &format!("{element} displayName"),
        );
        matched
    }
}

impl Entry for Code {
    fn primary_code(&self) -> Option<&Code> {
        Some(self)
    }
}

impl Conforms for TemplateId {
    fn conforms(&self, submitted: &Self, element: &str, cx: &mut Comparison) -> bool {
        let mut matched = true;
        matched &= cx.compare(
            self.root.as_deref(),
            submitted.root.as_deref(),
            &format!("{element} root"),
        );
        matched &= cx.compare(
            self.extension.as_deref(),
            submitted.extension.as_deref(),
            &format!("{element} extension"),
        );
        matched
    }
}

/// Subset check: every reference template id must be declared by the
/// submission. Extra submitted template ids are tolerated.
impl Conforms for [TemplateId] {
    const NOUN: &'static str = "template ids";
    const PRESENT: &'static str = "contain";

    fn conforms(&self, submitted: &Self, element: &str, cx: &mut Comparison) -> bool {
        let mut matched = true;
        for template in self {
            if template.is_part_of(submitted) {
                tracing::debug!(element, "Template ids matched");
                continue;
            }

            cx.findings_mut().error(
                format!(
                    "The {element} template id, Root Value = {} and Extension Value = {} is not present in the submitted CCDA's {element}",
                    template.root.as_deref().unwrap_or("None specified"),
                    template.extension.as_deref().unwrap_or("No Extension value"),
                ),
                None,
            );
            matched = false;
        }
        matched
    }
}

/// Boolean form of the template id subset check, with the tri-state presence
/// rule applied at list level.
pub fn templates_are_found(
    reference: Option<&[TemplateId]>,
    submitted: Option<&[TemplateId]>,
) -> bool {
    match (reference, submitted) {
        (Some(reference), Some(submitted)) => reference.iter().all(|t| t.is_part_of(submitted)),
        (None, None) => true,
        _ => false,
    }
}
