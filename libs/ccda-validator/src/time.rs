//! Point versus interval effective time comparison

use ccda_models::{EffectiveTime, SourceLocation};

use crate::compare::{Comparison, Conforms};

/// `low` and `high` are always compared with the tri-state rule; `value` is
/// compared only when the reference is a point. Timestamps are compared as
/// exact text.
impl Conforms for EffectiveTime {
    fn conforms(&self, submitted: &Self, element: &str, cx: &mut Comparison) -> bool {
        let mut matched = true;
        if !self.is_interval() {
            matched &= cx.compare(
                self.value.as_ref(),
                submitted.value.as_ref(),
                &format!("{element} Value"),
            );
        }
        matched &= cx.compare(
            self.low.as_ref(),
            submitted.low.as_ref(),
            &format!("{element} Low"),
        );
        matched &= cx.compare(
            self.high.as_ref(),
            submitted.high.as_ref(),
            &format!("{element} High"),
        );
        matched
    }

    fn source(&self) -> Option<&SourceLocation> {
        self.value
            .as_ref()
            .or(self.low.as_ref())
            .or(self.high.as_ref())
            .map(|e| &e.location)
    }
}
