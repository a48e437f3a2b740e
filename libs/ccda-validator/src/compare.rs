//! Tri-state optional-field comparison
//!
//! Every comparison in the engine goes through [`Comparison::compare`]:
//!
//! | reference | submitted | result                                   |
//! |-----------|-----------|------------------------------------------|
//! | absent    | absent    | conformant, no finding                   |
//! | absent    | present   | one ERROR: not required but present      |
//! | present   | absent    | one ERROR: required but missing          |
//! | present   | present   | delegated to the kind's [`Conforms`] impl |
//!
//! A comparison never aborts the walk: a mismatch on one node leaves sibling
//! and later nodes to be compared as usual.

use ccda_models::{DataElement, SourceLocation};

use crate::finding::FindingCollector;
use crate::reconcile::{self, Entry, PairingStrategy};

/// Kind-specific matcher: decide whether `self` (reference) matches
/// `submitted`, appending a finding for every mismatched attribute.
///
/// Returns `true` only when no finding was appended.
pub trait Conforms {
    /// Noun used in presence findings, e.g. "data" or "template ids".
    const NOUN: &'static str = "data";
    /// Verb for a submitted value the scenario does not require.
    const PRESENT: &'static str = "have";

    fn conforms(&self, submitted: &Self, element: &str, cx: &mut Comparison) -> bool;

    /// Where this value was read from, if known.
    fn source(&self) -> Option<&SourceLocation> {
        None
    }
}

/// State of one comparison walk: the finding log plus the pairing policy
/// used for repeating entries.
#[derive(Debug)]
pub struct Comparison {
    findings: FindingCollector,
    pairing: PairingStrategy,
}

impl Default for Comparison {
    fn default() -> Self {
        Self::new(PairingStrategy::default())
    }
}

impl Comparison {
    pub fn new(pairing: PairingStrategy) -> Self {
        Self::with_collector(FindingCollector::new(), pairing)
    }

    pub fn with_collector(findings: FindingCollector, pairing: PairingStrategy) -> Self {
        Self { findings, pairing }
    }

    pub fn findings(&self) -> &FindingCollector {
        &self.findings
    }

    pub fn findings_mut(&mut self) -> &mut FindingCollector {
        &mut self.findings
    }

    pub fn into_collector(self) -> FindingCollector {
        self.findings
    }

    /// Tri-state comparison of an optional reference value against an
    /// optional submitted value.
    pub fn compare<T: Conforms + ?Sized>(
        &mut self,
        reference: Option<&T>,
        submitted: Option<&T>,
        element: &str,
    ) -> bool {
        match (reference, submitted) {
            (None, None) => {
                tracing::trace!(element, "Both submitted and reference are absent");
                true
            }
            (None, Some(submitted)) => {
                self.not_required::<T>(element, submitted.source());
                false
            }
            (Some(_), None) => {
                self.missing(element, T::NOUN);
                false
            }
            (Some(reference), Some(submitted)) => {
                let matched = reference.conforms(submitted, element, self);
                if matched {
                    tracing::debug!(element, "Both submitted and reference match");
                }
                matched
            }
        }
    }

    /// Like [`compare`](Self::compare), but a reference that is silent on the
    /// value leaves the submitted value unchecked.
    pub fn require<T: Conforms + ?Sized>(
        &mut self,
        reference: Option<&T>,
        submitted: Option<&T>,
        element: &str,
    ) -> bool {
        if reference.is_none() {
            return true;
        }
        self.compare(reference, submitted, element)
    }

    /// Compare two repeating entry lists: list-level presence first, then each
    /// reference entry against the submitted entry the pairing policy picks.
    ///
    /// A reference entry with no counterpart is "required but missing" and is
    /// named by its reference ordinal (`Act #2`). A submitted entry nothing
    /// paired with is "not required but present" and is named by its
    /// submitted ordinal (`Act (submitted #2)`).
    pub fn compare_entries<T: Conforms + Entry>(
        &mut self,
        reference: Option<&[T]>,
        submitted: Option<&[T]>,
        element: &str,
    ) -> bool {
        let (reference, submitted) = match (reference, submitted) {
            (None, None) => return true,
            (None, Some(_)) => {
                self.not_required::<T>(element, None);
                return false;
            }
            (Some(_), None) => {
                self.missing(element, T::NOUN);
                return false;
            }
            (Some(r), Some(s)) => (r, s),
        };

        let pairing = reconcile::pair(self.pairing, reference, submitted);
        tracing::debug!(
            element,
            strategy = ?self.pairing,
            paired = pairing.pairs.len(),
            unmatched = pairing.unmatched_submitted.len(),
            "Reconciled entry lists"
        );

        let mut matched = true;
        for (r, s) in pairing.pairs {
            let name = format!("{element} #{}", r + 1);
            matched &= self.compare(Some(&reference[r]), s.map(|s| &submitted[s]), &name);
        }
        for s in pairing.unmatched_submitted {
            let name = format!("{element} (submitted #{})", s + 1);
            matched &= self.compare(None, Some(&submitted[s]), &name);
        }
        matched
    }

    fn not_required<T: Conforms + ?Sized>(
        &mut self,
        element: &str,
        at: Option<&SourceLocation>,
    ) {
        let (noun, verb) = (T::NOUN, T::PRESENT);
        self.findings.error(
            format!(
                "The scenario does not require {element} {noun}, but submitted file does {verb} {element} {noun}"
            ),
            at,
        );
    }

    fn missing(&mut self, element: &str, noun: &str) {
        self.findings.error(
            format!(
                "The scenario requires {element} {noun}, but submitted file does not contain {element} {noun}"
            ),
            None,
        );
    }

    /// Record a present/present value mismatch.
    pub(crate) fn value_mismatch(
        &mut self,
        element: &str,
        expected: &str,
        actual: &str,
        at: Option<&SourceLocation>,
    ) {
        self.findings.error(
            format!(
                "The scenario requires {element} value \"{expected}\", but submitted file has {element} value \"{actual}\""
            ),
            at,
        );
    }
}

// ============================================================================
// Primitive kinds
// ============================================================================

impl Conforms for str {
    fn conforms(&self, submitted: &Self, element: &str, cx: &mut Comparison) -> bool {
        if self == submitted {
            return true;
        }
        cx.value_mismatch(element, self, submitted, None);
        false
    }
}

impl Conforms for bool {
    fn conforms(&self, submitted: &Self, element: &str, cx: &mut Comparison) -> bool {
        if self == submitted {
            return true;
        }
        cx.value_mismatch(element, &self.to_string(), &submitted.to_string(), None);
        false
    }
}

impl Conforms for DataElement {
    fn conforms(&self, submitted: &Self, element: &str, cx: &mut Comparison) -> bool {
        let mut matched = true;
        if self.value != submitted.value {
            cx.value_mismatch(element, &self.value, &submitted.value, submitted.source());
            matched = false;
        }
        matched &= cx.require(
            self.use_.as_deref(),
            submitted.use_.as_deref(),
            &format!("{element} use"),
        );
        matched
    }

    fn source(&self) -> Option<&SourceLocation> {
        Some(&self.location)
    }
}
