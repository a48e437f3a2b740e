//! Pairing of repeating entries between reference and submitted lists
//!
//! Which submitted concern (or observation, translation, ...) corresponds to
//! which reference entry is domain-dependent, so the policy is explicit and
//! swappable rather than baked into the walk. Positional pairing is the
//! default; the other policies pair greedily in reference order, taking the
//! first unused submitted candidate that qualifies.

use std::fmt;
use std::str::FromStr;

use ccda_models::{Code, TemplateId};
use serde::{Deserialize, Serialize};

use crate::identity::templates_are_found;

/// How reference entries are associated with submitted entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PairingStrategy {
    /// Index `i` with index `i`; no re-alignment on length mismatch.
    #[default]
    Positional,
    /// First unused submitted entry with the same primary code
    /// (`code` + `codeSystem`).
    ByPrimaryCode,
    /// First unused submitted entry declaring every reference template id.
    ByTemplateIds,
}

impl fmt::Display for PairingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional => write!(f, "positional"),
            Self::ByPrimaryCode => write!(f, "by-primary-code"),
            Self::ByTemplateIds => write!(f, "by-template-ids"),
        }
    }
}

impl FromStr for PairingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "positional" => Ok(Self::Positional),
            "by-primary-code" | "primary-code" => Ok(Self::ByPrimaryCode),
            "by-template-ids" | "template-ids" => Ok(Self::ByTemplateIds),
            other => Err(format!(
                "unknown pairing strategy '{other}' (expected positional, by-primary-code or by-template-ids)"
            )),
        }
    }
}

/// Identity features a repeating entry exposes to the pairing policies.
pub trait Entry {
    fn primary_code(&self) -> Option<&Code> {
        None
    }

    fn template_ids(&self) -> Option<&[TemplateId]> {
        None
    }
}

/// Result of pairing, as indexes into the two lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    /// Every reference index, in order, with its submitted counterpart.
    pub pairs: Vec<(usize, Option<usize>)>,
    /// Submitted indexes no reference entry was paired with, in order.
    pub unmatched_submitted: Vec<usize>,
}

pub fn pair<T: Entry>(strategy: PairingStrategy, reference: &[T], submitted: &[T]) -> Pairing {
    match strategy {
        PairingStrategy::Positional => Pairing {
            pairs: (0..reference.len())
                .map(|i| (i, (i < submitted.len()).then_some(i)))
                .collect(),
            unmatched_submitted: (reference.len()..submitted.len()).collect(),
        },
        PairingStrategy::ByPrimaryCode => pair_greedy(reference, submitted, |r, s| {
            match (r.primary_code(), s.primary_code()) {
                (Some(r), Some(s)) => r.same_concept(s),
                (None, None) => true,
                _ => false,
            }
        }),
        PairingStrategy::ByTemplateIds => pair_greedy(reference, submitted, |r, s| {
            match (r.template_ids(), s.template_ids()) {
                (None, None) => true,
                (r, s) => templates_are_found(r, s),
            }
        }),
    }
}

fn pair_greedy<T>(reference: &[T], submitted: &[T], qualifies: impl Fn(&T, &T) -> bool) -> Pairing {
    let mut used = vec![false; submitted.len()];

    let pairs: Vec<(usize, Option<usize>)> = reference
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let found = submitted
                .iter()
                .enumerate()
                .find(|(j, s)| !used[*j] && qualifies(r, *s))
                .map(|(j, _)| j);
            if let Some(j) = found {
                used[j] = true;
            }
            (i, found)
        })
        .collect();

    let unmatched_submitted: Vec<usize> = used
        .iter()
        .enumerate()
        .filter(|(_, used)| !**used)
        .map(|(j, _)| j)
        .collect();

    Pairing {
        pairs,
        unmatched_submitted,
    }
}
