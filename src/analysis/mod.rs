// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Heuristic diff classification.
//!
//! Parses a unified diff into per-file records and infers a conventional
//! commit type, scope and description from them. Everything here is pure:
//! no I/O, no shared state, and every input produces a message.

mod description;
pub mod diff;
mod inference;
mod patterns;
mod scope;

pub use description::{describe, FALLBACK_DESCRIPTION};
pub use diff::{parse_diff, ChangeRecord, LineStats};
pub use inference::{infer_type, TypeRule, TypeSignals, TYPE_RULES};
pub use scope::{infer_scope, ScopeRule, SCOPE_RULES};

use crate::commit::Classification;

/// Classify already-parsed records.
pub fn classify(records: &[ChangeRecord]) -> Classification {
    let classification = Classification::new(infer_type(records), describe(records));
    match infer_scope(records) {
        Some(scope) => classification.with_scope(scope),
        None => classification,
    }
}

/// Parse and classify a diff.
pub fn classify_diff(diff: &str) -> Classification {
    classify(&parse_diff(diff))
}

/// Produce a commit message for a diff using only the heuristics.
pub fn heuristic_message(diff: &str) -> String {
    classify_diff(diff).format()
}
