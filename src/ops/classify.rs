//! Classification of failed `mv` invocations.
//!
//! `mv` runs under the C locale, so its diagnostics are stable English text. Only
//! exit status 1 is classified; anything else keeps the raw diagnostic.

use once_cell::sync::Lazy;
use regex::RegexSet;

use crate::errors::{MoveResult, OpFailure};

// Index order matches `KNOWN` below.
static MV_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"cannot create regular file .+: Permission denied",
        r"cannot move .+ to .+: No such file or directory",
        r"cannot move .+ to .+: Permission denied",
        r"cannot stat .+: No such file or directory",
    ])
    .expect("valid mv diagnostic patterns")
});

const KNOWN: [OpFailure; 4] = [
    OpFailure::PermissionDeniedCreate,
    OpFailure::SourceMissing,
    OpFailure::PermissionDeniedMove,
    OpFailure::StatMissing,
];

/// Map an `mv` exit status (`None` when killed by a signal) and its stderr to a result.
pub fn classify_mv(exit_code: Option<i32>, stderr: &str) -> MoveResult {
    match exit_code {
        Some(0) => Ok(()),
        Some(1) => {
            let hits: Vec<usize> = MV_PATTERNS.matches(stderr).into_iter().collect();
            match hits.as_slice() {
                [only] => Err(KNOWN[*only].clone()),
                _ => Err(OpFailure::Unclassified(stderr.to_string())),
            }
        }
        _ => Err(OpFailure::Unclassified(stderr.to_string())),
    }
}
