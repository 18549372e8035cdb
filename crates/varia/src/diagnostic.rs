//! Diagnostics reported while parsing and resolving templates.
//!
//! None of these abort the operation: the affected region is skipped and the
//! rest of the template is still processed.

use thiserror::Error;

use crate::plural::PluralityError;

/// A non-fatal problem found while parsing or resolving a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// A left delimiter with no matching right delimiter.
    #[error("unterminated '{token}' region starting at offset {offset}")]
    UnterminatedRegion { token: String, offset: usize },

    /// A region that partially overlaps an already accepted region.
    #[error("'{token}' region at {start}..{end} partially overlaps another region")]
    OverlappingRegion {
        token: String,
        start: usize,
        end: usize,
    },

    /// A token spec with an empty delimiter; its pattern is ignored.
    #[error("token '{token}' has an empty delimiter and is ignored")]
    EmptyDelimiter { token: String },

    /// An inline plurality override that is opened but never closed.
    #[error("inline plurality override is never closed")]
    UnterminatedOverride,

    /// An inline plurality override entry that does not compile.
    #[error("malformed inline plurality override: {error}")]
    MalformedOverride { error: PluralityError },

    /// Override entries left over after every plural region got one.
    #[error("inline plurality override has {count} entries without a plural region")]
    UnusedOverride { count: usize },

    /// A region whose token has no binding.
    #[error("no binding for token '{token}'")]
    UnboundToken { token: String },

    /// A binding of the wrong shape for the region's kind.
    #[error("binding for token '{token}' cannot resolve a {expected} region")]
    BindingMismatch {
        token: String,
        expected: &'static str,
    },

    /// A keyed pick with no matching branch and no default branch.
    #[error("no branch labelled '{key}' in '{token}' region{}", suggestion_hint(suggestions))]
    UnknownBranchKey {
        token: String,
        key: String,
        suggestions: Vec<String>,
    },

    /// A named substitution with no value for the region's name.
    #[error("no value named '{name}' for '{token}' substitution{}", suggestion_hint(suggestions))]
    UnknownSubstitutionName {
        token: String,
        name: String,
        suggestions: Vec<String>,
    },
}

fn suggestion_hint(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Names in `available` within a small edit distance of `target`, closest
/// first, at most three.
///
/// Keys of three characters or fewer allow one edit; longer keys allow two.
pub fn compute_suggestions(target: &str, available: &[String]) -> Vec<String> {
    let max_distance = if target.chars().count() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|candidate| (strsim::levenshtein(target, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}

/// Push `diagnostic` unless an equal one is already present.
pub(crate) fn push_unique(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    if !diagnostics.contains(&diagnostic) {
        diagnostics.push(diagnostic);
    }
}
