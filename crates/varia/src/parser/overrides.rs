//! Inline plurality overrides.
//!
//! A template may start with `[[def|_|def]]` to give its plural picks their
//! own definitions. The i-th entry belongs to the i-th plural container in
//! discovery order; `_` keeps the default. A leading `[[[` is not an override:
//! its first two brackets are dropped and a literal `[` remains.
//!
//! The body ends at the first `]]` outside a clause's parentheses, and pieces
//! are split on `|` at the same level, so guard patterns may contain both.

use varia_semantics::{OVERRIDE_CLOSE, OVERRIDE_DEFAULT, OVERRIDE_OPEN, OVERRIDE_SEPARATOR};

use crate::diagnostic::{Diagnostic, push_unique};
use crate::plural::{PluralityDefinition, PluralityError};
use crate::types::Text;

/// Strip a leading override from `text` and `mirror`, returning one entry per
/// piece. `None` entries use the default definition.
pub(crate) fn strip_override<S: Text>(
    text: &mut S,
    mirror: &mut String,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Option<PluralityDefinition>> {
    let open = OVERRIDE_OPEN.repeat(2);
    let close = OVERRIDE_CLOSE.repeat(2);

    if !mirror.starts_with(&open) {
        return Vec::new();
    }
    if mirror[open.len()..].starts_with(OVERRIDE_OPEN) {
        text.delete_range(0..open.len());
        mirror.replace_range(0..open.len(), "");
        return Vec::new();
    }
    let Some(end) = find_top_level(&mirror[open.len()..], &close) else {
        push_unique(diagnostics, Diagnostic::UnterminatedOverride);
        return Vec::new();
    };

    let body_end = open.len() + end;
    let body = &mirror[open.len()..body_end];
    let entries = if body.trim().is_empty() {
        Ok(Vec::new())
    } else {
        split_top_level(body, OVERRIDE_SEPARATOR)
            .into_iter()
            .map(|piece| compile_piece(piece.trim()))
            .collect::<Result<Vec<_>, _>>()
    };
    let entries = entries.unwrap_or_else(|error| {
        push_unique(diagnostics, Diagnostic::MalformedOverride { error });
        Vec::new()
    });

    let stripped = 0..body_end + close.len();
    text.delete_range(stripped.clone());
    mirror.replace_range(stripped, "");
    entries
}

/// Byte offsets in `text` that lie outside any parentheses.
fn top_level_offsets(text: &str) -> impl Iterator<Item = usize> + '_ {
    let mut depth = 0usize;
    text.char_indices().filter_map(move |(offset, c)| {
        let outside = depth == 0;
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        (outside && c != '(').then_some(offset)
    })
}

fn find_top_level(text: &str, needle: &str) -> Option<usize> {
    top_level_offsets(text).find(|&offset| text[offset..].starts_with(needle))
}

fn split_top_level<'t>(text: &'t str, separator: &str) -> Vec<&'t str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for offset in top_level_offsets(text) {
        if offset >= start && text[offset..].starts_with(separator) {
            pieces.push(&text[start..offset]);
            start = offset + separator.len();
        }
    }
    pieces.push(&text[start..]);
    pieces
}

fn compile_piece(piece: &str) -> Result<Option<PluralityDefinition>, PluralityError> {
    if piece == OVERRIDE_DEFAULT {
        return Ok(None);
    }
    PluralityDefinition::compile(piece).map(Some)
}
