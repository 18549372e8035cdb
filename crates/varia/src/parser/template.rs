use std::ops::Range;

use tracing::{debug, trace};

use crate::diagnostic::{Diagnostic, push_unique};
use crate::parser::overrides::strip_override;
use crate::parser::region::{Region, RegionId, RegionKind};
use crate::parser::scan::Scanner;
use crate::parser::tree::{Candidate, Forest};
use crate::plural::PluralityDefinition;
use crate::types::{Edit, MultiKind, SingleKind, Text, TokenId, TokenPattern};

/// A template with its tokens located and its escape and attribute
/// delimiters removed.
///
/// Parsing never fails. Malformed input is reported through
/// [`ParsedTemplate::diagnostics`] and the affected delimiters are left in
/// the text.
#[derive(Debug, Clone)]
pub struct ParsedTemplate<S> {
    pub(crate) untokenized: S,
    pub(crate) mirror: String,
    pub(crate) regions: Vec<Region>,
    pub(crate) roots: Vec<RegionId>,
    pub(crate) definitions: Vec<PluralityDefinition>,
    pub(crate) patterns: Vec<TokenPattern>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<S: Text> ParsedTemplate<S> {
    /// The source with escape tokens and attribute delimiters removed.
    pub fn untokenized(&self) -> &S {
        &self.untokenized
    }

    /// Plain text of [`ParsedTemplate::untokenized`].
    pub fn plain_text(&self) -> &str {
        &self.mirror
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The region with `id`, or `None` for an id from another template.
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id)
    }

    /// Top-level regions ordered by position.
    pub fn roots(&self) -> &[RegionId] {
        &self.roots
    }

    /// Plurality definitions referenced by plural picks; index 0 is the
    /// default, later entries come from an inline override.
    pub fn definitions(&self) -> &[PluralityDefinition] {
        &self.definitions
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether any accepted region belongs to `token`.
    pub fn uses_token(&self, token: TokenId) -> bool {
        self.regions.iter().any(|region| region.token == token)
    }

    /// Display form of a token's delimiters, for diagnostics.
    pub(crate) fn token_name(&self, token: TokenId) -> String {
        self.patterns
            .iter()
            .find(|pattern| pattern.id() == token)
            .map_or_else(|| token.to_string(), ToString::to_string)
    }
}

/// Locate every token region in `source`.
///
/// `escape` is the escape token, if any; `patterns` are tried in order and
/// `default_definition` evaluates plural picks not covered by an inline
/// override.
///
/// # Example
///
/// ```
/// use varia::{MultiKind, MultiTokenSpec, PluralityDefinition, TokenPattern, parse};
///
/// let patterns = [TokenPattern::multi(MultiTokenSpec::plural(), MultiKind::OrderedPick)];
/// let parsed = parse(
///     &String::from(r"\<no> <1:one|*:many>"),
///     Some("\\"),
///     &patterns,
///     &PluralityDefinition::default(),
/// );
/// assert_eq!(parsed.plain_text(), "<no> <1:one|*:many>");
/// assert_eq!(parsed.roots().len(), 2);
/// ```
pub fn parse<S: Text>(
    source: &S,
    escape: Option<&str>,
    patterns: &[TokenPattern],
    default_definition: &PluralityDefinition,
) -> ParsedTemplate<S> {
    let escape = escape.filter(|e| !e.is_empty());
    let mut diagnostics = Vec::new();
    let mut untokenized = source.clone();
    let mut mirror = untokenized.plain_text().into_owned();
    let overrides = strip_override(&mut untokenized, &mut mirror, &mut diagnostics);

    let usable: Vec<&TokenPattern> = patterns
        .iter()
        .filter(|pattern| {
            let empty = has_empty_delimiter(pattern);
            if empty {
                push_unique(
                    &mut diagnostics,
                    Diagnostic::EmptyDelimiter {
                        token: pattern.to_string(),
                    },
                );
            }
            !empty
        })
        .collect();

    let mut definitions = vec![default_definition.clone()];
    let candidates = {
        let scanner = Scanner::new(&mirror, escape);
        let mut found = Vec::new();
        for pattern in &usable {
            let (containers, unterminated) = scanner.containers(pattern.left(), pattern.right());
            for offset in unterminated {
                push_unique(
                    &mut diagnostics,
                    Diagnostic::UnterminatedRegion {
                        token: pattern.to_string(),
                        offset,
                    },
                );
            }
            found.extend(containers.into_iter().map(|container| (*pattern, container)));
        }

        let nestable: Vec<Range<usize>> = found
            .iter()
            .filter(|(pattern, _)| matches!(pattern, TokenPattern::Multi { .. }))
            .map(|(_, container)| container.clone())
            .collect();

        let mut overrides = overrides.into_iter();
        let candidates: Vec<Candidate> = found
            .into_iter()
            .map(|(pattern, container)| {
                let mut next_definition = || match overrides.next() {
                    Some(Some(definition)) => {
                        definitions.push(definition);
                        definitions.len() - 1
                    }
                    Some(None) | None => 0,
                };
                candidate(&scanner, pattern, container, &nestable, &mut next_definition)
            })
            .collect();

        let unused = overrides.count();
        if unused > 0 {
            push_unique(&mut diagnostics, Diagnostic::UnusedOverride { count: unused });
        }
        candidates
    };

    let mut forest = Forest::default();
    for candidate in candidates {
        let token = candidate.token;
        let container = candidate.container.clone();
        if let Err(conflict) = forest.insert(candidate) {
            trace!(?container, ?conflict, "Rejected overlapping region");
            let token = usable
                .iter()
                .find(|pattern| pattern.id() == token)
                .map_or_else(|| token.to_string(), ToString::to_string);
            push_unique(
                &mut diagnostics,
                Diagnostic::OverlappingRegion {
                    token,
                    start: container.start,
                    end: container.end,
                },
            );
        }
    }

    if let Some(escape) = escape {
        strip_escapes(&mut untokenized, &mut mirror, escape, &mut forest);
    }
    strip_attribute_delimiters(&mut untokenized, &mut mirror, &mut forest);

    debug!(
        regions = forest.regions.len(),
        roots = forest.roots.len(),
        definitions = definitions.len(),
        diagnostics = diagnostics.len(),
        "Parsed template"
    );

    ParsedTemplate {
        untokenized,
        mirror,
        regions: forest.regions,
        roots: forest.roots,
        definitions,
        patterns: usable.into_iter().cloned().collect(),
        diagnostics,
    }
}

fn has_empty_delimiter(pattern: &TokenPattern) -> bool {
    match pattern {
        TokenPattern::Single { spec, .. } => spec.left().is_empty() || spec.right().is_empty(),
        TokenPattern::Multi { spec, .. } => {
            spec.left().is_empty()
                || spec.interior().is_empty()
                || spec.right().is_empty()
                || spec.label_separator() == Some("")
        }
    }
}

fn candidate(
    scanner: &Scanner<'_>,
    pattern: &TokenPattern,
    container: Range<usize>,
    nestable: &[Range<usize>],
    next_definition: &mut dyn FnMut() -> usize,
) -> Candidate {
    let content = container.start + pattern.left().len()..container.end - pattern.right().len();
    let mut candidate = Candidate {
        token: pattern.id(),
        container: container.clone(),
        attribute: false,
        removed_left_len: 0,
        removed_right_len: 0,
        branches: Vec::new(),
    };

    match pattern {
        TokenPattern::Single { spec, kind } => {
            let kind = match kind {
                SingleKind::SourceSubstitution => RegionKind::SourceSubstitution,
                SingleKind::ReturnSubstitution => RegionKind::ReturnSubstitution,
                SingleKind::AttributeModification => {
                    candidate.attribute = true;
                    candidate.removed_left_len = spec.left().len();
                    candidate.removed_right_len = spec.right().len();
                    RegionKind::AttributeModification
                }
            };
            candidate.branches.push((kind, content));
        }
        TokenPattern::Multi { spec, kind } => {
            let nested: Vec<Range<usize>> = nestable
                .iter()
                .filter(|r| **r != container && content.start <= r.start && r.end <= content.end)
                .cloned()
                .collect();
            let definition = match kind {
                MultiKind::PluralPick => next_definition(),
                MultiKind::OrderedPick | MultiKind::DictionaryPick => 0,
            };
            let raw_branches = scanner.split(spec.interior(), content, &nested);
            for (branch, raw) in raw_branches.into_iter().enumerate() {
                let labelled = spec
                    .label_separator()
                    .and_then(|separator| scanner.label(separator, raw.clone(), &nested));
                let (key, range) = match labelled {
                    Some((label, start)) => (Some(label), start..raw.end),
                    None => (None, raw),
                };
                let kind = match kind {
                    MultiKind::OrderedPick => RegionKind::OrderedPick { branch },
                    MultiKind::PluralPick => RegionKind::PluralPick { branch, definition },
                    MultiKind::DictionaryPick => RegionKind::DictionaryPick { branch, key },
                };
                candidate.branches.push((kind, range));
            }
        }
    }
    trace!(token = %pattern, ?container, branches = candidate.branches.len(), "Found region");
    candidate
}

/// Remove unescaped escape tokens left to right. An escape token following
/// a removed one is literal and kept.
fn strip_escapes<S: Text>(text: &mut S, mirror: &mut String, escape: &str, forest: &mut Forest) {
    let mut pos = 0;
    while let Some(found) = mirror.get(pos..).and_then(|rest| rest.find(escape)) {
        let at = pos + found;
        remove(text, mirror, forest, at..at + escape.len());
        pos = if mirror[at..].starts_with(escape) {
            at + escape.len()
        } else {
            at
        };
    }
}

/// Remove the delimiters of attribute modification regions, right first.
fn strip_attribute_delimiters<S: Text>(text: &mut S, mirror: &mut String, forest: &mut Forest) {
    let attributes: Vec<RegionId> = (0..forest.regions.len())
        .filter(|&id| forest.regions[id].kind == RegionKind::AttributeModification)
        .collect();
    for id in attributes {
        let region = &forest.regions[id];
        let container = region.container.clone();
        let (left_len, right_len) = (region.removed_left_len, region.removed_right_len);
        if container.len() < left_len + right_len {
            continue;
        }
        remove(text, mirror, forest, container.end - right_len..container.end);
        remove(text, mirror, forest, container.start..container.start + left_len);
    }
}

fn remove<S: Text>(text: &mut S, mirror: &mut String, forest: &mut Forest, range: Range<usize>) {
    text.delete_range(range.clone());
    mirror.replace_range(range.clone(), "");
    forest.apply(&Edit::removal(range));
}
