use std::ops::Range;

use tracing::{debug, trace};
use varia_semantics::DEFAULT_BRANCH_LABEL;

use crate::diagnostic::{Diagnostic, compute_suggestions, push_unique};
use crate::parser::{ParsedTemplate, Region, RegionId, RegionKind};
use crate::parser::tree::sibling_groups;
use crate::resolver::bindings::{Binding, Bindings, Substitution};
use crate::types::{Edit, Text, TokenId};

/// The result of resolving a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<O> {
    pub output: O,
    /// Problems found while resolving; parse diagnostics are not repeated.
    pub diagnostics: Vec<Diagnostic>,
}

impl<S: Text> ParsedTemplate<S> {
    /// Resolve this template against `bindings`. See [`resolve`].
    pub fn resolve<O>(&self, bindings: &Bindings<'_, S, O>) -> Resolved<O>
    where
        O: Text + From<S>,
    {
        resolve(self, bindings)
    }
}

/// Produce the output for a parsed template.
///
/// Resolution never fails. Regions without a usable binding keep their
/// text (for picks, their delimiters too) and are reported in
/// [`Resolved::diagnostics`].
///
/// # Example
///
/// ```
/// use varia::{Bindings, MultiKind, MultiTokenSpec, PluralityDefinition, TokenPattern, parse};
///
/// let plural = MultiTokenSpec::plural();
/// let patterns = [TokenPattern::multi(plural.clone(), MultiKind::OrderedPick)];
/// let parsed = parse(
///     &String::from("<1:item|*:items>"),
///     None,
///     &patterns,
///     &PluralityDefinition::default(),
/// );
/// let resolved = parsed.resolve(&Bindings::<String, String>::new().pick(plural.id(), 5));
/// assert_eq!(resolved.output, "items");
/// assert!(resolved.diagnostics.is_empty());
/// ```
pub fn resolve<S, O>(template: &ParsedTemplate<S>, bindings: &Bindings<'_, S, O>) -> Resolved<O>
where
    S: Text,
    O: Text + From<S>,
{
    let mut resolver = Resolver {
        template,
        bindings,
        regions: template.regions.clone(),
        consumed: vec![false; template.regions.len()],
        diagnostics: Vec::new(),
    };

    let mut source = template.untokenized.clone();
    let mut mirror = template.mirror.clone();
    resolver.substitute_sources(&template.roots, &mut source, &mut mirror);

    let mut output = O::from(source);
    resolver.modify_attributes(&mut output);
    resolver.walk(&template.roots, &mut output, &mut mirror);

    debug!(
        regions = template.regions.len(),
        diagnostics = resolver.diagnostics.len(),
        output_len = mirror.len(),
        "Resolved template"
    );

    Resolved {
        output,
        diagnostics: resolver.diagnostics,
    }
}

struct Resolver<'r, 'a, S, O> {
    template: &'r ParsedTemplate<S>,
    bindings: &'r Bindings<'a, S, O>,
    /// Working copy of the tree whose ranges track the current text.
    regions: Vec<Region>,
    consumed: Vec<bool>,
    diagnostics: Vec<Diagnostic>,
}

impl<S: Text, O: Text> Resolver<'_, '_, S, O> {
    fn substitute_sources(&mut self, ids: &[RegionId], source: &mut S, mirror: &mut String) {
        for &id in ids {
            if self.consumed[id] {
                continue;
            }
            if self.regions[id].kind == RegionKind::SourceSubstitution {
                let token = self.regions[id].token;
                let bindings = self.bindings;
                match bindings.get(token) {
                    Some(Binding::Source(substitution)) => {
                        if let Some(value) = self.lookup(substitution, id, mirror) {
                            let container = self.regions[id].container.clone();
                            self.replace(source, mirror, container, value);
                            self.consume(id);
                            continue;
                        }
                    }
                    Some(_) => self.mismatch(id),
                    None => self.unbound(token),
                }
            }
            let children = self.regions[id].children.clone();
            self.substitute_sources(&children, source, mirror);
        }
    }

    fn modify_attributes(&mut self, output: &mut O) {
        for id in 0..self.regions.len() {
            if self.consumed[id] || self.regions[id].kind != RegionKind::AttributeModification {
                continue;
            }
            let token = self.regions[id].token;
            let bindings = self.bindings;
            match bindings.get(token) {
                Some(Binding::Modify(modify)) => modify(output, self.regions[id].range.clone()),
                Some(_) => self.mismatch(id),
                None => self.unbound(token),
            }
        }
    }

    fn walk(&mut self, siblings: &[RegionId], output: &mut O, mirror: &mut String) {
        for group in sibling_groups(&self.regions, siblings) {
            let first = group[0];
            if self.consumed[first] {
                continue;
            }
            let kind = self.regions[first].kind.clone();
            match kind {
                RegionKind::ReturnSubstitution => self.substitute(first, output, mirror),
                RegionKind::SourceSubstitution | RegionKind::AttributeModification => {
                    let children = self.regions[first].children.clone();
                    self.walk(&children, output, mirror);
                }
                RegionKind::OrderedPick { .. }
                | RegionKind::PluralPick { .. }
                | RegionKind::DictionaryPick { .. } => self.pick(&group, output, mirror),
            }
        }
    }

    fn substitute(&mut self, id: RegionId, output: &mut O, mirror: &mut String) {
        let token = self.regions[id].token;
        let bindings = self.bindings;
        match bindings.get(token) {
            Some(Binding::Return(substitution)) => {
                if let Some(value) = self.lookup(substitution, id, mirror) {
                    let container = self.regions[id].container.clone();
                    self.replace(output, mirror, container, value);
                    self.consume(id);
                    return;
                }
            }
            Some(_) => self.mismatch(id),
            None => self.unbound(token),
        }
        let children = self.regions[id].children.clone();
        self.walk(&children, output, mirror);
    }

    fn pick(&mut self, group: &[RegionId], output: &mut O, mirror: &mut String) {
        let Some(selected) = self.select(group) else {
            for &id in group {
                let children = self.regions[id].children.clone();
                self.walk(&children, output, mirror);
            }
            return;
        };

        let chosen = group[selected];
        trace!(token = %self.regions[chosen].token, branch = selected, "Selected branch");
        let children = self.regions[chosen].children.clone();
        self.walk(&children, output, mirror);

        let branch = output.slice_range(self.regions[chosen].range.clone());
        let container = self.regions[chosen].container.clone();
        self.replace(output, mirror, container, &branch);
        for &id in group {
            self.consume(id);
        }
    }

    /// Position within `group` of the branch the binding selects.
    fn select(&mut self, group: &[RegionId]) -> Option<usize> {
        let token = self.regions[group[0]].token;
        let kind = self.regions[group[0]].kind.clone();
        let last = group.len() - 1;
        let bindings = self.bindings;
        match (&kind, bindings.get(token)) {
            (_, None) => {
                self.unbound(token);
                None
            }
            (RegionKind::OrderedPick { .. }, Some(Binding::Index(index))) => Some((*index).min(last)),
            (
                RegionKind::PluralPick { definition, .. },
                Some(Binding::Count {
                    count,
                    definition: bound,
                }),
            ) => {
                let definitions = &self.template.definitions;
                let definition = match bound {
                    Some(bound) if *definition == 0 => bound,
                    _ => &definitions[*definition],
                };
                Some(definition.category_index(*count).min(last))
            }
            (RegionKind::DictionaryPick { .. }, Some(Binding::Key(key))) => {
                self.select_key(group, key)
            }
            (_, Some(_)) => {
                self.mismatch(group[0]);
                None
            }
        }
    }

    fn select_key(&mut self, group: &[RegionId], key: &str) -> Option<usize> {
        let labels: Vec<Option<&str>> = group
            .iter()
            .map(|&id| match &self.regions[id].kind {
                RegionKind::DictionaryPick { key, .. } => key.as_deref(),
                _ => None,
            })
            .collect();
        if let Some(position) = labels.iter().position(|label| *label == Some(key)) {
            return Some(position);
        }
        if let Some(position) = labels
            .iter()
            .position(|label| *label == Some(DEFAULT_BRANCH_LABEL))
        {
            return Some(position);
        }

        let available: Vec<String> = labels.iter().flatten().map(ToString::to_string).collect();
        let token = self.template.token_name(self.regions[group[0]].token);
        push_unique(
            &mut self.diagnostics,
            Diagnostic::UnknownBranchKey {
                token,
                key: key.to_string(),
                suggestions: compute_suggestions(key, &available),
            },
        );
        None
    }

    fn lookup<'v, T>(
        &mut self,
        substitution: &'v Substitution<T>,
        id: RegionId,
        mirror: &str,
    ) -> Option<&'v T> {
        match substitution {
            Substitution::Fixed(value) => Some(value),
            Substitution::Named(values) => {
                let name = &mirror[self.regions[id].range.clone()];
                if let Some(value) = values.get(name) {
                    return Some(value);
                }
                let mut available: Vec<String> = values.keys().cloned().collect();
                available.sort();
                let token = self.template.token_name(self.regions[id].token);
                push_unique(
                    &mut self.diagnostics,
                    Diagnostic::UnknownSubstitutionName {
                        token,
                        name: name.to_string(),
                        suggestions: compute_suggestions(name, &available),
                    },
                );
                None
            }
        }
    }

    /// Replace `range` in `target` and its mirror, keeping every tracked
    /// range in step.
    fn replace<T: Text>(
        &mut self,
        target: &mut T,
        mirror: &mut String,
        range: Range<usize>,
        with: &T,
    ) {
        let inserted = target.splice_range(range.clone(), with);
        mirror.replace_range(range.clone(), &inserted);
        let edit = Edit::new(range, inserted.len());
        for region in &mut self.regions {
            edit.apply(&mut region.range);
            edit.apply(&mut region.container);
        }
    }

    /// Mark `id` and everything below it as resolved.
    fn consume(&mut self, id: RegionId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            self.consumed[id] = true;
            stack.extend(self.regions[id].children.iter().copied());
        }
    }

    fn unbound(&mut self, token: TokenId) {
        let token = self.template.token_name(token);
        push_unique(&mut self.diagnostics, Diagnostic::UnboundToken { token });
    }

    fn mismatch(&mut self, id: RegionId) {
        let region = &self.regions[id];
        let diagnostic = Diagnostic::BindingMismatch {
            token: self.template.token_name(region.token),
            expected: region.kind.describe(),
        };
        push_unique(&mut self.diagnostics, diagnostic);
    }
}
