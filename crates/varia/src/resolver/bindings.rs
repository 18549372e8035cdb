use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::ops::Range;

use crate::plural::PluralityDefinition;
use crate::types::TokenId;

/// A replacement value for substitution regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution<T> {
    /// The same value for every region of the token.
    Fixed(T),
    /// Values keyed by the plain text of each region's content, so `#name#`
    /// and `#count#` can be filled from one table.
    Named(HashMap<String, T>),
}

/// What a token resolves to.
///
/// `S` is the source representation and `O` the output representation.
pub enum Binding<'a, S, O> {
    /// Replaces source substitution regions before conversion to `O`.
    Source(Substitution<S>),
    /// Replaces return substitution regions in the output.
    Return(Substitution<O>),
    /// Selects a branch of an ordered pick by position. Indices past the
    /// last branch select the last branch.
    Index(usize),
    /// Selects a branch of a plural pick by plurality category.
    ///
    /// `definition` replaces the template's default definition; regions
    /// covered by an inline override keep theirs.
    Count {
        count: i64,
        definition: Option<PluralityDefinition>,
    },
    /// Selects the branch of a keyed pick whose label matches, falling back
    /// to the `*` branch.
    Key(String),
    /// Restyles the content of attribute modification regions. The function
    /// receives the whole output and the content range, and must not change
    /// the text itself.
    Modify(Box<dyn Fn(&mut O, Range<usize>) + 'a>),
}

impl<S: Debug, O: Debug> Debug for Binding<'_, S, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Binding::Source(value) => f.debug_tuple("Source").field(value).finish(),
            Binding::Return(value) => f.debug_tuple("Return").field(value).finish(),
            Binding::Index(index) => f.debug_tuple("Index").field(index).finish(),
            Binding::Count { count, definition } => f
                .debug_struct("Count")
                .field("count", count)
                .field("definition", definition)
                .finish(),
            Binding::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Binding::Modify(_) => f.write_str("Modify(..)"),
        }
    }
}

/// Token bindings for one resolution.
///
/// # Example
///
/// ```
/// use varia::{Bindings, MultiTokenSpec, SingleTokenSpec};
///
/// let bindings: Bindings<'_, String, String> = Bindings::new()
///     .count(MultiTokenSpec::plural().id(), 3)
///     .substitute(SingleTokenSpec::substitution().id(), "3".to_string());
/// assert_eq!(bindings.len(), 2);
/// ```
pub struct Bindings<'a, S, O> {
    bindings: HashMap<TokenId, Binding<'a, S, O>>,
}

impl<'a, S, O> Bindings<'a, S, O> {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `token`, replacing any earlier binding for it.
    pub fn bind(mut self, token: TokenId, binding: Binding<'a, S, O>) -> Self {
        self.insert(token, binding);
        self
    }

    pub fn insert(&mut self, token: TokenId, binding: Binding<'a, S, O>) {
        self.bindings.insert(token, binding);
    }

    pub fn substitute_source(self, token: TokenId, value: S) -> Self {
        self.bind(token, Binding::Source(Substitution::Fixed(value)))
    }

    pub fn substitute_source_named(self, token: TokenId, values: HashMap<String, S>) -> Self {
        self.bind(token, Binding::Source(Substitution::Named(values)))
    }

    pub fn substitute(self, token: TokenId, value: O) -> Self {
        self.bind(token, Binding::Return(Substitution::Fixed(value)))
    }

    pub fn substitute_named(self, token: TokenId, values: HashMap<String, O>) -> Self {
        self.bind(token, Binding::Return(Substitution::Named(values)))
    }

    pub fn pick(self, token: TokenId, index: usize) -> Self {
        self.bind(token, Binding::Index(index))
    }

    pub fn count(self, token: TokenId, count: i64) -> Self {
        self.bind(
            token,
            Binding::Count {
                count,
                definition: None,
            },
        )
    }

    /// Like [`Bindings::count`], evaluated with `definition` instead of the
    /// template's default.
    pub fn count_with(self, token: TokenId, count: i64, definition: PluralityDefinition) -> Self {
        self.bind(
            token,
            Binding::Count {
                count,
                definition: Some(definition),
            },
        )
    }

    pub fn key(self, token: TokenId, key: impl Into<String>) -> Self {
        self.bind(token, Binding::Key(key.into()))
    }

    pub fn modify(self, token: TokenId, modify: impl Fn(&mut O, Range<usize>) + 'a) -> Self {
        self.bind(token, Binding::Modify(Box::new(modify)))
    }

    pub fn get(&self, token: TokenId) -> Option<&Binding<'a, S, O>> {
        self.bindings.get(&token)
    }

    pub fn contains(&self, token: TokenId) -> bool {
        self.bindings.contains_key(&token)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<S, O> Default for Bindings<'_, S, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S, O> Extend<(TokenId, Binding<'a, S, O>)> for Bindings<'a, S, O> {
    fn extend<I: IntoIterator<Item = (TokenId, Binding<'a, S, O>)>>(&mut self, iter: I) {
        self.bindings.extend(iter);
    }
}

impl<S: Debug, O: Debug> Debug for Bindings<'_, S, O> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_map().entries(self.bindings.iter()).finish()
    }
}
