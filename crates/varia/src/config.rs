//! Engine configuration.

use bon::Builder;
use serde::{Deserialize, Serialize};
use varia_semantics::ESCAPE;

use crate::parser::{ParsedTemplate, parse};
use crate::plural::PluralityDefinition;
use crate::types::{
    MultiKind, MultiTokenSpec, SingleKind, SingleTokenSpec, Text, TokenId, TokenPattern,
};

/// The token patterns, escape token, and default plurality definition used
/// to parse templates.
///
/// The default configuration recognizes the built-in presets:
///
/// | Token | Role |
/// |-------|------|
/// | `` `male¦female¦neuter´ `` | ordered pick |
/// | `<1:one\|*:other>` | plural pick |
/// | `{key:value\|*:fallback}` | keyed pick |
/// | `#name#` | substitution |
/// | `**text**` | attribute modification |
///
/// with `\` as the escape token and `(1)(*)` as the plurality definition.
///
/// # Example
///
/// ```
/// use varia::{EngineConfig, PluralityDefinition};
///
/// let config = EngineConfig::builder()
///     .escape("~")
///     .default_plurality(PluralityDefinition::compile("(0,1)(*)").unwrap())
///     .build();
///
/// let parsed = config.parse(&String::from("~<x> <0:none|*:some>"));
/// assert_eq!(parsed.plain_text(), "<x> <0:none|*:some>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
#[serde(default)]
pub struct EngineConfig {
    /// Escape token; empty disables escaping.
    #[builder(default = ESCAPE.to_string())]
    escape: String,

    /// Patterns tried in order during region discovery.
    #[builder(default = default_patterns())]
    patterns: Vec<TokenPattern>,

    /// Definition for plural picks without an inline override.
    #[builder(default)]
    default_plurality: PluralityDefinition,
}

/// The built-in token patterns.
pub fn default_patterns() -> Vec<TokenPattern> {
    vec![
        TokenPattern::multi(MultiTokenSpec::gender(), MultiKind::OrderedPick),
        TokenPattern::multi(MultiTokenSpec::plural(), MultiKind::PluralPick),
        TokenPattern::multi(MultiTokenSpec::choice(), MultiKind::DictionaryPick),
        TokenPattern::single(SingleTokenSpec::substitution(), SingleKind::ReturnSubstitution),
        TokenPattern::single(SingleTokenSpec::emphasis(), SingleKind::AttributeModification),
    ]
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig::builder().build()
    }
}

impl EngineConfig {
    pub fn escape(&self) -> Option<&str> {
        Some(self.escape.as_str()).filter(|e| !e.is_empty())
    }

    pub fn patterns(&self) -> &[TokenPattern] {
        &self.patterns
    }

    pub fn default_plurality(&self) -> &PluralityDefinition {
        &self.default_plurality
    }

    /// The pattern registered for `token`, if any.
    pub fn pattern(&self, token: TokenId) -> Option<&TokenPattern> {
        self.patterns.iter().find(|pattern| pattern.id() == token)
    }

    /// Add a pattern, replacing any existing pattern with the same token.
    pub fn with_pattern(mut self, pattern: TokenPattern) -> Self {
        let token = pattern.id();
        self.patterns.retain(|existing| existing.id() != token);
        self.patterns.push(pattern);
        self
    }

    /// Parse `source` with this configuration.
    pub fn parse<S: Text>(&self, source: &S) -> ParsedTemplate<S> {
        parse(source, self.escape(), &self.patterns, &self.default_plurality)
    }
}
