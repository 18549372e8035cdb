use serde::{Deserialize, Serialize};
use varia_semantics::{CHOICE, DelimiterPreset, EMPHASIS, GENDER, PLURAL, SUBSTITUTION};

use super::TokenId;

/// Delimiters of a single-region token, e.g. `#n#`.
///
/// The left and right delimiters may be identical; occurrences then pair up
/// left to right.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SingleTokenSpec {
    left: String,
    right: String,
}

impl SingleTokenSpec {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// A token whose left and right delimiters are the same text.
    pub fn symmetric(delimiter: impl Into<String>) -> Self {
        let delimiter = delimiter.into();
        Self {
            left: delimiter.clone(),
            right: delimiter,
        }
    }

    /// The default `#…#` substitution marker.
    pub fn substitution() -> Self {
        Self::from_preset(&SUBSTITUTION)
    }

    /// The default `**…**` emphasis marker.
    pub fn emphasis() -> Self {
        Self::from_preset(&EMPHASIS)
    }

    pub fn from_preset(preset: &DelimiterPreset) -> Self {
        Self::new(preset.left, preset.right)
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn right(&self) -> &str {
        &self.right
    }

    pub fn id(&self) -> TokenId {
        TokenId::from_key(&format!("s\u{1f}{}\u{1f}{}", self.left, self.right))
    }
}

impl std::fmt::Display for SingleTokenSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}…{}", self.left, self.right)
    }
}

/// Delimiters of a multi-region token, e.g. `<one|other>`.
///
/// The interior delimiter splits the content into branches. With a label
/// separator, a branch may start with `label<separator>`; the label is kept
/// apart from the branch content (`<1:item|*:items>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MultiTokenSpec {
    left: String,
    interior: String,
    right: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label_separator: Option<String>,
}

impl MultiTokenSpec {
    pub fn new(
        left: impl Into<String>,
        interior: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self {
            left: left.into(),
            interior: interior.into(),
            right: right.into(),
            label_separator: None,
        }
    }

    /// Enables `label<separator>` prefixes on branches.
    pub fn with_labels(mut self, separator: impl Into<String>) -> Self {
        self.label_separator = Some(separator.into());
        self
    }

    /// The default `` `male¦female¦neuter´ `` gender token.
    pub fn gender() -> Self {
        Self::from_preset(&GENDER)
    }

    /// The default `<1:one|*:other>` plural token.
    pub fn plural() -> Self {
        Self::from_preset(&PLURAL)
    }

    /// The default `{key:value|*:fallback}` keyed choice token.
    pub fn choice() -> Self {
        Self::from_preset(&CHOICE)
    }

    pub fn from_preset(preset: &DelimiterPreset) -> Self {
        Self {
            left: preset.left.to_string(),
            interior: preset.interior.unwrap_or_default().to_string(),
            right: preset.right.to_string(),
            label_separator: preset.label_separator.map(ToString::to_string),
        }
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn interior(&self) -> &str {
        &self.interior
    }

    pub fn right(&self) -> &str {
        &self.right
    }

    pub fn label_separator(&self) -> Option<&str> {
        self.label_separator.as_deref()
    }

    /// Identity of the delimiter triple; the label separator is not part of it.
    pub fn id(&self) -> TokenId {
        TokenId::from_key(&format!(
            "m\u{1f}{}\u{1f}{}\u{1f}{}",
            self.left, self.interior, self.right
        ))
    }
}

impl std::fmt::Display for MultiTokenSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}…{}…{}", self.left, self.interior, self.right)
    }
}

/// How a single-region token is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleKind {
    /// Replaced with a source-representation value before conversion.
    SourceSubstitution,
    /// Replaced with a return-representation value.
    ReturnSubstitution,
    /// Delimiters stripped, content restyled in place.
    AttributeModification,
}

/// How the branches of a multi-region token are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiKind {
    /// Branch chosen by index.
    OrderedPick,
    /// Branch chosen by the plurality category of a count.
    PluralPick,
    /// Branch chosen by label.
    DictionaryPick,
}

/// A token spec paired with the role its regions play.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TokenPattern {
    Single { spec: SingleTokenSpec, kind: SingleKind },
    Multi { spec: MultiTokenSpec, kind: MultiKind },
}

impl TokenPattern {
    pub fn single(spec: SingleTokenSpec, kind: SingleKind) -> Self {
        TokenPattern::Single { spec, kind }
    }

    pub fn multi(spec: MultiTokenSpec, kind: MultiKind) -> Self {
        TokenPattern::Multi { spec, kind }
    }

    pub fn id(&self) -> TokenId {
        match self {
            TokenPattern::Single { spec, .. } => spec.id(),
            TokenPattern::Multi { spec, .. } => spec.id(),
        }
    }

    pub fn left(&self) -> &str {
        match self {
            TokenPattern::Single { spec, .. } => spec.left(),
            TokenPattern::Multi { spec, .. } => spec.left(),
        }
    }

    pub fn right(&self) -> &str {
        match self {
            TokenPattern::Single { spec, .. } => spec.right(),
            TokenPattern::Multi { spec, .. } => spec.right(),
        }
    }
}

impl std::fmt::Display for TokenPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenPattern::Single { spec, .. } => write!(f, "{spec}"),
            TokenPattern::Multi { spec, .. } => write!(f, "{spec}"),
        }
    }
}
