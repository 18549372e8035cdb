//! Parse tree nodes.

use std::ops::Range;

use crate::types::TokenId;

/// Index of a region in a template's arena.
pub type RegionId = usize;

/// What resolving a region does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionKind {
    /// Replaced by a source-representation value.
    SourceSubstitution,
    /// Replaced by a return-representation value.
    ReturnSubstitution,
    /// Content restyled in place; delimiters already stripped.
    AttributeModification,
    /// Branch `branch` of an index-selected split.
    OrderedPick { branch: usize },
    /// Branch `branch` of a count-selected split, evaluated with the
    /// template's plurality definition number `definition`.
    PluralPick { branch: usize, definition: usize },
    /// Branch `branch` of a label-selected split.
    DictionaryPick { branch: usize, key: Option<String> },
}

impl RegionKind {
    /// Branch index for pick kinds.
    pub fn branch(&self) -> Option<usize> {
        match self {
            RegionKind::OrderedPick { branch }
            | RegionKind::PluralPick { branch, .. }
            | RegionKind::DictionaryPick { branch, .. } => Some(*branch),
            RegionKind::SourceSubstitution
            | RegionKind::ReturnSubstitution
            | RegionKind::AttributeModification => None,
        }
    }

    pub fn is_pick(&self) -> bool {
        self.branch().is_some()
    }

    /// Human-readable name used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            RegionKind::SourceSubstitution => "source substitution",
            RegionKind::ReturnSubstitution => "substitution",
            RegionKind::AttributeModification => "attribute modification",
            RegionKind::OrderedPick { .. } => "ordered pick",
            RegionKind::PluralPick { .. } => "plural pick",
            RegionKind::DictionaryPick { .. } => "keyed pick",
        }
    }
}

/// One parsed occurrence of a token, or one branch of a multi-region token.
///
/// Branches of the same split share `container` and `token` and are
/// siblings in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub token: TokenId,
    pub kind: RegionKind,
    /// Content span, delimiters and branch label excluded.
    pub range: Range<usize>,
    /// Content plus delimiters; for a branch, the whole split.
    pub container: Range<usize>,
    /// Left delimiter length stripped at parse time (attribute modifications only).
    pub removed_left_len: usize,
    /// Right delimiter length stripped at parse time (attribute modifications only).
    pub removed_right_len: usize,
    /// Regions nested in this region's content, ordered by position.
    pub children: Vec<RegionId>,
}
