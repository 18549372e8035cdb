use const_fnv1a_hash::fnv1a_hash_str_64;
use serde::{Deserialize, Serialize};

/// A compact identifier for a token spec.
///
/// `TokenId` wraps a 64-bit FNV-1a hash of a spec's delimiters. Two specs
/// with the same delimiters share an id, so bindings keyed by `TokenId` match
/// every region carved by either of them.
///
/// # Example
///
/// ```
/// use varia::{MultiTokenSpec, TokenId};
///
/// let plural = MultiTokenSpec::new("<", "|", ">");
/// assert_eq!(plural.id(), MultiTokenSpec::new("<", "|", ">").id());
/// assert_ne!(plural.id(), MultiTokenSpec::new("{", "|", "}").id());
/// assert_eq!(TokenId::from_key("m\u{1f}<\u{1f}|\u{1f}>"), plural.id());
/// ```
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct TokenId(u64);

impl TokenId {
    /// Create a `TokenId` from a delimiter key.
    ///
    /// This is a `const fn`, so well-known ids can be computed at compile time.
    pub const fn from_key(key: &str) -> Self {
        Self(fnv1a_hash_str_64(key))
    }

    /// Get the raw hash value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TokenId({:016x})", self.0)
    }
}
