use bon::Builder;

use crate::types::MultiTokenSpec;

/// Selects the n-th branch of an ordered pick token.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct PickTransformer {
    index: usize,
    token: MultiTokenSpec,
    #[builder(default)]
    strict: bool,
}

impl PickTransformer {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn token(&self) -> &MultiTokenSpec {
        &self.token
    }

    pub fn strict(&self) -> bool {
        self.strict
    }
}
