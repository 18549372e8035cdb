use std::collections::HashMap;

use bon::Builder;

use crate::resolver::Substitution;
use crate::types::SingleTokenSpec;

/// Replaces substitution regions with computed strings.
///
/// A fixed value replaces every region; a table is keyed by each region's
/// content, so `#name#` and `#place#` can be filled at once.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct SubstitutionTransformer {
    value: Substitution<String>,
    #[builder(default = SingleTokenSpec::substitution())]
    token: SingleTokenSpec,
    #[builder(default)]
    strict: bool,
}

impl SubstitutionTransformer {
    /// Replace every region with `value`.
    pub fn fixed(value: impl Into<String>) -> Self {
        SubstitutionTransformer::builder()
            .value(Substitution::Fixed(value.into()))
            .build()
    }

    /// Replace regions by name.
    pub fn named<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let values: HashMap<String, String> = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        SubstitutionTransformer::builder()
            .value(Substitution::Named(values))
            .build()
    }

    pub fn value(&self) -> &Substitution<String> {
        &self.value
    }

    pub fn token(&self) -> &SingleTokenSpec {
        &self.token
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    /// The value converted into the output representation.
    pub(crate) fn value_as<T: From<String>>(&self) -> Substitution<T> {
        match &self.value {
            Substitution::Fixed(value) => Substitution::Fixed(T::from(value.clone())),
            Substitution::Named(values) => Substitution::Named(
                values
                    .iter()
                    .map(|(name, value)| (name.clone(), T::from(value.clone())))
                    .collect(),
            ),
        }
    }
}
