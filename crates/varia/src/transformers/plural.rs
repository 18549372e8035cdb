use bon::Builder;

use crate::plural::{PluralityDefinition, language_definition};
use crate::transformers::TransformError;
use crate::types::{MultiTokenSpec, SingleTokenSpec};

/// Resolves plural picks such as `<1:item|*:items>` for a count.
///
/// The language's built-in definition is used unless `definition` is set.
/// With a `count_marker`, regions of that token are replaced by the count.
///
/// # Example
///
/// ```
/// use varia::{EngineConfig, PluralTransformer, SingleTokenSpec};
///
/// let transformer = PluralTransformer::builder()
///     .count(3)
///     .count_marker(SingleTokenSpec::substitution())
///     .build();
/// let resolved = transformer
///     .apply(&EngineConfig::default(), &String::from("<1:one file|*:#n# files>"), "en")
///     .unwrap();
/// assert_eq!(resolved.output, "3 files");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct PluralTransformer {
    count: i64,
    #[builder(default = MultiTokenSpec::plural())]
    token: MultiTokenSpec,
    count_marker: Option<SingleTokenSpec>,
    definition: Option<PluralityDefinition>,
    #[builder(default)]
    strict: bool,
}

impl PluralTransformer {
    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn token(&self) -> &MultiTokenSpec {
        &self.token
    }

    pub fn count_marker(&self) -> Option<&SingleTokenSpec> {
        self.count_marker.as_ref()
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    /// The definition used for `language`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::UnknownLanguage`] if no definition was set
    /// and the language has no built-in one.
    pub fn definition_for(&self, language: &str) -> Result<PluralityDefinition, TransformError> {
        if let Some(definition) = &self.definition {
            return Ok(definition.clone());
        }
        language_definition(language).ok_or_else(|| TransformError::UnknownLanguage {
            language: language.to_string(),
        })
    }
}
