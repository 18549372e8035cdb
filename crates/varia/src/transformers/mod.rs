//! Ready-made bindings for common localization tasks.
//!
//! Each transformer binds one token. [`apply_chain`] parses the source
//! once, merges the bindings of every transformer (later ones win for the
//! same token), and resolves once, so escapes and nesting behave exactly as
//! with hand-written [`Bindings`].

mod error;
mod gender;
mod pick;
mod plural;
mod substitution;

use std::slice;

use tracing::debug;

pub use error::TransformError;
pub use gender::{Gender, GenderTransformer};
pub use pick::PickTransformer;
pub use plural::PluralTransformer;
pub use substitution::SubstitutionTransformer;

use crate::config::EngineConfig;
use crate::diagnostic::Diagnostic;
use crate::resolver::{Binding, Bindings, Resolved, Substitution};
use crate::types::{Text, TokenId};

/// Any of the built-in transformers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transformer {
    Gender(GenderTransformer),
    Plural(PluralTransformer),
    Pick(PickTransformer),
    Substitution(SubstitutionTransformer),
}

impl Transformer {
    /// The token this transformer binds.
    pub fn token(&self) -> TokenId {
        match self {
            Transformer::Gender(t) => t.token().id(),
            Transformer::Plural(t) => t.token().id(),
            Transformer::Pick(t) => t.token().id(),
            Transformer::Substitution(t) => t.token().id(),
        }
    }

    fn token_name(&self) -> String {
        match self {
            Transformer::Gender(t) => t.token().to_string(),
            Transformer::Plural(t) => t.token().to_string(),
            Transformer::Pick(t) => t.token().to_string(),
            Transformer::Substitution(t) => t.token().to_string(),
        }
    }

    pub fn is_strict(&self) -> bool {
        match self {
            Transformer::Gender(t) => t.strict(),
            Transformer::Plural(t) => t.strict(),
            Transformer::Pick(t) => t.strict(),
            Transformer::Substitution(t) => t.strict(),
        }
    }

    fn bind<T>(&self, bindings: &mut Bindings<'_, T, T>, language: &str) -> Result<(), TransformError>
    where
        T: Text + From<String>,
    {
        let token = self.token();
        match self {
            Transformer::Gender(t) => bindings.insert(token, Binding::Index(t.gender().index())),
            Transformer::Pick(t) => bindings.insert(token, Binding::Index(t.index())),
            Transformer::Plural(t) => {
                let definition = t.definition_for(language)?;
                bindings.insert(
                    token,
                    Binding::Count {
                        count: t.count(),
                        definition: Some(definition),
                    },
                );
                if let Some(marker) = t.count_marker() {
                    let count = T::from(t.count().to_string());
                    bindings.insert(marker.id(), Binding::Return(Substitution::Fixed(count)));
                }
            }
            Transformer::Substitution(t) => {
                bindings.insert(token, Binding::Return(t.value_as()));
            }
        }
        Ok(())
    }

    /// Apply this transformer alone. See [`apply_chain`].
    ///
    /// # Errors
    ///
    /// See [`apply_chain`].
    pub fn apply<T>(
        &self,
        config: &EngineConfig,
        source: &T,
        language: &str,
    ) -> Result<Resolved<T>, TransformError>
    where
        T: Text + From<String>,
    {
        apply_chain(config, slice::from_ref(self), source, language)
    }
}

macro_rules! transformer_conversions {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Transformer {
                fn from(transformer: $ty) -> Self {
                    Transformer::$variant(transformer)
                }
            }

            impl $ty {
                /// Apply this transformer alone.
                ///
                /// # Errors
                ///
                /// See [`apply_chain`].
                pub fn apply<T>(
                    &self,
                    config: &EngineConfig,
                    source: &T,
                    language: &str,
                ) -> Result<Resolved<T>, TransformError>
                where
                    T: Text + From<String>,
                {
                    Transformer::from(self.clone()).apply(config, source, language)
                }
            }
        )+
    };
}

transformer_conversions! {
    Gender => GenderTransformer,
    Plural => PluralTransformer,
    Pick => PickTransformer,
    Substitution => SubstitutionTransformer,
}

/// Apply several transformers to `source` in one parse and one resolution.
///
/// The result carries the parse diagnostics followed by the resolution
/// diagnostics. Tokens no transformer binds are left as they are and not
/// reported.
///
/// # Errors
///
/// Returns [`TransformError::InvalidMapping`] if a strict transformer's
/// token does not occur in `source`, and
/// [`TransformError::UnknownLanguage`] if a plural transformer has no
/// definition for `language`.
///
/// # Example
///
/// ```
/// use varia::{
///     EngineConfig, Gender, GenderTransformer, PluralTransformer, Transformer, apply_chain,
/// };
///
/// let chain: [Transformer; 2] = [
///     GenderTransformer::builder().gender(Gender::Female).build().into(),
///     PluralTransformer::builder().count(2).build().into(),
/// ];
/// let source = String::from("`He¦She´ owns <1:a cat|*:cats>");
/// let resolved = apply_chain(&EngineConfig::default(), &chain, &source, "en").unwrap();
/// assert_eq!(resolved.output, "She owns cats");
/// ```
pub fn apply_chain<T>(
    config: &EngineConfig,
    transformers: &[Transformer],
    source: &T,
    language: &str,
) -> Result<Resolved<T>, TransformError>
where
    T: Text + From<String>,
{
    let parsed = config.parse(source);
    let mut bindings = Bindings::new();
    for transformer in transformers {
        if transformer.is_strict() && !parsed.uses_token(transformer.token()) {
            return Err(TransformError::InvalidMapping {
                token: transformer.token_name(),
            });
        }
        transformer.bind(&mut bindings, language)?;
    }
    debug!(transformers = transformers.len(), language, "Applying transformers");

    let resolved = parsed.resolve(&bindings);
    let mut diagnostics = parsed.diagnostics().to_vec();
    diagnostics.extend(
        resolved
            .diagnostics
            .into_iter()
            .filter(|diagnostic| !matches!(diagnostic, Diagnostic::UnboundToken { .. })),
    );
    Ok(Resolved {
        output: resolved.output,
        diagnostics,
    })
}
