use thiserror::Error;

/// Why a transformer could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// No built-in plurality definition exists for the language.
    #[error("no plurality definition for language '{language}'")]
    UnknownLanguage { language: String },

    /// A strict transformer's token does not occur in the source.
    #[error("source contains no '{token}' region")]
    InvalidMapping { token: String },
}
