//! Templated localization strings.
//!
//! A template is ordinary text carrying token regions: picks that choose one
//! branch by gender, count, or key, substitutions, and attribute
//! modifications. Templates are parsed once into a [`ParsedTemplate`] and
//! resolved against [`Bindings`] into any [`Text`] representation, plain
//! [`String`] or attributed [`RichText`].
//!
//! # Example
//!
//! ```
//! use varia::{Bindings, EngineConfig, MultiTokenSpec, SingleTokenSpec};
//!
//! let config = EngineConfig::default();
//! let parsed = config.parse(&String::from("You have <1:one item|*:#n# items>"));
//!
//! let bindings = Bindings::<String, String>::new()
//!     .count(MultiTokenSpec::plural().id(), 4)
//!     .substitute(SingleTokenSpec::substitution().id(), "4".to_string());
//! let resolved = parsed.resolve(&bindings);
//! assert_eq!(resolved.output, "You have 4 items");
//! ```

pub mod config;
pub mod diagnostic;
pub mod parser;
pub mod plural;
pub mod resolver;
pub mod transformers;
pub mod types;

pub use config::{EngineConfig, default_patterns};
pub use diagnostic::{Diagnostic, compute_suggestions};
pub use parser::{ParsedTemplate, Region, RegionId, RegionKind, parse};
pub use plural::{PluralityDefinition, PluralityError, plural_category_index};
pub use resolver::{Binding, Bindings, Resolved, Substitution, resolve};
pub use transformers::{
    Gender, GenderTransformer, PickTransformer, PluralTransformer, SubstitutionTransformer,
    TransformError, Transformer, apply_chain,
};
pub use types::{
    Attribute, MultiKind, MultiTokenSpec, RichText, Run, SingleKind, SingleTokenSpec, Text,
    TokenId, TokenPattern,
};
