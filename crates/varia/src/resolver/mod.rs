//! Template resolution.
//!
//! Resolution runs in four passes over a parsed template:
//!
//! 1. Source substitutions are applied to a copy of the source.
//! 2. The source is converted to the output representation.
//! 3. Attribute modifications restyle their content in place.
//! 4. Return substitutions and picks are resolved depth-first.
//!
//! Every replacement is recorded as an edit and
//! applied to the ranges of all regions not yet resolved.

mod bindings;
mod resolve;

pub use bindings::{Binding, Bindings, Substitution};
pub use resolve::{Resolved, resolve};
