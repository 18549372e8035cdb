//! Template parser.
//!
//! Parsing locates every token region in a source, nests them into a tree,
//! and removes escape tokens and attribute delimiters. The result keeps the
//! source's representation; ranges are byte offsets into its plain text.

mod overrides;
mod region;
mod scan;
mod template;
pub(crate) mod tree;

pub use region::{Region, RegionId, RegionKind};
pub use template::{ParsedTemplate, parse};
