mod edit;
mod rich_text;
mod text;
mod token;
mod token_id;

pub(crate) use edit::Edit;
pub use rich_text::{Attribute, RichText, Run};
pub use text::Text;
pub use token::{MultiKind, MultiTokenSpec, SingleKind, SingleTokenSpec, TokenPattern};
pub use token_id::TokenId;
