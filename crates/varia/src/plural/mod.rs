//! Plurality rule engine.
//!
//! A plurality definition is a short rule string such as `(1)(*)` compiled
//! into an ordered list of match clauses plus a catch-all. Evaluating it
//! against a count yields the zero-based index of the plural branch to pick.
//!
//! Built-in definitions for common languages come from `varia-semantics`.
//! Compiled built-ins are cached per thread, keyed by their definition string.

mod definition;
mod error;
mod grammar;

use std::cell::RefCell;

pub use definition::PluralityDefinition;
pub use error::PluralityError;

thread_local! {
    /// Per-thread cache of compiled built-in definitions.
    static DEFINITION_CACHE: RefCell<Vec<(&'static str, PluralityDefinition)>> =
        const { RefCell::new(Vec::new()) };
}

/// The built-in plurality definition for a language code, compiled.
///
/// Returns `None` for languages without a built-in definition.
pub fn language_definition(lang: &str) -> Option<PluralityDefinition> {
    let source = varia_semantics::plurality_definition(lang)?;
    DEFINITION_CACHE.with_borrow_mut(|cache| {
        if let Some((_, definition)) = cache.iter().find(|(key, _)| *key == source) {
            return Some(definition.clone());
        }
        let definition = PluralityDefinition::compile(source).ok()?;
        cache.push((source, definition.clone()));
        Some(definition)
    })
}

/// Plural category index of `count` in a language.
///
/// # Examples
///
/// ```
/// use varia::plural::plural_category_index;
///
/// assert_eq!(plural_category_index("en", 1), Some(0));
/// assert_eq!(plural_category_index("en", 2), Some(1));
/// assert_eq!(plural_category_index("ru", 22), Some(1));
/// assert_eq!(plural_category_index("ru", 25), Some(2));
/// assert_eq!(plural_category_index("xx", 1), None);
/// ```
pub fn plural_category_index(lang: &str, count: i64) -> Option<usize> {
    language_definition(lang).map(|definition| definition.category_index(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catch_all_must_be_last() {
        let err = PluralityDefinition::compile("(*)(1)").unwrap_err();
        assert!(matches!(err, PluralityError::CatchAllNotLast { .. }));
    }

    #[test]
    fn implicit_catch_all_follows_last_clause() {
        let definition = PluralityDefinition::compile("(1)(2)").unwrap();
        assert_eq!(definition.category_count(), 3);
        assert_eq!(definition.category_index(7), 2);
        assert_eq!(definition.catch_all_index(), 2);
    }

    #[test]
    fn catch_all_only_definition() {
        let definition = PluralityDefinition::compile("(*)").unwrap();
        assert_eq!(definition.category_count(), 1);
        assert_eq!(definition.category_index(0), 0);
        assert_eq!(definition.category_index(i64::MIN), 0);
    }

    #[test]
    fn negative_counts_use_magnitude() {
        let definition = PluralityDefinition::compile("(1)(*)").unwrap();
        assert_eq!(definition.category_index(-1), 0);
        assert_eq!(definition.category_index(-2), 1);
    }

    #[test]
    fn invalid_definitions_fail_fast() {
        assert!(matches!(
            PluralityDefinition::compile("(4→2)"),
            Err(PluralityError::EmptyRange { low: 4, high: 2, .. })
        ));
        assert!(matches!(
            PluralityDefinition::compile("(%0:1)"),
            Err(PluralityError::ZeroModulus { .. })
        ));
        assert!(matches!(
            PluralityDefinition::compile("(1;~[)"),
            Err(PluralityError::InvalidGuard { .. })
        ));
        assert!(matches!(
            PluralityDefinition::compile("one"),
            Err(PluralityError::Syntax { position: 0, .. })
        ));
    }

    #[test]
    fn default_matches_compiled_english() {
        let compiled = PluralityDefinition::compile("(1)(*)").unwrap();
        let default = PluralityDefinition::default();
        assert_eq!(compiled, default);
        for n in 0..20 {
            assert_eq!(compiled.category_index(n), default.category_index(n));
        }
    }

    #[test]
    fn language_definitions_are_cached() {
        let first = language_definition("pl").unwrap();
        let second = language_definition("pl").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.category_index(22), 1);
        assert_eq!(first.category_index(21), 2);
    }
}
