use std::collections::HashSet;

use varia_semantics::{
    PluralFamily, plurality_definition, resolve_plural_family, supported_languages,
};

#[test]
fn family_resolution_matrix() {
    assert_eq!(resolve_plural_family("en"), Some(PluralFamily::OneOther));
    assert_eq!(resolve_plural_family("fr"), Some(PluralFamily::ZeroOneOther));
    assert_eq!(resolve_plural_family("ru"), Some(PluralFamily::EastSlavic));
    assert_eq!(resolve_plural_family("pl"), Some(PluralFamily::Polish));
    assert_eq!(resolve_plural_family("cs"), Some(PluralFamily::WestSlavic));
    assert_eq!(resolve_plural_family("ro"), Some(PluralFamily::Romanian));
    assert_eq!(resolve_plural_family("ar"), Some(PluralFamily::Arabic));
    assert_eq!(resolve_plural_family("he"), Some(PluralFamily::Hebrew));
    assert_eq!(resolve_plural_family("ja"), Some(PluralFamily::Invariant));
}

#[test]
fn region_subtags_and_case_are_ignored() {
    assert_eq!(resolve_plural_family("pt-BR"), Some(PluralFamily::ZeroOneOther));
    assert_eq!(resolve_plural_family("zh_Hant"), Some(PluralFamily::Invariant));
    assert_eq!(resolve_plural_family("RU"), Some(PluralFamily::EastSlavic));
}

#[test]
fn legacy_aliases_resolve() {
    assert_eq!(resolve_plural_family("no"), Some(PluralFamily::OneOther));
    assert_eq!(resolve_plural_family("iw"), Some(PluralFamily::Hebrew));
    assert_eq!(resolve_plural_family("in"), Some(PluralFamily::Invariant));
    assert_eq!(resolve_plural_family("Base"), Some(PluralFamily::OneOther));
}

#[test]
fn unknown_language_has_no_definition() {
    assert_eq!(resolve_plural_family("xx"), None);
    assert_eq!(plurality_definition("klingon"), None);
    assert_eq!(plurality_definition(""), None);
}

#[test]
fn every_supported_language_resolves() {
    for lang in supported_languages() {
        assert!(
            plurality_definition(lang).is_some(),
            "supported language '{lang}' has no definition"
        );
    }
}

#[test]
fn supported_languages_are_unique() {
    let unique: HashSet<_> = supported_languages().iter().collect();
    assert_eq!(unique.len(), supported_languages().len());
}

#[test]
fn category_names_match_clause_count() {
    let families = [
        PluralFamily::OneOther,
        PluralFamily::ZeroOneOther,
        PluralFamily::EastSlavic,
        PluralFamily::Polish,
        PluralFamily::WestSlavic,
        PluralFamily::Romanian,
        PluralFamily::Arabic,
        PluralFamily::Hebrew,
        PluralFamily::Invariant,
    ];
    for family in families {
        let clauses = family.definition().matches('(').count();
        assert_eq!(
            clauses,
            family.category_names().len(),
            "{family:?} names do not line up with its clauses"
        );
    }
}
