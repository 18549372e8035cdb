//! Integration tests for the built-in transformers

use varia::{
    Diagnostic, EngineConfig, Gender, GenderTransformer, MultiTokenSpec, PickTransformer,
    PluralTransformer, PluralityDefinition, RichText, SingleTokenSpec, SubstitutionTransformer,
    TransformError, Transformer, apply_chain,
};

fn config() -> EngineConfig {
    EngineConfig::default()
}

#[test]
fn test_gender_transformer() {
    let source = "`Er¦Sie¦Es´ schläft".to_string();
    for (gender, expected) in [
        (Gender::Male, "Er schläft"),
        (Gender::Female, "Sie schläft"),
        (Gender::Neuter, "Es schläft"),
    ] {
        let transformer = GenderTransformer::builder().gender(gender).build();
        let resolved = transformer.apply(&config(), &source, "de").unwrap();
        assert_eq!(resolved.output, expected);
        assert!(resolved.diagnostics.is_empty());
    }
}

#[test]
fn test_plural_transformer_uses_language_rules() {
    let source = "<файл|файла|файлов>".to_string();
    for (count, expected) in [(1, "файл"), (4, "файла"), (5, "файлов"), (21, "файл")] {
        let transformer = PluralTransformer::builder().count(count).build();
        let resolved = transformer.apply(&config(), &source, "ru").unwrap();
        assert_eq!(resolved.output, expected, "count {count}");
    }
}

#[test]
fn test_plural_transformer_with_count_marker() {
    let transformer = PluralTransformer::builder()
        .count(2)
        .count_marker(SingleTokenSpec::substitution())
        .build();
    let resolved = transformer
        .apply(&config(), &"<1:one file|*:#n# files>".to_string(), "en")
        .unwrap();
    assert_eq!(resolved.output, "2 files");
}

#[test]
fn test_plural_transformer_unknown_language() {
    let transformer = PluralTransformer::builder().count(2).build();
    let err = transformer
        .apply(&config(), &"<a|b>".to_string(), "xx")
        .unwrap_err();
    assert_eq!(
        err,
        TransformError::UnknownLanguage {
            language: "xx".to_string()
        }
    );
}

#[test]
fn test_plural_transformer_explicit_definition() {
    let transformer = PluralTransformer::builder()
        .count(0)
        .definition(PluralityDefinition::compile("(0)(*)").unwrap())
        .build();
    let resolved = transformer
        .apply(&config(), &"<none|some>".to_string(), "xx")
        .unwrap();
    assert_eq!(resolved.output, "none");
}

#[test]
fn test_plural_transformer_region_subtag() {
    let transformer = PluralTransformer::builder().count(0).build();
    let resolved = transformer
        .apply(&config(), &"<un|des>".to_string(), "fr-CA")
        .unwrap();
    assert_eq!(resolved.output, "un");
}

#[test]
fn test_pick_transformer() {
    let transformer = PickTransformer::builder()
        .index(1)
        .token(MultiTokenSpec::gender())
        .build();
    let resolved = transformer
        .apply(&config(), &"`first¦second´".to_string(), "en")
        .unwrap();
    assert_eq!(resolved.output, "second");
}

#[test]
fn test_substitution_transformer() {
    let transformer = SubstitutionTransformer::named([("user", "Ann"), ("place", "Oslo")]);
    let resolved = transformer
        .apply(&config(), &"#user# lives in #place#".to_string(), "en")
        .unwrap();
    assert_eq!(resolved.output, "Ann lives in Oslo");

    let fixed = SubstitutionTransformer::fixed("?");
    let resolved = fixed.apply(&config(), &"#a# and #b#".to_string(), "en").unwrap();
    assert_eq!(resolved.output, "? and ?");
}

#[test]
fn test_strict_transformer_requires_token() {
    let transformer = GenderTransformer::builder()
        .gender(Gender::Male)
        .strict(true)
        .build();
    let err = transformer
        .apply(&config(), &"no gender here".to_string(), "en")
        .unwrap_err();
    assert_eq!(
        err,
        TransformError::InvalidMapping {
            token: "`…¦…´".to_string()
        }
    );
}

#[test]
fn test_lenient_transformer_leaves_other_tokens() {
    let transformer = GenderTransformer::builder().gender(Gender::Male).build();
    let resolved = transformer
        .apply(&config(), &"<1:a|*:b> `x¦y´".to_string(), "en")
        .unwrap();
    assert_eq!(resolved.output, "<1:a|*:b> x");
    assert!(resolved.diagnostics.is_empty());
}

#[test]
fn test_chain_shares_one_parse() {
    let chain: Vec<Transformer> = vec![
        GenderTransformer::builder()
            .gender(Gender::Female)
            .build()
            .into(),
        PluralTransformer::builder()
            .count(3)
            .count_marker(SingleTokenSpec::substitution())
            .build()
            .into(),
    ];
    let source = r"`He¦She´ has <1:a cat|*:#n# cats> \<3".to_string();
    let resolved = apply_chain(&config(), &chain, &source, "en").unwrap();
    assert_eq!(resolved.output, "She has 3 cats <3");
    assert!(resolved.diagnostics.is_empty());
}

#[test]
fn test_chain_later_binding_wins() {
    let chain: Vec<Transformer> = vec![
        SubstitutionTransformer::fixed("first").into(),
        SubstitutionTransformer::fixed("second").into(),
    ];
    let resolved = apply_chain(&config(), &chain, &"#x#".to_string(), "en").unwrap();
    assert_eq!(resolved.output, "second");
}

#[test]
fn test_chain_reports_parse_diagnostics() {
    let chain: Vec<Transformer> = vec![PluralTransformer::builder().count(1).build().into()];
    let resolved = apply_chain(&config(), &chain, &"<1:a|*:b> <c".to_string(), "en").unwrap();
    assert_eq!(resolved.output, "a <c");
    assert_eq!(
        resolved.diagnostics,
        vec![Diagnostic::UnterminatedRegion {
            token: "<…|…>".to_string(),
            offset: 10,
        }]
    );
}

#[test]
fn test_transformers_on_rich_text() {
    let transformer = PluralTransformer::builder().count(1).build();
    let resolved = transformer
        .apply(&config(), &RichText::from("<1:one|*:many> **left**"), "en")
        .unwrap();
    assert_eq!(resolved.output.as_str(), "one left");
}
