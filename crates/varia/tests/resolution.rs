//! Integration tests for template resolution

use std::collections::HashMap;
use std::ops::Range;

use varia::{
    Attribute, Binding, Bindings, Diagnostic, EngineConfig, MultiKind, MultiTokenSpec,
    PluralityDefinition, RichText, SingleKind, SingleTokenSpec, Text, TokenPattern,
};

fn gender() -> varia::TokenId {
    MultiTokenSpec::gender().id()
}

fn plural() -> varia::TokenId {
    MultiTokenSpec::plural().id()
}

fn choice() -> varia::TokenId {
    MultiTokenSpec::choice().id()
}

fn marker() -> varia::TokenId {
    SingleTokenSpec::substitution().id()
}

fn emphasis() -> varia::TokenId {
    SingleTokenSpec::emphasis().id()
}

fn resolve(source: &str, bindings: &Bindings<'_, String, String>) -> (String, Vec<Diagnostic>) {
    let parsed = EngineConfig::default().parse(&source.to_string());
    let resolved = parsed.resolve(bindings);
    (resolved.output, resolved.diagnostics)
}

fn ordered_config() -> EngineConfig {
    EngineConfig::default().with_pattern(TokenPattern::multi(
        MultiTokenSpec::plural(),
        MultiKind::OrderedPick,
    ))
}

#[test]
fn test_gender_pick() {
    let bindings = Bindings::new().pick(gender(), 0);
    assert_eq!(resolve("`one¦many´", &bindings).0, "one");

    let bindings = Bindings::new().pick(gender(), 2);
    assert_eq!(resolve("`er¦sie¦es´ kommt", &bindings).0, "es kommt");
}

#[test]
fn test_ordered_pick_clamps_to_last_branch() {
    let parsed = ordered_config().parse(&"<1:item|*:items>".to_string());
    let resolved = parsed.resolve(&Bindings::<String, String>::new().pick(plural(), 5));
    assert_eq!(resolved.output, "items");
    assert!(resolved.diagnostics.is_empty());
}

#[test]
fn test_escaped_pick_is_literal() {
    let config = EngineConfig::builder().escape("~").build();
    let parsed = config.parse(&"~<1:a|*:b>".to_string());
    let resolved = parsed.resolve(&Bindings::<String, String>::new().count(plural(), 1));
    assert_eq!(resolved.output, "<1:a|*:b>");
    assert!(resolved.diagnostics.is_empty());
}

#[test]
fn test_plural_pick_with_count_marker() {
    let source = "You have <1:one item|*:#n# items>";
    let one = Bindings::new()
        .count(plural(), 1)
        .substitute(marker(), "1".to_string());
    assert_eq!(resolve(source, &one).0, "You have one item");

    let many = Bindings::new()
        .count(plural(), 7)
        .substitute(marker(), "7".to_string());
    assert_eq!(resolve(source, &many).0, "You have 7 items");
}

#[test]
fn test_count_with_language_definition() {
    let russian = varia::plural::language_definition("ru").unwrap();
    let source = "<файл|файла|файлов>";
    for (count, expected) in [(1, "файл"), (3, "файла"), (11, "файлов"), (22, "файла")] {
        let bindings = Bindings::new().count_with(plural(), count, russian.clone());
        assert_eq!(resolve(source, &bindings).0, expected, "count {count}");
    }
}

#[test]
fn test_plural_index_clamps_to_last_branch() {
    let three = PluralityDefinition::compile("(0)(1)(*)").unwrap();
    let bindings = Bindings::new().count_with(plural(), 5, three);
    assert_eq!(resolve("<none|one>", &bindings).0, "one");
}

#[test]
fn test_inline_override_wins_over_bound_definition() {
    let source = "[[(0)(*)]]<zero|other> <one|other>";
    let bindings = Bindings::new().count_with(
        plural(),
        0,
        PluralityDefinition::compile("(1)(*)").unwrap(),
    );
    assert_eq!(resolve(source, &bindings).0, "zero other");
}

#[test]
fn test_keyed_pick() {
    let source = "{formal:Sie sind|*:du bist}";
    let formal = Bindings::new().key(choice(), "formal");
    assert_eq!(resolve(source, &formal).0, "Sie sind");

    let other = Bindings::new().key(choice(), "casual");
    assert_eq!(resolve(source, &other).0, "du bist");
}

#[test]
fn test_unknown_key_without_default_branch() {
    let source = "{formal:Sie|casual:du}";
    let bindings = Bindings::new().key(choice(), "formel");
    let (output, diagnostics) = resolve(source, &bindings);
    assert_eq!(output, source);
    assert_eq!(
        diagnostics,
        vec![Diagnostic::UnknownBranchKey {
            token: "{…|…}".to_string(),
            key: "formel".to_string(),
            suggestions: vec!["formal".to_string()],
        }]
    );
}

#[test]
fn test_nested_picks_resolve_inside_out() {
    let bindings = Bindings::new().key(choice(), "formal").pick(gender(), 1);
    assert_eq!(
        resolve("{formal:`Er¦Sie´ ist|*:du bist}!", &bindings).0,
        "Sie ist!"
    );
}

#[test]
fn test_same_token_nested_in_branch() {
    let parsed = ordered_config().parse(&"<a|<b|c>>".to_string());
    let resolved = parsed.resolve(&Bindings::<String, String>::new().pick(plural(), 1));
    assert_eq!(resolved.output, "c");

    let resolved = parsed.resolve(&Bindings::<String, String>::new().pick(plural(), 0));
    assert_eq!(resolved.output, "a");
}

#[test]
fn test_unbound_tokens_are_left_in_place() {
    let bindings = Bindings::new().count(plural(), 1);
    let (output, diagnostics) = resolve("`a¦b´ and <1:x|*:y>", &bindings);
    assert_eq!(output, "`a¦b´ and x");
    assert_eq!(
        diagnostics,
        vec![Diagnostic::UnboundToken {
            token: "`…¦…´".to_string()
        }]
    );
}

#[test]
fn test_unbound_pick_still_resolves_children() {
    let bindings = Bindings::new().pick(gender(), 0);
    let (output, _) = resolve("{x:`he¦she´|*:`him¦her´}", &bindings);
    assert_eq!(output, "{x:he|*:him}");
}

#[test]
fn test_binding_mismatch() {
    let bindings = Bindings::new().key(plural(), "one");
    let (output, diagnostics) = resolve("<1:a|*:b>", &bindings);
    assert_eq!(output, "<1:a|*:b>");
    assert_eq!(
        diagnostics,
        vec![Diagnostic::BindingMismatch {
            token: "<…|…>".to_string(),
            expected: "plural pick",
        }]
    );
}

#[test]
fn test_named_substitution() {
    let values = HashMap::from([
        ("name".to_string(), "Ann".to_string()),
        ("count".to_string(), "3".to_string()),
    ]);
    let bindings = Bindings::new().substitute_named(marker(), values);
    assert_eq!(
        resolve("#name# has #count# items", &bindings).0,
        "Ann has 3 items"
    );
}

#[test]
fn test_unknown_substitution_name() {
    let values = HashMap::from([("name".to_string(), "Ann".to_string())]);
    let bindings = Bindings::new().substitute_named(marker(), values);
    let (output, diagnostics) = resolve("Hi #nme#", &bindings);
    assert_eq!(output, "Hi #nme#");
    assert_eq!(
        diagnostics,
        vec![Diagnostic::UnknownSubstitutionName {
            token: "#…#".to_string(),
            name: "nme".to_string(),
            suggestions: vec!["name".to_string()],
        }]
    );
}

#[test]
fn test_source_substitution_before_conversion() {
    let user = SingleTokenSpec::symmetric("%");
    let config = EngineConfig::default().with_pattern(TokenPattern::single(
        user.clone(),
        SingleKind::SourceSubstitution,
    ));
    let parsed = config.parse(&"Hello %user%, <1:one|*:#n#> new".to_string());
    let bindings = Bindings::<String, RichText>::new()
        .substitute_source(user.id(), "World".to_string())
        .count(plural(), 2)
        .substitute(marker(), RichText::from("2"));
    let resolved = parsed.resolve(&bindings);
    assert_eq!(resolved.output.as_str(), "Hello World, 2 new");
    assert!(resolved.diagnostics.is_empty());
}

#[test]
fn test_attribute_modification_on_rich_text() {
    let parsed = EngineConfig::default().parse(&RichText::from("Say **hello** now"));
    let bold = Attribute::new("bold");
    let bindings = Bindings::<RichText, RichText>::new().modify(
        emphasis(),
        |text: &mut RichText, range: Range<usize>| text.add_attribute(range, Attribute::new("bold")),
    );
    let resolved = parsed.resolve(&bindings);
    let output = resolved.output;
    assert_eq!(output.as_str(), "Say hello now");
    assert!(output.attributes_at(0).is_empty());
    assert!(output.attributes_at(4).contains(&bold));
    assert!(output.attributes_at(8).contains(&bold));
    assert!(!output.attributes_at(9).contains(&bold));
}

#[test]
fn test_attributes_survive_branch_selection() {
    let parsed = EngineConfig::default().parse(&RichText::from("<1:**one** item|*:many **items**>"));
    let bold = Attribute::new("bold");
    let bindings = Bindings::<RichText, RichText>::new()
        .count(plural(), 5)
        .modify(emphasis(), |text: &mut RichText, range: Range<usize>| {
            text.add_attribute(range, Attribute::new("bold"));
        });
    let output = parsed.resolve(&bindings).output;
    assert_eq!(output.plain_text(), "many items");
    assert!(!output.attributes_at(4).contains(&bold));
    assert!(output.attributes_at(5).contains(&bold));
    assert!(output.attributes_at(9).contains(&bold));
}

#[test]
fn test_rich_source_keeps_existing_attributes() {
    let mut source = RichText::from("<1:a cat|*:cats> sleep");
    source.add_attribute(17..22, Attribute::new("italic"));
    let parsed = EngineConfig::default().parse(&source);
    let output = parsed
        .resolve(&Bindings::<RichText, RichText>::new().count(plural(), 1))
        .output;
    assert_eq!(output.as_str(), "a cat sleep");
    assert!(output.attributes_at(0).is_empty());
    assert!(output.attributes_at(6).contains(&Attribute::new("italic")));
}

#[test]
fn test_explicit_binding_enum() {
    let bindings = Bindings::<String, String>::new().bind(
        plural(),
        Binding::Count {
            count: 0,
            definition: Some(PluralityDefinition::compile("(0)(*)").unwrap()),
        },
    );
    assert_eq!(resolve("<nothing|something>", &bindings).0, "nothing");
}

#[test]
fn test_resolution_is_repeatable() {
    let parsed = EngineConfig::default().parse(&"<1:a|*:b>".to_string());
    let first = parsed.resolve(&Bindings::<String, String>::new().count(plural(), 1));
    let second = parsed.resolve(&Bindings::<String, String>::new().count(plural(), 2));
    assert_eq!(first.output, "a");
    assert_eq!(second.output, "b");
    assert_eq!(parsed.plain_text(), "<1:a|*:b>");
}

#[test]
fn test_substitution_across_branches_keeps_pick_intact() {
    let parsed = EngineConfig::default().parse(&"<1:item #1|*:items #2>".to_string());
    let resolved = parsed.resolve(&Bindings::<String, String>::new().count(plural(), 5));
    assert_eq!(resolved.output, "items #2");
    assert!(resolved.diagnostics.is_empty());

    let parsed = EngineConfig::default().parse(&"`he #x¦she# y´".to_string());
    assert!(matches!(
        parsed.diagnostics(),
        [Diagnostic::OverlappingRegion { start: 4, end: 12, .. }]
    ));
    let resolved = parsed.resolve(&Bindings::<String, String>::new().pick(gender(), 1));
    assert_eq!(resolved.output, "she# y");
}
