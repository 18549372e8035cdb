//! Tests for loading engine configuration

use varia::{Bindings, EngineConfig, MultiKind, MultiTokenSpec, TokenPattern, default_patterns};

#[test]
fn test_load_config_from_json() {
    let json = r#"{
        "escape": "~",
        "patterns": [
            {
                "shape": "multi",
                "spec": { "left": "[", "interior": "/", "right": "]" },
                "kind": "ordered_pick"
            }
        ],
        "default_plurality": "(0,1)(*)"
    }"#;
    let config: EngineConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.escape(), Some("~"));
    assert_eq!(config.default_plurality().as_str(), "(0,1)(*)");

    let slash = MultiTokenSpec::new("[", "/", "]");
    assert_eq!(
        config.patterns(),
        &[TokenPattern::multi(slash.clone(), MultiKind::OrderedPick)]
    );

    let parsed = config.parse(&"~[a/b] [a/b]".to_string());
    let resolved = parsed.resolve(&Bindings::<String, String>::new().pick(slash.id(), 1));
    assert_eq!(resolved.output, "[a/b] b");
}

#[test]
fn test_missing_fields_use_defaults() {
    let config: EngineConfig = serde_json::from_str(r#"{ "escape": "" }"#).unwrap();
    assert_eq!(config.escape(), None);
    assert_eq!(config.patterns(), default_patterns().as_slice());
    assert_eq!(config.default_plurality().as_str(), "(1)(*)");
}

#[test]
fn test_labelled_pattern_round_trip() {
    let config = EngineConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""label_separator":":""#));
    let loaded: EngineConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_invalid_plurality_is_rejected() {
    let result = serde_json::from_str::<EngineConfig>(r#"{ "default_plurality": "(*)(1)" }"#);
    let err = result.unwrap_err().to_string();
    assert!(err.contains("catch-all clause must be last"), "{err}");
}
