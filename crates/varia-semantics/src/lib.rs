//! Shared varia tables used by the engine, its adapters, and external tooling.
//!
//! This crate centralizes the built-in plurality definitions and the default
//! delimiter presets so that every consumer resolves a language code or a
//! default token the same way.

/// Plural rule families with a built-in plurality definition.
///
/// Each family approximates the CLDR cardinal rules of its languages for
/// integer counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralFamily {
    /// `one` for 1, `other` otherwise.
    OneOther,
    /// `one` for 0 and 1, `other` otherwise.
    ZeroOneOther,
    /// East Slavic: `one`, `few`, `many` keyed on the last two digits.
    EastSlavic,
    /// Polish: `one` only for 1, then `few`/`many` on the last two digits.
    Polish,
    /// Czech and Slovak: `one`, `few` for 2-4, `other`.
    WestSlavic,
    /// Romanian: `one`, `few` for 0 and numbers ending in 01-19, `other`.
    Romanian,
    /// Arabic: `zero`, `one`, `two`, `few`, `many`, `other`.
    Arabic,
    /// Hebrew: `one`, `two`, `other`.
    Hebrew,
    /// No plural distinction.
    Invariant,
}

impl PluralFamily {
    /// The plurality definition string for this family.
    pub fn definition(self) -> &'static str {
        match self {
            PluralFamily::OneOther => "(1)(*)",
            PluralFamily::ZeroOneOther => "(0,1)(*)",
            PluralFamily::EastSlavic => "(%10:1;!~11$)(%10:2→4;!~1[2-4]$)(*)",
            PluralFamily::Polish => "(1)(%10:2→4;!~1[2-4]$)(*)",
            PluralFamily::WestSlavic => "(1)(2→4)(*)",
            PluralFamily::Romanian => "(1)(%100:0→19;!~^[1-9][0-9]*00$)(*)",
            PluralFamily::Arabic => "(0)(1)(2)(%100:3→10)(%100:11→99)(*)",
            PluralFamily::Hebrew => "(1)(2)(*)",
            PluralFamily::Invariant => "(*)",
        }
    }

    /// Category names in definition order, for diagnostics and tooling.
    pub fn category_names(self) -> &'static [&'static str] {
        match self {
            PluralFamily::OneOther | PluralFamily::ZeroOneOther => &["one", "other"],
            PluralFamily::EastSlavic | PluralFamily::Polish => &["one", "few", "many"],
            PluralFamily::WestSlavic | PluralFamily::Romanian => &["one", "few", "other"],
            PluralFamily::Arabic => &["zero", "one", "two", "few", "many", "other"],
            PluralFamily::Hebrew => &["one", "two", "other"],
            PluralFamily::Invariant => &["other"],
        }
    }
}

/// Resolve a language code to its plural family.
///
/// Region and script subtags are ignored (`pt-BR` resolves like `pt`), and
/// matching is case-insensitive. Returns `None` for unknown languages.
pub fn resolve_plural_family(lang: &str) -> Option<PluralFamily> {
    let primary = primary_subtag(lang);
    match canonicalize_alias(&primary) {
        "en" | "de" | "nl" | "sv" | "da" | "nb" | "nn" | "it" | "es" | "el" | "hu" | "fi"
        | "et" | "tr" | "bg" | "ca" | "eu" | "gl" => Some(PluralFamily::OneOther),
        "fr" | "pt" | "hi" | "bn" | "fa" | "am" | "zu" => Some(PluralFamily::ZeroOneOther),
        "ru" | "uk" | "be" => Some(PluralFamily::EastSlavic),
        "pl" => Some(PluralFamily::Polish),
        "cs" | "sk" => Some(PluralFamily::WestSlavic),
        "ro" | "mo" => Some(PluralFamily::Romanian),
        "ar" => Some(PluralFamily::Arabic),
        "he" => Some(PluralFamily::Hebrew),
        "ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "my" | "lo" | "km" => {
            Some(PluralFamily::Invariant)
        }
        _ => None,
    }
}

/// The plurality definition string for a language code, if known.
pub fn plurality_definition(lang: &str) -> Option<&'static str> {
    resolve_plural_family(lang).map(PluralFamily::definition)
}

/// Language codes with a built-in plurality definition.
pub fn supported_languages() -> &'static [&'static str] {
    SUPPORTED_LANGUAGES
}

fn primary_subtag(lang: &str) -> String {
    lang.split(['-', '_'])
        .next()
        .unwrap_or(lang)
        .to_ascii_lowercase()
}

fn canonicalize_alias(code: &str) -> &str {
    match code {
        "no" => "nb",
        "iw" => "he",
        "in" => "id",
        "base" => "en",
        other => other,
    }
}

const SUPPORTED_LANGUAGES: &[&str] = &[
    "am", "ar", "be", "bg", "bn", "ca", "cs", "da", "de", "el", "en", "es", "et", "eu", "fa", "fi",
    "fr", "gl", "he", "hi", "hu", "id", "it", "ja", "km", "ko", "lo", "mo", "ms", "my", "nb", "nl",
    "nn", "pl", "pt", "ro", "ru", "sk", "sv", "th", "tr", "uk", "vi", "zh", "zu",
];

/// Delimiters of a built-in token preset.
///
/// `interior` is `None` for single-region tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterPreset {
    pub left: &'static str,
    pub interior: Option<&'static str>,
    pub right: &'static str,
    pub label_separator: Option<&'static str>,
}

/// Gender branches: `` `male¦female¦neuter´ ``.
pub const GENDER: DelimiterPreset = DelimiterPreset {
    left: "`",
    interior: Some("¦"),
    right: "´",
    label_separator: None,
};

/// Plural branches: `<1:item|*:items>`.
pub const PLURAL: DelimiterPreset = DelimiterPreset {
    left: "<",
    interior: Some("|"),
    right: ">",
    label_separator: Some(":"),
};

/// Keyed choice branches: `{formal:Sie|*:du}`.
pub const CHOICE: DelimiterPreset = DelimiterPreset {
    left: "{",
    interior: Some("|"),
    right: "}",
    label_separator: Some(":"),
};

/// Inline substitution marker: `#n#`.
pub const SUBSTITUTION: DelimiterPreset = DelimiterPreset {
    left: "#",
    interior: None,
    right: "#",
    label_separator: None,
};

/// Emphasis marker resolved as an attribute modification: `**bold**`.
pub const EMPHASIS: DelimiterPreset = DelimiterPreset {
    left: "**",
    interior: None,
    right: "**",
    label_separator: None,
};

/// Default escape token.
pub const ESCAPE: &str = "\\";

/// Label that designates the default branch of a keyed choice.
pub const DEFAULT_BRANCH_LABEL: &str = "*";

/// Unit of the inline plurality override prefix, `[[...]]`.
pub const OVERRIDE_OPEN: &str = "[";

/// Closing unit of the inline plurality override prefix.
pub const OVERRIDE_CLOSE: &str = "]";

/// Separator between the override's per-region definitions.
pub const OVERRIDE_SEPARATOR: &str = "|";

/// Override placeholder meaning "use the default definition".
pub const OVERRIDE_DEFAULT: &str = "_";
