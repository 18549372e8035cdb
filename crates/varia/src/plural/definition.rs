use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::RangeInclusive;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::PluralityError;
use super::grammar::{RawClause, RawCondition, parse_definition};

/// A compiled plurality definition.
///
/// Maps an integer count to a zero-based category index: the index of the
/// first clause whose condition matches, or the catch-all index (one past
/// the last condition) when none does. Evaluation is total and
/// deterministic.
///
/// # Example
///
/// ```
/// use varia::PluralityDefinition;
///
/// let english = PluralityDefinition::compile("(1)(*)").unwrap();
/// assert_eq!(english.category_index(1), 0);
/// assert_eq!(english.category_index(5), 1);
///
/// let russian =
///     PluralityDefinition::compile("(%10:1;!~11$)(%10:2→4;!~1[2-4]$)(*)").unwrap();
/// assert_eq!(russian.category_index(21), 0);
/// assert_eq!(russian.category_index(3), 1);
/// assert_eq!(russian.category_index(12), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluralityDefinition {
    source: String,
    clauses: Vec<Clause>,
}

#[derive(Debug, Clone)]
struct Clause {
    modulus: Option<u64>,
    values: Vec<RangeInclusive<u64>>,
    guard: Option<Guard>,
}

#[derive(Debug, Clone)]
struct Guard {
    negated: bool,
    pattern: Regex,
}

impl PluralityDefinition {
    /// Compile a definition string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not follow the clause grammar, a
    /// `(*)` clause is not last, a range is empty, a modulus is zero, or a
    /// guard is not a valid regular expression.
    pub fn compile(definition: &str) -> Result<Self, PluralityError> {
        let raw = parse_definition(definition).map_err(|(position, message)| {
            PluralityError::Syntax {
                definition: definition.to_string(),
                position,
                message,
            }
        })?;

        let mut clauses = Vec::with_capacity(raw.len());
        for (index, clause) in raw.iter().enumerate() {
            match clause {
                RawClause::CatchAll if index + 1 != raw.len() => {
                    return Err(PluralityError::CatchAllNotLast {
                        definition: definition.to_string(),
                    });
                }
                RawClause::CatchAll => {}
                RawClause::Condition(condition) => {
                    clauses.push(Clause::compile(condition, definition)?);
                }
            }
        }

        Ok(Self {
            source: definition.to_string(),
            clauses,
        })
    }

    /// Zero-based category index for `count`.
    pub fn category_index(&self, count: i64) -> usize {
        let magnitude = count.unsigned_abs();
        self.clauses
            .iter()
            .position(|clause| clause.matches(magnitude))
            .unwrap_or(self.clauses.len())
    }

    /// Number of categories, including the catch-all.
    pub fn category_count(&self) -> usize {
        self.clauses.len() + 1
    }

    /// Index returned when no clause matches.
    pub fn catch_all_index(&self) -> usize {
        self.clauses.len()
    }

    /// The definition string this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Clause {
    fn compile(raw: &RawCondition, definition: &str) -> Result<Self, PluralityError> {
        if raw.modulus == Some(0) {
            return Err(PluralityError::ZeroModulus {
                definition: definition.to_string(),
            });
        }

        let mut values = Vec::with_capacity(raw.items.len());
        for &(low, high) in &raw.items {
            if low > high {
                return Err(PluralityError::EmptyRange {
                    definition: definition.to_string(),
                    low,
                    high,
                });
            }
            values.push(low..=high);
        }

        let guard = match &raw.guard {
            Some(guard) => {
                let pattern =
                    Regex::new(&guard.pattern).map_err(|e| PluralityError::InvalidGuard {
                        pattern: guard.pattern.clone(),
                        message: e.to_string(),
                    })?;
                Some(Guard {
                    negated: guard.negated,
                    pattern,
                })
            }
            None => None,
        };

        Ok(Self {
            modulus: raw.modulus,
            values,
            guard,
        })
    }

    fn matches(&self, magnitude: u64) -> bool {
        let reduced = match self.modulus {
            Some(modulus) => magnitude % modulus,
            None => magnitude,
        };
        if !self.values.iter().any(|range| range.contains(&reduced)) {
            return false;
        }
        match &self.guard {
            Some(guard) => guard.pattern.is_match(&magnitude.to_string()) != guard.negated,
            None => true,
        }
    }
}

impl Default for PluralityDefinition {
    /// `(1)(*)`: category 0 for one, 1 for everything else.
    fn default() -> Self {
        Self {
            source: "(1)(*)".to_string(),
            clauses: vec![Clause {
                modulus: None,
                values: vec![1..=1],
                guard: None,
            }],
        }
    }
}

impl PartialEq for PluralityDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for PluralityDefinition {}

impl FromStr for PluralityDefinition {
    type Err = PluralityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl TryFrom<String> for PluralityDefinition {
    type Error = PluralityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::compile(&value)
    }
}

impl From<PluralityDefinition> for String {
    fn from(definition: PluralityDefinition) -> Self {
        definition.source
    }
}

impl Display for PluralityDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.source)
    }
}
