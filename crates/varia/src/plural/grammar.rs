//! Plurality definition grammar using winnow.
//!
//! ```text
//! definition := clause+
//! clause     := "(" ( "*" | condition ) ")"
//! condition  := [ "%" modulus ":" ] item ( "," item )* [ ";" guard ]
//! item       := integer [ ( "→" | "->" | ".." ) integer ]
//! guard      := ( "~" | "!~" ) regex
//! ```

use winnow::ascii::dec_uint;
use winnow::combinator::{alt, delimited, opt, preceded, repeat, separated, terminated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// A clause as written, before validation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawClause {
    CatchAll,
    Condition(RawCondition),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawCondition {
    pub modulus: Option<u64>,
    pub items: Vec<(u64, u64)>,
    pub guard: Option<RawGuard>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawGuard {
    pub negated: bool,
    pub pattern: String,
}

/// Parse a definition string into raw clauses.
///
/// On failure returns the byte offset where parsing stopped and a message.
pub(crate) fn parse_definition(source: &str) -> Result<Vec<RawClause>, (usize, String)> {
    let mut remaining = source;
    match definition(&mut remaining) {
        Ok(clauses) if remaining.is_empty() => Ok(clauses),
        Ok(_) => Err((
            source.len() - remaining.len(),
            format!(
                "unexpected character: '{}'",
                remaining.chars().next().unwrap_or('?')
            ),
        )),
        Err(e) => Err((source.len() - remaining.len(), format!("parse error: {e}"))),
    }
}

fn definition(input: &mut &str) -> ModalResult<Vec<RawClause>> {
    let clauses = repeat(1.., preceded(ws, clause)).parse_next(input)?;
    ws(input)?;
    Ok(clauses)
}

/// Parse one parenthesized clause.
fn clause(input: &mut &str) -> ModalResult<RawClause> {
    delimited(('(', ws), clause_body, (ws, ')')).parse_next(input)
}

fn clause_body(input: &mut &str) -> ModalResult<RawClause> {
    alt((
        '*'.value(RawClause::CatchAll),
        condition.map(RawClause::Condition),
    ))
    .parse_next(input)
}

fn condition(input: &mut &str) -> ModalResult<RawCondition> {
    let modulus = opt(modulus).parse_next(input)?;
    let items: Vec<(u64, u64)> = separated(1.., item, (ws, ',', ws)).parse_next(input)?;
    let guard = opt(preceded((ws, ';', ws), guard)).parse_next(input)?;
    Ok(RawCondition {
        modulus,
        items,
        guard,
    })
}

/// Parse a `%10:` prefix.
fn modulus(input: &mut &str) -> ModalResult<u64> {
    preceded(('%', ws), terminated(number, (ws, ':', ws))).parse_next(input)
}

/// Parse a single value or an inclusive range.
fn item(input: &mut &str) -> ModalResult<(u64, u64)> {
    (number, opt(preceded((ws, range_arrow, ws), number)))
        .map(|(low, high)| (low, high.unwrap_or(low)))
        .parse_next(input)
}

fn range_arrow(input: &mut &str) -> ModalResult<()> {
    alt(("→", "->", "..")).void().parse_next(input)
}

fn guard(input: &mut &str) -> ModalResult<RawGuard> {
    (alt(("!~".value(true), "~".value(false))), guard_pattern)
        .map(|(negated, pattern)| RawGuard {
            negated,
            pattern: pattern.to_string(),
        })
        .parse_next(input)
}

/// Take a regex up to the clause's closing parenthesis.
///
/// Parentheses inside the pattern must balance; `\)` is taken literally.
fn guard_pattern<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    let mut depth = 0usize;
    let mut escaped = false;
    let mut end = input.len();
    for (index, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '(' => depth += 1,
            ')' if depth == 0 => {
                end = index;
                break;
            }
            ')' => depth -= 1,
            _ => {}
        }
    }
    let pattern = input[..end].trim_end();
    if pattern.is_empty() {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    *input = &input[pattern.len()..];
    Ok(pattern)
}

fn number(input: &mut &str) -> ModalResult<u64> {
    dec_uint.parse_next(input)
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_whitespace())
        .void()
        .parse_next(input)
}
