//! Line grammar for environment files using `nom`.
//!
//! Each physical line is one of: blank, a `#` comment, or an assignment
//! `[export ]KEY=VALUE`. Values may be double quoted (with `\n`, `\t`,
//! `\\` and `\"` escapes), single quoted (taken literally) or bare. Bare
//! values are taken up to the end of the line with surrounding whitespace
//! removed; `#` inside a bare value is kept.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, satisfy, space0, space1},
    combinator::{cut, opt, recognize, rest, value},
    sequence::{pair, preceded, terminated},
};

/// One decoded line of an environment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Empty or whitespace-only line.
    Blank,
    /// `#` comment line.
    Comment,
    /// `KEY=VALUE` assignment.
    Assignment {
        /// Variable name.
        key: String,
        /// Decoded value.
        value: String,
    },
}

const fn is_key_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

const fn is_key_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-'
}

/// Parses a variable name.
fn key(input: &str) -> IResult<&str, &str> {
    recognize(pair(satisfy(is_key_start), take_while(is_key_continue))).parse(input)
}

/// Parses a double-quoted value with escape support.
fn double_quoted(input: &str) -> IResult<&str, String> {
    let (input, _) = char('"').parse(input)?;
    let mut result = String::new();
    let mut chars = input.char_indices();
    loop {
        match chars.next() {
            Some((idx, '"')) => return Ok((&input[idx + 1..], result)),
            Some((_, '\\')) => match chars.next() {
                Some((_, 'n')) => result.push('\n'),
                Some((_, 't')) => result.push('\t'),
                Some((_, 'r')) => result.push('\r'),
                Some((_, '\\')) => result.push('\\'),
                Some((_, '"')) => result.push('"'),
                Some((_, c)) => {
                    result.push('\\');
                    result.push(c);
                }
                None => {
                    return Err(nom::Err::Failure(nom::error::Error::new(
                        input,
                        nom::error::ErrorKind::Char,
                    )));
                }
            },
            Some((_, c)) => result.push(c),
            None => {
                return Err(nom::Err::Failure(nom::error::Error::new(
                    input,
                    nom::error::ErrorKind::Char,
                )));
            }
        }
    }
}

/// Parses a single-quoted value. No escapes are recognised.
fn single_quoted(input: &str) -> IResult<&str, String> {
    let (input, raw) = preceded(
        char('\''),
        cut(terminated(take_while(|c: char| c != '\''), char('\''))),
    )
    .parse(input)?;
    Ok((input, raw.to_owned()))
}

/// A quoted value, optionally followed by whitespace and a comment.
fn quoted_value(input: &str) -> IResult<&str, String> {
    let (input, decoded) = alt((double_quoted, single_quoted)).parse(input)?;
    let (input, _) = (space0, opt(preceded(char('#'), rest))).parse(input)?;
    Ok((input, decoded))
}

fn bare_value(input: &str) -> IResult<&str, String> {
    let (input, raw) = rest.parse(input)?;
    Ok((input, raw.trim().to_owned()))
}

fn assignment(input: &str) -> IResult<&str, Line> {
    let (input, _) = opt(terminated(tag("export"), space1)).parse(input)?;
    let (input, name) = key(input)?;
    let (input, _) = (space0, char('='), space0).parse(input)?;
    let (input, decoded) = alt((quoted_value, bare_value)).parse(input)?;
    Ok((
        input,
        Line::Assignment {
            key: name.to_owned(),
            value: decoded,
        },
    ))
}

fn line(input: &str) -> IResult<&str, Line> {
    let (input, _) = space0.parse(input)?;
    if input.is_empty() {
        return Ok((input, Line::Blank));
    }
    alt((value(Line::Comment, preceded(char('#'), rest)), assignment)).parse(input)
}

/// Decodes one physical line.
///
/// # Errors
///
/// Returns a short description when the line is neither blank, a comment,
/// nor a well-formed assignment.
pub fn parse_line(input: &str) -> Result<Line, String> {
    match line(input) {
        Ok(("", parsed)) => Ok(parsed),
        Ok((trailing, _)) => Err(format!(
            "unexpected trailing characters: \"{}\"",
            trailing.chars().take(20).collect::<String>()
        )),
        Err(nom::Err::Failure(_)) => Err("unterminated quoted value".into()),
        Err(_) => Err(format!(
            "expected KEY=VALUE assignment, got \"{}\"",
            input.trim().chars().take(20).collect::<String>()
        )),
    }
}
