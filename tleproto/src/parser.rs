//! Parser for TLE set text files (i.e. SAT_TLE.txt).
//!
//! Each entry is a name line followed by the two element lines. Entries may be
//! separated by a single blank line. The element lines are not interpreted.

use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::{line_ending, not_line_ending},
    combinator::{eof, opt, verify},
    error::ErrorKind,
    multi::{fold_many0, many0_count},
};
use tletypes::prelude::*;
use tracing::debug;

pub type Result<I, O, E = ParseError<I>> = std::result::Result<(I, O), nom::Err<E>>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ParseError<I> {
    #[error("Missing TLE line")]
    MissingLine,
    #[error("Parse error")]
    Nom(I, ErrorKind),
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TleSetError {
    #[error("Unparsed TLE set content at line {line}: '{content}'")]
    TrailingInput { line: usize, content: String },
    #[error("Malformed TLE set: {0}")]
    Malformed(String),
}

/// Parse as many TLE entries as possible, in file order.
///
/// Returns the remaining unparsed input alongside the entries.
pub fn parse_unstructured_tle_set(set: &str) -> Result<&str, Vec<UnstructuredTle>> {
    let (s, tle_set) = fold_many0(
        tle,
        Vec::new,
        |mut tle_set: Vec<UnstructuredTle>, tle| {
            tle_set.push(tle);
            tle_set
        },
    )(set)?;
    Ok((s, tle_set))
}

/// Parse a whole TLE set file. Anything left over other than whitespace is an error.
pub fn parse_tle_set(set: &str) -> std::result::Result<Vec<UnstructuredTle>, TleSetError> {
    let (rest, tle_set) =
        parse_unstructured_tle_set(set).map_err(|e| TleSetError::Malformed(e.to_string()))?;

    if !rest.trim().is_empty() {
        let consumed = &set[..set.len() - rest.len()];
        let skipped = rest.len() - rest.trim_start().len();
        let line = consumed.lines().count() + rest[..skipped].matches('\n').count() + 1;
        let content = rest.trim_start().lines().next().unwrap_or_default().to_owned();
        return Err(TleSetError::TrailingInput { line, content });
    }

    debug!(entries = tle_set.len(), "Parsed TLE set");
    Ok(tle_set)
}

fn tle(s: &str) -> Result<&str, UnstructuredTle> {
    let (s, _) = many0_count(blank_line)(s)?;
    let (s, name) = verify(not_line_ending, |n: &str| !n.trim().is_empty())(s)?;
    let (s, _) = line_ending(s)?;
    let (s, line1) = element_line(s)?;
    let (s, _) = line_ending(s)?;
    let (s, line2) = element_line(s)?;
    let (s, _) = line_end(s)?;
    let (s, _) = opt(line_ending)(s)?;
    Ok((
        s,
        UnstructuredTle {
            satellite_name: name.trim_end().to_string(),
            line1: line1.trim_end().to_string(),
            line2: line2.trim_end().to_string(),
        },
    ))
}

fn element_line(s: &str) -> Result<&str, &str> {
    match verify(not_line_ending, |l: &str| !l.trim().is_empty())(s) {
        Ok(r) => Ok(r),
        Err(nom::Err::Error(_)) => Err(nom::Err::Error(ParseError::MissingLine)),
        Err(e) => Err(e),
    }
}

/// The last element line of a file may not be newline terminated
fn line_end(s: &str) -> Result<&str, &str> {
    alt((line_ending, eof))(s)
}

fn blank_line(s: &str) -> Result<&str, &str> {
    let (s, _) = take_while(|c: char| c == ' ' || c == '\t')(s)?;
    line_ending(s)
}

impl<I> nom::error::ParseError<I> for ParseError<I> {
    fn from_error_kind(s: I, kind: ErrorKind) -> Self {
        ParseError::Nom(s, kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}
