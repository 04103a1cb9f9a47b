//! Confirmation-pass line format.
//!
//! Each pending change is shown as `("original", "edited")`. Strings are double-quoted;
//! inside them `\"` and `\\` are the only escapes. Blank lines and lines starting
//! with `#` are ignored, so deleting a line drops that change.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::diff::ChangePair;
use crate::errors::EdmvError;

/// Render one change for the review buffer.
pub fn format_review_line(pair: &ChangePair) -> String {
    format!("({}, {})", quote(&pair.original), quote(&pair.edited))
}

/// Parse a whole review buffer. `line` numbers in errors are 1-based.
pub fn parse_review<S: AsRef<str>>(lines: &[S]) -> Result<Vec<ChangePair>, EdmvError> {
    let mut out = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if let Some(pair) = parse_review_line(idx + 1, line.as_ref())? {
            out.push(pair);
        }
    }
    Ok(out)
}

/// Parse a single review line; `Ok(None)` for blank and comment lines.
pub fn parse_review_line(line_no: usize, text: &str) -> Result<Option<ChangePair>, EdmvError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let malformed = |reason: &str| EdmvError::MalformedChangeLine {
        line: line_no,
        text: text.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = trimmed.char_indices().peekable();
    consume(&mut chars, '(').map_err(|r| malformed(&r))?;
    skip_ws(&mut chars);
    let original = read_quoted(&mut chars).map_err(|r| malformed(&r))?;
    skip_ws(&mut chars);
    consume(&mut chars, ',').map_err(|r| malformed(&r))?;
    skip_ws(&mut chars);
    let edited = read_quoted(&mut chars).map_err(|r| malformed(&r))?;
    skip_ws(&mut chars);
    consume(&mut chars, ')').map_err(|r| malformed(&r))?;
    if let Some((pos, c)) = chars.next() {
        return Err(malformed(&format!(
            "unexpected {c:?} after closing ')' at column {}",
            pos + 1
        )));
    }

    if original.is_empty() {
        return Err(malformed("original path is empty"));
    }
    Ok(Some(ChangePair { original, edited }))
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

type Cursor<'a> = Peekable<CharIndices<'a>>;

fn skip_ws(chars: &mut Cursor<'_>) {
    while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
}

fn consume(chars: &mut Cursor<'_>, want: char) -> Result<(), String> {
    match chars.next() {
        Some((_, c)) if c == want => Ok(()),
        Some((pos, c)) => Err(format!("expected {want:?} at column {}, found {c:?}", pos + 1)),
        None => Err(format!("expected {want:?}, found end of line")),
    }
}

fn read_quoted(chars: &mut Cursor<'_>) -> Result<String, String> {
    consume(chars, '"')?;
    let mut out = String::new();
    loop {
        match chars.next() {
            Some((_, '"')) => return Ok(out),
            Some((pos, '\\')) => match chars.next() {
                Some((_, c @ ('"' | '\\'))) => out.push(c),
                Some((_, c)) => {
                    return Err(format!("unknown escape \\{c} at column {}", pos + 1));
                }
                None => return Err("unterminated escape".to_string()),
            },
            Some((_, c)) => out.push(c),
            None => return Err("unterminated string".to_string()),
        }
    }
}
