//! Reader for the JavaScript search tables Doxygen writes under `html/search/`.
//!
//! A table file looks like
//!
//! ```text
//! var searchData=
//! [
//!   ['scale',['scale',['../classtvg_1_1Paint.html#a5c05...',1,'tvg::Paint']]],
//!   ['size',['size',['../a.html#a06',1,'tvg::Picture::size(float w, float h)'],
//!                   ['../a.html#af8',1,'tvg::Picture::size(float *w, float *h)']]]
//! ];
//! ```
//!
//! Only the subset of JavaScript the generator emits is accepted: an optional
//! `var name =` binding, nested array literals, quoted strings, numbers and
//! the `true`/`false`/`null` literals.

use std::path::Path;

use super::{RawRecord, RawTarget};
use crate::error::{IndexError, Result};

/// Generator tables nest four arrays deep (table, record, body, target).
const MAX_DEPTH: usize = 32;

/// A literal value from the table file.
#[derive(Debug, Clone, PartialEq)]
enum JsValue {
    Str(String),
    Number(f64),
    Bool(bool),
    Null,
    Array(Vec<JsValue>),
}

impl JsValue {
    fn into_string(self) -> Option<String> {
        match self {
            JsValue::Str(s) => Some(s),
            _ => None,
        }
    }

    fn truthy(&self) -> Option<bool> {
        match self {
            JsValue::Number(n) => Some(*n != 0.0),
            JsValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Parse a table file into raw records.
///
/// `path` is only used to label errors.
pub fn parse(source: &str, path: &Path) -> Result<Vec<RawRecord>> {
    let mut parser = Parser::new(source, path);
    let table = parser.parse_document()?;
    Ok(table.into_iter().map(record_from_value).collect())
}

/// Map one `['key', ['Label', [url, flag, scope], ...]]` literal to a record.
///
/// Anything that does not have the expected shape yields missing fields
/// rather than an error so that validation reports the record position.
fn record_from_value(value: JsValue) -> RawRecord {
    let mut parts = match value {
        JsValue::Array(parts) => parts.into_iter(),
        _ => return RawRecord::default(),
    };

    let key = parts.next().and_then(JsValue::into_string);
    let mut record = RawRecord {
        key,
        ..RawRecord::default()
    };

    if let Some(JsValue::Array(body)) = parts.next() {
        let mut body = body.into_iter();
        record.label = body.next().and_then(JsValue::into_string);
        record.targets = body.map(target_from_value).collect();
    }

    record
}

fn target_from_value(value: JsValue) -> RawTarget {
    let JsValue::Array(fields) = value else {
        return RawTarget::default();
    };

    let mut fields = fields.into_iter();
    let url = fields.next().and_then(JsValue::into_string);
    let open_in_parent = fields.next().as_ref().and_then(JsValue::truthy);
    let scope = fields.next().and_then(JsValue::into_string);

    RawTarget {
        url,
        scope,
        open_in_parent,
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
    path: &'a Path,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, path: &'a Path) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
            path,
        }
    }

    fn parse_document(&mut self) -> Result<Vec<JsValue>> {
        self.skip_trivia()?;

        if let Some(keyword) = ["var", "let", "const"]
            .into_iter()
            .find(|kw| self.at_keyword(kw))
        {
            self.pos += keyword.len();
            self.skip_trivia()?;
            let name = self.identifier();
            if name.is_empty() {
                return Err(self.error("expected variable name"));
            }
            self.skip_trivia()?;
            self.expect('=')?;
            self.skip_trivia()?;
        }

        let table = match self.peek() {
            Some('[') => self.parse_array()?,
            _ => return Err(self.error("expected '[' to start the search table")),
        };

        self.skip_trivia()?;
        if self.peek() == Some(';') {
            self.bump();
            self.skip_trivia()?;
        }
        if self.peek().is_some() {
            return Err(self.error("unexpected trailing input"));
        }

        Ok(table)
    }

    fn parse_value(&mut self) -> Result<JsValue> {
        match self.peek() {
            Some('[') => Ok(JsValue::Array(self.parse_array()?)),
            Some(quote @ ('\'' | '"')) => Ok(JsValue::Str(self.parse_string(quote)?)),
            Some(c) if c == '-' || c.is_ascii_digit() => self.parse_number(),
            Some(c) if c.is_alphabetic() => {
                let start = self.pos;
                match self.identifier() {
                    "true" => Ok(JsValue::Bool(true)),
                    "false" => Ok(JsValue::Bool(false)),
                    "null" | "undefined" => Ok(JsValue::Null),
                    other => {
                        let message = format!("unexpected identifier '{}'", other);
                        self.pos = start;
                        Err(self.error(message))
                    }
                }
            }
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_array(&mut self) -> Result<Vec<JsValue>> {
        if self.depth == MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }

        self.depth += 1;
        let items = self.parse_array_items();
        self.depth -= 1;
        items
    }

    fn parse_array_items(&mut self) -> Result<Vec<JsValue>> {
        self.expect('[')?;
        let mut items = Vec::new();

        loop {
            self.skip_trivia()?;
            if self.peek() == Some(']') {
                self.bump();
                return Ok(items);
            }

            items.push(self.parse_value()?);
            self.skip_trivia()?;

            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(']') => {
                    self.bump();
                    return Ok(items);
                }
                Some(_) => return Err(self.error("expected ',' or ']'")),
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn parse_string(&mut self, quote: char) -> Result<String> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();

        loop {
            match self.bump() {
                None | Some('\n') => {
                    self.pos = start;
                    return Err(self.error("unterminated string"));
                }
                Some(c) if c == quote => return Ok(out),
                Some('\\') => {
                    let escaped = match self.bump() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some('0') => '\0',
                        Some('u') => self.unicode_escape()?,
                        // \\, \', \", \/ and unknown escapes stand for the character itself
                        Some(c) => c,
                        None => return Err(self.error("unterminated escape")),
                    };
                    out.push(escaped);
                }
                Some(c) => out.push(c),
            }
        }
    }

    /// Decode the digits after `\u`, joining a UTF-16 surrogate pair
    /// written as two consecutive escapes. Lone surrogates become U+FFFD.
    fn unicode_escape(&mut self) -> Result<char> {
        let code = self
            .hex4(self.pos)
            .ok_or_else(|| self.error("invalid \\u escape"))?;
        self.pos += 4;

        if (0xD800..0xDC00).contains(&code) && self.src[self.pos..].starts_with("\\u") {
            if let Some(low @ 0xDC00..=0xDFFF) = self.hex4(self.pos + 2) {
                self.pos += 6;
                let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
        }

        Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn hex4(&self, at: usize) -> Option<u32> {
        self.src
            .get(at..at + 4)
            .filter(|d| d.chars().all(|c| c.is_ascii_hexdigit()))
            .and_then(|d| u32::from_str_radix(d, 16).ok())
    }

    fn parse_number(&mut self) -> Result<JsValue> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                self.bump();
            } else {
                break;
            }
        }

        let src = self.src;
        match src[start..self.pos].parse::<f64>() {
            Ok(n) => Ok(JsValue::Number(n)),
            Err(_) => {
                self.pos = start;
                Err(self.error("invalid number"))
            }
        }
    }

    fn identifier(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' {
                self.bump();
            } else {
                break;
            }
        }
        let src = self.src;
        &src[start..self.pos]
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        let rest = &self.src[self.pos..];
        rest.starts_with(keyword)
            && rest[keyword.len()..]
                .chars()
                .next()
                .is_some_and(char::is_whitespace)
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            let rest = &self.src[self.pos..];
            if rest.starts_with("//") {
                self.pos += rest.find('\n').unwrap_or(rest.len());
            } else if rest.starts_with("/*") {
                match rest[2..].find("*/") {
                    Some(end) => self.pos += end + 4,
                    None => return Err(self.error("unterminated comment")),
                }
            } else if rest.starts_with(|c: char| c.is_whitespace()) {
                self.bump();
            } else {
                return Ok(());
            }
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        if self.peek() == Some(expected) {
            self.bump();
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", expected)))
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Build a parse error at the current position (1-based line and column).
    fn error(&self, message: impl Into<String>) -> IndexError {
        let consumed = &self.src[..self.pos];
        let line = consumed.matches('\n').count() + 1;
        let column = consumed
            .rfind('\n')
            .map_or(consumed, |nl| &consumed[nl + 1..])
            .chars()
            .count()
            + 1;

        IndexError::Parse {
            path: self.path.to_path_buf(),
            line,
            column,
            message: message.into(),
        }
    }
}
