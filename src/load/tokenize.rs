// src/load/tokenize.rs

use std::{
    io::{self, BufRead},
    iter::FusedIterator,
};

/// Lazy split of one line on an exact delimiter string.
///
/// Each `Tokens` owns its own cursor, so two lines can be walked side by side.
/// Once exhausted it stays exhausted; tokenize the line again to start over.
/// A trailing delimiter yields a final empty token.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: Option<&'a str>,
    delimiter: &'a str,
}

impl<'a> Tokens<'a> {
    pub fn new(line: &'a str, delimiter: &'a str) -> Self {
        Self {
            rest: (!line.is_empty()).then_some(line),
            delimiter,
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        if self.delimiter.is_empty() {
            self.rest = None;
            return Some(rest);
        }
        match rest.find(self.delimiter) {
            Some(idx) => {
                self.rest = Some(&rest[idx + self.delimiter.len()..]);
                Some(&rest[..idx])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

impl FusedIterator for Tokens<'_> {}

pub fn tokenize<'a>(line: &'a str, delimiter: &'a str) -> Tokens<'a> {
    Tokens::new(line, delimiter)
}

/// Tokens of a data row, minus the empty token a trailing delimiter leaves behind.
pub fn data_fields<'a>(line: &'a str, delimiter: &'a str) -> Vec<&'a str> {
    let mut fields: Vec<&str> = tokenize(line, delimiter).collect();
    if fields.len() > 1 && fields.last().is_some_and(|f| f.trim().is_empty()) {
        fields.pop();
    }
    fields
}

/// Drop the `\n` / `\r\n` a line reader leaves on.
pub fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Next line of `reader` with its terminator stripped, `None` at end of input.
///
/// Lines are read as bytes; anything that isn't UTF-8 becomes U+FFFD, which
/// is neither alphanumeric nor part of a number.
pub fn next_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    let text = String::from_utf8_lossy(buf);
    Ok(Some(strip_line_ending(&text).to_string()))
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
