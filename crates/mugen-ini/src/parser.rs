//! Line-oriented INI scanner.
//!
//! Each line is trimmed and classified as a header, a key/value pair, a
//! comment, or noise. Noise and comments never produce errors; the only
//! fatal condition is a `[` header that is not closed on its own line.

use crate::document::{Document, Section};
use crate::error::{IniError, Result};

/// Origin label used in errors when the caller does not supply one.
const ANONYMOUS_ORIGIN: &str = "<text>";

/// Parses INI text into a [`Document`].
pub fn parse_str(text: &str) -> Result<Document> {
    parse_named(text, ANONYMOUS_ORIGIN)
}

/// Parses INI text, naming `origin` in any error raised.
pub fn parse_named(text: &str, origin: &str) -> Result<Document> {
    let mut scanner = Scanner::default();
    for (idx, line) in text.lines().enumerate() {
        scanner.feed(line, idx + 1, origin)?;
    }
    Ok(scanner.finish())
}

/// Outcome of splitting a body line.
#[derive(Debug, PartialEq, Eq)]
enum BodyLine<'a> {
    Pair { key: &'a str, value: &'a str },
    Comment,
    Noise,
}

/// Scan state threaded through one parse.
#[derive(Debug, Default)]
struct Scanner {
    current: Option<Section>,
    sections: Vec<Section>,
}

impl Scanner {
    fn feed(&mut self, raw: &str, line_no: usize, origin: &str) -> Result<()> {
        let line = raw.trim();
        if line.is_empty() {
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix('[') {
            self.flush();
            let Some(end) = rest.find(']') else {
                return Err(IniError::MalformedHeader {
                    origin: origin.to_string(),
                    line: line_no,
                    header: rest.to_string(),
                });
            };
            let position = self.sections.len();
            self.current = Some(Section::new(&rest[..end], position));
            return Ok(());
        }

        // Lines before the first header are ignored.
        let Some(section) = self.current.as_mut() else {
            return Ok(());
        };
        if let BodyLine::Pair { key, value } = split_body_line(line) {
            section.push(key.to_lowercase(), value.to_string());
        }
        Ok(())
    }

    fn flush(&mut self) {
        if let Some(section) = self.current.take() {
            self.sections.push(section);
        }
    }

    fn finish(mut self) -> Document {
        self.flush();
        Document::from_sections(self.sections)
    }
}

/// Splits a trimmed body line into key and value.
///
/// A `;` before any `=` makes the whole line a comment; a `;` after the
/// `=` truncates the value. Pairs with an empty key or value are noise.
fn split_body_line(line: &str) -> BodyLine<'_> {
    let Some(eq) = line.find(['=', ';']) else {
        return BodyLine::Noise;
    };
    if line.as_bytes()[eq] == b';' {
        return BodyLine::Comment;
    }

    let key = line[..eq].trim();
    let rest = &line[eq + 1..];
    let value = match rest.find(';') {
        Some(semi) => &rest[..semi],
        None => rest,
    }
    .trim();

    if key.is_empty() || value.is_empty() {
        BodyLine::Noise
    } else {
        BodyLine::Pair { key, value }
    }
}
