//! Nested-field path grammar used by the bundled codec.
//!
//! Supported segments:
//! - `[n]`       one-based array position
//! - `.name`     map key (identifier characters only)
//! - `["name"]`  quoted map key (`'` quotes are accepted too)
//! - `[*]`       every array element (multikey marker)
//!
//! A leading identifier without a dot is accepted (`a.b`).

use crate::value::Value;
use std::fmt;
use thiserror::Error as ThisError;

/// Textual fan-out marker.
pub const MULTIKEY_MARKER: &str = "[*]";

/// Whether a path selects more than one value per tuple.
///
/// Works on raw text so it can run before the grammar is checked; an
/// invalid path may be reported either way.
#[must_use]
pub fn is_multikey(path: &str) -> bool {
    path.contains(MULTIKEY_MARKER)
}

///
/// PathError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("invalid JSON path '{path}' at position {position}: {reason}")]
pub struct PathError {
    pub path: String,
    pub position: usize,
    pub reason: &'static str,
}

///
/// PathSegment
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathSegment {
    /// One-based array position.
    Index(u32),
    Key(String),
    Any,
}

///
/// FieldPath
///
/// Parsed, non-empty path into a nested field value.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Result<Self, PathError> {
        Parser::new(path).parse()
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[must_use]
    pub fn is_multikey(&self) -> bool {
        self.segments.contains(&PathSegment::Any)
    }

    /// Follow the path from `root`. Returns `None` when any step is absent.
    ///
    /// Multikey segments never resolve to a single value.
    #[must_use]
    pub fn resolve<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        self.segments
            .iter()
            .try_fold(root, |current, segment| match segment {
                PathSegment::Index(n) => current.get_index(usize::try_from(*n).ok()? - 1),
                PathSegment::Key(key) => current.get_key(key),
                PathSegment::Any => None,
            })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                PathSegment::Index(n) => write!(f, "[{n}]")?,
                PathSegment::Key(key) => write!(f, "[\"{key}\"]")?,
                PathSegment::Any => f.write_str(MULTIKEY_MARKER)?,
            }
        }

        Ok(())
    }
}

///
/// Parser
///

struct Parser<'a> {
    path: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    const fn new(path: &'a str) -> Self {
        Self {
            path,
            bytes: path.as_bytes(),
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<FieldPath, PathError> {
        if self.bytes.is_empty() {
            return Err(self.error("path must not be empty"));
        }

        let mut segments = Vec::new();
        if self.peek().is_some_and(is_ident_start) {
            segments.push(PathSegment::Key(self.ident()?));
        }

        while let Some(byte) = self.peek() {
            let segment = match byte {
                b'.' => {
                    self.pos += 1;
                    PathSegment::Key(self.ident()?)
                }
                b'[' => {
                    self.pos += 1;
                    self.bracket()?
                }
                _ => return Err(self.error("expected '.' or '['")),
            };
            segments.push(segment);
        }

        Ok(FieldPath { segments })
    }

    fn bracket(&mut self) -> Result<PathSegment, PathError> {
        let segment = match self.peek() {
            Some(b'*') => {
                self.pos += 1;
                PathSegment::Any
            }
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|b| b != quote) {
                    self.pos += 1;
                }
                if self.peek().is_none() {
                    return Err(self.error("unterminated quoted key"));
                }
                let key = &self.path[start..self.pos];
                self.pos += 1;
                if key.is_empty() {
                    return Err(self.error("empty key"));
                }
                PathSegment::Key(key.to_string())
            }
            Some(b'0'..=b'9') => {
                let start = self.pos;
                while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                    self.pos += 1;
                }
                let index: u32 = self.path[start..self.pos]
                    .parse()
                    .map_err(|_| self.error("array index is too large"))?;
                if index == 0 {
                    return Err(self.error("array index is one-based"));
                }
                PathSegment::Index(index)
            }
            _ => return Err(self.error("expected index, quoted key or '*'")),
        };

        if self.peek() != Some(b']') {
            return Err(self.error("expected ']'"));
        }
        self.pos += 1;

        Ok(segment)
    }

    fn ident(&mut self) -> Result<String, PathError> {
        if !self.peek().is_some_and(is_ident_start) {
            return Err(self.error("expected identifier"));
        }
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.pos += 1;
        }

        Ok(self.path[start..self.pos].to_string())
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn error(&self, reason: &'static str) -> PathError {
        PathError {
            path: self.path.to_string(),
            position: self.pos + 1,
            reason,
        }
    }
}

const fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_segments() {
        let path = FieldPath::parse("a.b[2][\"c d\"]").expect("path should parse");

        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("a".to_string()),
                PathSegment::Key("b".to_string()),
                PathSegment::Index(2),
                PathSegment::Key("c d".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_malformed_paths() {
        for raw in ["", "[", "[0]", "[1", "..a", "[\"a]", "a b", "[x]", "[1]x"] {
            assert!(FieldPath::parse(raw).is_err(), "path {raw:?} should fail");
        }
    }

    #[test]
    fn multikey_marker_is_detected_textually_and_structurally() {
        assert!(is_multikey("[1][*]"));
        assert!(!is_multikey("[1][2]"));

        let path = FieldPath::parse("[1][*]").expect("path should parse");
        assert!(path.is_multikey());
    }

    #[test]
    fn resolves_nested_values() {
        let root = Value::Array(vec![
            Value::Uint(7),
            Value::Map(vec![(Value::from("name"), Value::from("ann"))]),
        ]);

        let index = FieldPath::parse("[1]").expect("path should parse");
        assert_eq!(index.resolve(&root), Some(&Value::Uint(7)));

        let key = FieldPath::parse("[2].name").expect("path should parse");
        assert_eq!(key.resolve(&root), Some(&Value::from("ann")));

        let missing = FieldPath::parse("[3]").expect("path should parse");
        assert_eq!(missing.resolve(&root), None);
    }
}
