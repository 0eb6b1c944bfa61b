//! Case-insensitive, multi-value header collection and the header line
//! grammar used by the request parser.

use std::collections::HashMap;

use crate::http::error::{HeaderError, ParseError};

const CRLF: &[u8] = b"\r\n";

/// Punctuation allowed in a field name besides ASCII letters and digits.
const TOKEN_SPECIALS: &str = "!#$%&'*+-.^_`|~";

/// HTTP header fields keyed by lowercase name.
///
/// Setting a name that is already present appends the new value to the old
/// one separated by `", "`; [`Headers::replace`] overwrites instead. All
/// lookups ignore case.
///
/// # Example
///
/// ```
/// # use httpwire::http::headers::Headers;
/// let mut headers = Headers::new();
/// headers.set("Accept", "text/html");
/// headers.set("accept", "text/plain");
/// assert_eq!(headers.get("ACCEPT"), Some("text/html, text/plain"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    fields: HashMap<String, String>,
}

/// Outcome of feeding bytes to [`Headers::parse_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLine {
    /// No complete line yet. Nothing was consumed.
    Incomplete,
    /// One field was stored; `consumed` includes the trailing CRLF.
    Field { consumed: usize },
    /// The blank line ending the header section. Consumes the 2 CRLF bytes.
    End,
}

impl HeaderLine {
    /// Number of bytes this outcome consumed from the input.
    pub fn consumed(&self) -> usize {
        match self {
            HeaderLine::Incomplete => 0,
            HeaderLine::Field { consumed } => *consumed,
            HeaderLine::End => CRLF.len(),
        }
    }
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, joining it to any existing value with `", "`.
    pub fn set(&mut self, key: &str, value: &str) {
        self.fields
            .entry(key.to_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    /// Stores `value` under `key`, discarding whatever was there.
    pub fn replace(&mut self, key: &str, value: impl Into<String>) {
        self.fields.insert(key.to_lowercase(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(&key.to_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(&key.to_lowercase())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.fields.remove(&key.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(name, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parses a single header line from the front of `data`.
    ///
    /// Leading whitespace before the name and whitespace around the value
    /// are ignored, but whitespace between the name and the colon is
    /// rejected. The table is only modified when the whole line is valid.
    ///
    /// Values are stored as text: bytes that are not UTF-8 are replaced with
    /// U+FFFD, so such a value does not survive a parse and re-encode
    /// unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// # use httpwire::http::headers::{HeaderLine, Headers};
    /// let mut headers = Headers::new();
    /// let line = headers.parse_line(b"Host: localhost:42069\r\n\r\n").unwrap();
    /// assert_eq!(line, HeaderLine::Field { consumed: 23 });
    /// assert_eq!(headers.get("host"), Some("localhost:42069"));
    /// ```
    pub fn parse_line(&mut self, data: &[u8]) -> Result<HeaderLine, ParseError> {
        let Some(idx) = find_crlf(data) else {
            return Ok(HeaderLine::Incomplete);
        };

        if idx == 0 {
            return Ok(HeaderLine::End);
        }

        let line = &data[..idx];
        let colon = line
            .iter()
            .position(|&b| b == b':')
            .ok_or(HeaderError::MissingColon)?;
        let (name, value) = (&line[..colon], &line[colon + 1..]);

        if name.last().is_some_and(u8::is_ascii_whitespace) {
            let name = String::from_utf8_lossy(name.trim_ascii()).into_owned();
            return Err(HeaderError::SpaceBeforeColon(name).into());
        }

        let name = String::from_utf8_lossy(name.trim_ascii_start());
        validate_field_name(&name)?;

        let value = String::from_utf8_lossy(value.trim_ascii());
        self.set(&name, &value);

        Ok(HeaderLine::Field {
            consumed: idx + CRLF.len(),
        })
    }

    /// Serializes every field as `name: value\r\n` followed by a blank line.
    pub(crate) fn encode(&self, dst: &mut Vec<u8>) {
        for (name, value) in self.iter() {
            dst.extend_from_slice(name.as_bytes());
            dst.extend_from_slice(b": ");
            dst.extend_from_slice(value.as_bytes());
            dst.extend_from_slice(CRLF);
        }
        dst.extend_from_slice(CRLF);
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.set(k.as_ref(), v.as_ref());
        }
        headers
    }
}

pub(crate) fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == CRLF)
}

fn validate_field_name(name: &str) -> Result<(), HeaderError> {
    if name.is_empty() {
        return Err(HeaderError::EmptyName);
    }

    match name.chars().find(|&c| !is_token_char(c)) {
        Some(c) => Err(HeaderError::InvalidCharacter(c)),
        None => Ok(()),
    }
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || TOKEN_SPECIALS.contains(c)
}
