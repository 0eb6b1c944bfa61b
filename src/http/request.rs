use crate::http::headers::Headers;

/// The first line of an HTTP request.
///
/// Only produced by the parser, so every instance has an all-uppercase
/// method, a target without spaces and version `"1.1"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: String,
    target: String,
    version: String,
}

impl RequestLine {
    pub(crate) fn new(method: &str, target: &str, version: &str) -> Self {
        Self {
            method: method.to_string(),
            target: target.to_string(),
            version: version.to_string(),
        }
    }

    /// The request method, e.g. `GET`.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request target exactly as sent, e.g. `/search?q=rust`.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The protocol version without the `HTTP/` prefix.
    pub fn version(&self) -> &str {
        &self.version
    }
}

/// A fully received HTTP request.
///
/// Built by [`RequestParser::finish`](crate::http::parser::RequestParser::finish)
/// once parsing reached `Done`; read-only from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    request_line: RequestLine,
    headers: Headers,
    body: Vec<u8>,
}

impl Request {
    pub(crate) fn new(request_line: RequestLine, headers: Headers, body: Vec<u8>) -> Self {
        Self {
            request_line,
            headers,
            body,
        }
    }

    pub fn request_line(&self) -> &RequestLine {
        &self.request_line
    }

    pub fn method(&self) -> &str {
        self.request_line.method()
    }

    pub fn target(&self) -> &str {
        self.request_line.target()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Retrieves a header value by name, ignoring case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
