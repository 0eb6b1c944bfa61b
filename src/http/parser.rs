use tokio::io::AsyncRead;

use crate::http::buffer::ReadBuffer;
use crate::http::error::{ContentLengthError, ParseError, RequestLineError};
use crate::http::headers::{find_crlf, HeaderLine, Headers};
use crate::http::request::{Request, RequestLine};

const CRLF_LEN: usize = 2;
const SUPPORTED_VERSION: &str = "HTTP/1.1";

/// Progress of a [`RequestParser`]. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Waiting for the request line.
    Initialized,
    /// Request line done, reading header lines.
    ParsingHeaders,
    /// Header section done, reading up to Content-Length body bytes.
    ParsingBody,
    /// A complete request is available.
    Done,
    /// A previous step failed; the parser accepts no more input.
    Failed,
}

/// Incremental HTTP/1.1 request parser.
///
/// The parser owns no buffer. The caller keeps the bytes, offers the
/// unconsumed window to [`feed`](Self::feed) after every read, and drops as
/// many bytes from the front as `feed` reports consumed.
#[derive(Debug)]
pub struct RequestParser {
    state: ParseState,
    request_line: Option<RequestLine>,
    headers: Headers,
    body: Vec<u8>,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::Initialized,
            request_line: None,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ParseState::Done
    }

    pub fn request_line(&self) -> Option<&RequestLine> {
        self.request_line.as_ref()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Parses as much of `data` as possible and returns how many bytes were
    /// consumed.
    ///
    /// `Ok(0)` means more input is needed. Any error is terminal: the parser
    /// moves to [`ParseState::Failed`] and rejects further input.
    pub fn feed(&mut self, data: &[u8]) -> Result<usize, ParseError> {
        match self.state {
            ParseState::Done => return Err(ParseError::AlreadyDone),
            ParseState::Failed => return Err(ParseError::Failed),
            _ => {}
        }

        let mut total = 0;
        while self.state != ParseState::Done {
            let n = match self.step(&data[total..]) {
                Ok(n) => n,
                Err(e) => {
                    self.state = ParseState::Failed;
                    return Err(e);
                }
            };
            if n == 0 {
                break;
            }
            total += n;
        }

        Ok(total)
    }

    /// Turns a finished parser into its request.
    pub fn finish(self) -> Result<Request, ParseError> {
        match (self.state, self.request_line) {
            (ParseState::Done, Some(line)) => Ok(Request::new(line, self.headers, self.body)),
            (state, _) => Err(ParseError::IncompleteRequest { state }),
        }
    }

    fn step(&mut self, data: &[u8]) -> Result<usize, ParseError> {
        match self.state {
            ParseState::Initialized => match parse_request_line(data)? {
                Some((line, consumed)) => {
                    self.request_line = Some(line);
                    self.state = ParseState::ParsingHeaders;
                    Ok(consumed)
                }
                None => Ok(0),
            },
            ParseState::ParsingHeaders => {
                let line = self.headers.parse_line(data)?;
                if line == HeaderLine::End {
                    self.state = ParseState::ParsingBody;
                }
                Ok(line.consumed())
            }
            ParseState::ParsingBody => self.parse_body(data),
            ParseState::Done => Err(ParseError::AlreadyDone),
            ParseState::Failed => Err(ParseError::Failed),
        }
    }

    /// Body bytes are taken greedily: everything offered belongs to the body.
    fn parse_body(&mut self, data: &[u8]) -> Result<usize, ParseError> {
        let Some(value) = self.headers.get("content-length") else {
            // Without a declared length the body is empty; trailing bytes
            // are left unconsumed.
            self.state = ParseState::Done;
            return Ok(0);
        };
        let declared = parse_content_length(value)?;

        let received = self.body.len() + data.len();
        if received > declared {
            return Err(ContentLengthError::Exceeded { declared, received }.into());
        }

        self.body.extend_from_slice(data);
        if received == declared {
            self.state = ParseState::Done;
        }

        Ok(data.len())
    }
}

/// Parses `METHOD SP TARGET SP HTTP/1.1 CRLF` from the front of `data`.
///
/// Returns `None` until a full line is available. The target is not
/// validated; bytes that are not UTF-8 are replaced with U+FFFD.
pub fn parse_request_line(data: &[u8]) -> Result<Option<(RequestLine, usize)>, ParseError> {
    let Some(idx) = find_crlf(data) else {
        return Ok(None);
    };

    let parts: Vec<&[u8]> = data[..idx].split(|&b| b == b' ').collect();
    let [method, target, version] = parts.as_slice() else {
        return Err(RequestLineError::TokenCount(parts.len()).into());
    };

    let lossy = |bytes: &[u8]| String::from_utf8_lossy(bytes).into_owned();

    if method.is_empty() || !method.iter().all(u8::is_ascii_uppercase) {
        return Err(RequestLineError::InvalidMethod(lossy(*method)).into());
    }

    if *version != SUPPORTED_VERSION.as_bytes() {
        return Err(RequestLineError::UnsupportedVersion(lossy(*version)).into());
    }
    let (_, version) = SUPPORTED_VERSION.split_at("HTTP/".len());

    // The method is ASCII by now; the target is opaque and kept lossily.
    let method = String::from_utf8_lossy(*method);
    let target = String::from_utf8_lossy(*target);

    Ok(Some((RequestLine::new(&method, &target, version), idx + CRLF_LEN)))
}

fn parse_content_length(value: &str) -> Result<usize, ContentLengthError> {
    let invalid = || ContentLengthError::Invalid(value.to_string());

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}

/// Reads one request from `reader`, growing `buf` as needed.
///
/// End of stream before the request is complete is reported as
/// [`ParseError::IncompleteRequest`]. Bytes after the request stay in `buf`.
pub async fn read_request<R>(reader: &mut R, buf: &mut ReadBuffer) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin,
{
    let mut parser = RequestParser::new();

    if !buf.is_empty() {
        let consumed = parser.feed(buf.as_slice())?;
        buf.consume(consumed);
    }

    while !parser.is_done() {
        let n = buf.read_from(reader).await?;
        if n == 0 {
            return Err(ParseError::IncompleteRequest {
                state: parser.state(),
            });
        }

        let consumed = parser.feed(buf.as_slice())?;
        buf.consume(consumed);
    }

    parser.finish()
}
