use httpwire::http::buffer::ReadBuffer;
use httpwire::http::error::{ContentLengthError, ParseError, RequestLineError};
use httpwire::http::parser::{read_request, ParseState, RequestParser};
use httpwire::http::request::Request;
use tokio::io::AsyncWriteExt;

const GET_REQUEST: &[u8] = b"GET / HTTP/1.1\r\nHost: localhost:42069\r\nUser-Agent: curl/7.81.0\r\nAccept: */*\r\n\r\n";
const POST_REQUEST: &[u8] = b"POST /coffee HTTP/1.1\r\nHost: localhost:42069\r\nContent-Length: 13\r\n\r\nhello world!\n";

fn parse_whole(data: &[u8]) -> Request {
    let mut parser = RequestParser::new();
    let consumed = parser.feed(data).unwrap();
    assert_eq!(consumed, data.len());
    parser.finish().unwrap()
}

/// Feeds `data` in pieces of `step` bytes, sliding the window forward the
/// way a connection does.
fn parse_in_pieces(data: &[u8], step: usize) -> Request {
    let mut parser = RequestParser::new();
    let mut window = Vec::new();

    for piece in data.chunks(step) {
        window.extend_from_slice(piece);
        let consumed = parser.feed(&window).unwrap();
        window.drain(..consumed);
        if parser.is_done() {
            break;
        }
    }

    parser.finish().unwrap()
}

fn parse_split_at(data: &[u8], at: usize) -> Request {
    let mut parser = RequestParser::new();
    let mut window = data[..at].to_vec();

    let consumed = parser.feed(&window).unwrap();
    window.drain(..consumed);
    if !parser.is_done() {
        window.extend_from_slice(&data[at..]);
        parser.feed(&window).unwrap();
    }

    parser.finish().unwrap()
}

#[test]
fn test_parse_good_get_request_line() {
    let req = parse_whole(b"GET / HTTP/1.1\r\nHost: localhost:42069\r\n\r\n");

    assert_eq!(req.method(), "GET");
    assert_eq!(req.target(), "/");
    assert_eq!(req.request_line().version(), "1.1");
    assert_eq!(req.header("host"), Some("localhost:42069"));
    assert_eq!(req.headers().len(), 1);
    assert!(req.body().is_empty());
}

#[test]
fn test_parse_path_and_query_string() {
    let req = parse_whole(b"GET /search?q=rust HTTP/1.1\r\nHost: example.com\r\n\r\n");

    assert_eq!(req.target(), "/search?q=rust");
}

#[test]
fn test_non_utf8_target_is_accepted() {
    let raw = b"GET /caf\xe9 HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let req = parse_whole(raw);

    assert_eq!(req.method(), "GET");
    assert_eq!(req.target(), "/caf\u{FFFD}");
    assert_eq!(req.header("host"), Some("example.com"));
    assert_eq!(parse_in_pieces(raw, 1), req);
}

#[test]
fn test_parse_multiple_headers() {
    let req = parse_whole(GET_REQUEST);

    assert_eq!(req.header("Host"), Some("localhost:42069"));
    assert_eq!(req.header("User-Agent"), Some("curl/7.81.0"));
    assert_eq!(req.header("Accept"), Some("*/*"));
}

#[test]
fn test_parse_duplicate_headers_are_joined() {
    let req = parse_whole(
        b"GET / HTTP/1.1\r\nAccept: text/html\r\naccept: application/json\r\n\r\n",
    );

    assert_eq!(req.header("accept"), Some("text/html, application/json"));
}

#[test]
fn test_parse_post_with_body() {
    let req = parse_whole(POST_REQUEST);

    assert_eq!(req.method(), "POST");
    assert_eq!(req.target(), "/coffee");
    assert_eq!(req.body(), b"hello world!\n");
}

#[test]
fn test_parse_binary_body() {
    let req = parse_whole(b"POST /upload HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\x01\x02\x03");

    assert_eq!(req.body(), &[0, 1, 2, 3]);
}

#[test]
fn test_one_byte_at_a_time_matches_whole_buffer() {
    for data in [GET_REQUEST, POST_REQUEST] {
        assert_eq!(parse_in_pieces(data, 1), parse_whole(data));
        assert_eq!(parse_in_pieces(data, 3), parse_whole(data));
    }
}

#[test]
fn test_every_split_point_matches_whole_buffer() {
    for data in [GET_REQUEST, POST_REQUEST] {
        let expected = parse_whole(data);
        for at in 0..=data.len() {
            assert_eq!(parse_split_at(data, at), expected, "split at {}", at);
        }
    }
}

#[test]
fn test_partial_request_line_consumes_nothing() {
    let mut parser = RequestParser::new();

    assert_eq!(parser.feed(b"GET / HTT").unwrap(), 0);
    assert_eq!(parser.state(), ParseState::Initialized);
}

#[test]
fn test_partial_headers_wait_for_more() {
    let mut parser = RequestParser::new();
    let data = b"GET / HTTP/1.1\r\nHost: example.com\r\n";

    assert_eq!(parser.feed(data).unwrap(), data.len());
    assert_eq!(parser.state(), ParseState::ParsingHeaders);
    assert_eq!(parser.headers().get("host"), Some("example.com"));
}

#[test]
fn test_body_equal_to_content_length_is_done() {
    let mut parser = RequestParser::new();
    let data = b"POST / HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";

    assert_eq!(parser.feed(data).unwrap(), data.len());
    assert!(parser.is_done());
    assert_eq!(parser.body(), b"hello");
}

#[test]
fn test_body_one_byte_over_content_length_fails() {
    let mut parser = RequestParser::new();
    let result = parser.feed(b"POST / HTTP/1.1\r\nContent-Length: 4\r\n\r\nhello");

    assert!(matches!(
        result,
        Err(ParseError::ContentLengthOverflow(ContentLengthError::Exceeded {
            declared: 4,
            received: 5
        }))
    ));
    assert_eq!(parser.state(), ParseState::Failed);
}

#[test]
fn test_short_body_waits_for_more() {
    let mut parser = RequestParser::new();
    let data = b"POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";

    assert_eq!(parser.feed(data).unwrap(), data.len());
    assert_eq!(parser.state(), ParseState::ParsingBody);

    assert_eq!(parser.feed(b"world").unwrap(), 5);
    assert!(parser.is_done());
    assert_eq!(parser.body(), b"helloworld");
}

#[test]
fn test_missing_content_length_means_empty_body() {
    let mut parser = RequestParser::new();
    let head = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let mut data = head.to_vec();
    data.extend_from_slice(b"leftover");

    assert_eq!(parser.feed(&data).unwrap(), head.len());
    assert!(parser.is_done());
    assert!(parser.body().is_empty());
}

#[test]
fn test_zero_content_length() {
    let req = parse_whole(b"POST /api HTTP/1.1\r\nContent-Length: 0\r\n\r\n");

    assert!(req.body().is_empty());
}

#[test]
fn test_invalid_content_length_is_terminal() {
    let mut parser = RequestParser::new();
    let result = parser.feed(b"POST / HTTP/1.1\r\nContent-Length: lots\r\n\r\nhello");

    assert!(matches!(
        result,
        Err(ParseError::ContentLengthOverflow(ContentLengthError::Invalid(v))) if v == "lots"
    ));
    assert!(matches!(parser.feed(b"more"), Err(ParseError::Failed)));
}

#[test]
fn test_unsupported_version_fails_and_poisons_parser() {
    let mut parser = RequestParser::new();
    let result = parser.feed(b"GET / HTTP/1.0\r\n\r\n");

    assert!(matches!(
        result,
        Err(ParseError::MalformedRequestLine(RequestLineError::UnsupportedVersion(v))) if v == "HTTP/1.0"
    ));
    assert_eq!(parser.state(), ParseState::Failed);
    assert!(parser.request_line().is_none());
    assert!(matches!(
        parser.feed(b"GET / HTTP/1.1\r\n\r\n"),
        Err(ParseError::Failed)
    ));
}

#[test]
fn test_wrong_token_count() {
    for line in [&b"/coffee HTTP/1.1\r\n\r\n"[..], b"GET  / HTTP/1.1\r\n\r\n", b"GET\r\n\r\n"] {
        let mut parser = RequestParser::new();
        assert!(matches!(
            parser.feed(line),
            Err(ParseError::MalformedRequestLine(RequestLineError::TokenCount(_)))
        ));
    }
}

#[test]
fn test_method_must_be_uppercase_letters() {
    for line in [
        &b"get / HTTP/1.1\r\n\r\n"[..],
        b"G3T / HTTP/1.1\r\n\r\n",
        b" / HTTP/1.1\r\n\r\n",
        b"G\xc9T / HTTP/1.1\r\n\r\n",
    ] {
        let mut parser = RequestParser::new();
        assert!(matches!(
            parser.feed(line),
            Err(ParseError::MalformedRequestLine(RequestLineError::InvalidMethod(_)))
        ));
    }
}

#[test]
fn test_custom_uppercase_method_is_accepted() {
    let req = parse_whole(b"BREW /pot HTTP/1.1\r\n\r\n");

    assert_eq!(req.method(), "BREW");
}

#[test]
fn test_invalid_header_fails_request() {
    let mut parser = RequestParser::new();
    let result = parser.feed(b"GET / HTTP/1.1\r\nHost : example.com\r\n\r\n");

    assert!(matches!(result, Err(ParseError::InvalidHeaderSyntax(_))));
}

#[test]
fn test_feed_after_done_fails() {
    let mut parser = RequestParser::new();
    parser.feed(b"GET / HTTP/1.1\r\n\r\n").unwrap();

    assert!(matches!(parser.feed(b"GET"), Err(ParseError::AlreadyDone)));
    assert!(parser.finish().is_ok());
}

#[tokio::test]
async fn test_read_request_from_slice() {
    let mut src = POST_REQUEST;
    let mut buf = ReadBuffer::new();

    let req = read_request(&mut src, &mut buf).await.unwrap();

    assert_eq!(req, parse_whole(POST_REQUEST));
    assert!(buf.is_empty());
}

#[tokio::test]
async fn test_read_request_one_byte_per_read() {
    let (mut client, mut server) = tokio::io::duplex(1);
    let writer = tokio::spawn(async move {
        client.write_all(POST_REQUEST).await.unwrap();
    });

    let mut buf = ReadBuffer::with_capacity(1);
    let req = read_request(&mut server, &mut buf).await.unwrap();
    writer.await.unwrap();

    assert_eq!(req, parse_whole(POST_REQUEST));
}

#[tokio::test]
async fn test_read_request_eof_in_headers_is_incomplete() {
    let mut src: &[u8] = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    let mut buf = ReadBuffer::new();

    let result = read_request(&mut src, &mut buf).await;

    assert!(matches!(
        result,
        Err(ParseError::IncompleteRequest {
            state: ParseState::ParsingHeaders
        })
    ));
}

#[tokio::test]
async fn test_read_request_eof_in_body_is_incomplete() {
    let mut src: &[u8] = b"POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";
    let mut buf = ReadBuffer::new();

    let result = read_request(&mut src, &mut buf).await;

    assert!(matches!(
        result,
        Err(ParseError::IncompleteRequest {
            state: ParseState::ParsingBody
        })
    ));
}

#[tokio::test]
async fn test_read_request_empty_stream() {
    let mut src: &[u8] = b"";
    let mut buf = ReadBuffer::new();

    let result = read_request(&mut src, &mut buf).await;

    assert!(matches!(
        result,
        Err(ParseError::IncompleteRequest {
            state: ParseState::Initialized
        })
    ));
}
