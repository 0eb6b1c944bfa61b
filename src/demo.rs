use httpwire::http::headers::Headers;
use httpwire::http::request::Request;
use httpwire::http::response::{default_headers, StatusCode};
use httpwire::http::writer::ResponseWriter;
use httpwire::server::{Handler, HandlerError};

const CHUNK_SIZE: usize = 32;

const OK_PAGE: &str = "<html>
<head><title>200 OK</title></head>
<body><h1>Success!</h1><p>Request received.</p></body>
</html>
";

const BAD_REQUEST_PAGE: &str = "<html>
<head><title>400 Bad Request</title></head>
<body><h1>Bad Request</h1><p>That request was not acceptable.</p></body>
</html>
";

const SERVER_ERROR_PAGE: &str = "<html>
<head><title>500 Internal Server Error</title></head>
<body><h1>Internal Server Error</h1><p>This one is on the server.</p></body>
</html>
";

const STREAM_BODY: &str = "This body is sent with chunked transfer-encoding, \
32 bytes at a time, and ends with a trailer carrying its total length.\n";

/// Canned routes used by the `httpwire` binary.
pub struct DemoHandler;

impl Handler for DemoHandler {
    async fn handle(
        &self,
        w: &mut ResponseWriter<Vec<u8>>,
        req: &Request,
    ) -> Result<(), HandlerError> {
        match req.target() {
            "/yourproblem" => write_html(w, StatusCode::BadRequest, BAD_REQUEST_PAGE).await,
            "/myproblem" => {
                write_html(w, StatusCode::InternalServerError, SERVER_ERROR_PAGE).await
            }
            "/chunked" => write_chunked(w, STREAM_BODY.as_bytes()).await,
            _ => write_html(w, StatusCode::Ok, OK_PAGE).await,
        }
    }
}

async fn write_html(
    w: &mut ResponseWriter<Vec<u8>>,
    status: StatusCode,
    page: &str,
) -> Result<(), HandlerError> {
    let mut headers = default_headers(page.len());
    headers.replace("Content-Type", "text/html");

    w.write_status_line(status).await?;
    w.write_headers(&headers).await?;
    w.write_body(page.as_bytes()).await?;
    Ok(())
}

async fn write_chunked(w: &mut ResponseWriter<Vec<u8>>, body: &[u8]) -> Result<(), HandlerError> {
    let mut headers = default_headers(0);
    headers.remove("Content-Length");
    headers.remove("Connection");
    headers.set("Transfer-Encoding", "chunked");
    headers.set("Trailer", "X-Content-Length");

    w.write_status_line(StatusCode::Ok).await?;
    w.write_headers(&headers).await?;
    for chunk in body.chunks(CHUNK_SIZE) {
        w.write_chunked_body(chunk).await?;
    }
    w.write_chunked_body_done().await?;

    let mut trailers = Headers::new();
    trailers.set("X-Content-Length", &body.len().to_string());
    w.write_trailers(&trailers).await?;
    Ok(())
}
