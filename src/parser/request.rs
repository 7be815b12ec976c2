//! Raw HTTP request parsing.

use std::collections::HashMap;
use std::str::FromStr;

use crate::parser::error::Error;
use crate::parser::method::Method;
use crate::parser::version::HttpVersion;

/// A request as read off the wire, before it is handed to the gateway.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// The request target, including any query string
    pub path: String,
    /// The HTTP version
    pub version: HttpVersion,
    /// The HTTP headers
    pub headers: HashMap<String, String>,
    /// The request body
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Create a new HTTP request with an empty body.
    pub fn new(method: Method, path: String, version: HttpVersion, headers: HashMap<String, String>) -> Self {
        Self {
            method,
            path,
            version,
            headers,
            body: Vec::new(),
        }
    }

    /// Replace the body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Get a header value, ignoring the case of the name.
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                Some(v)
            } else {
                None
            }
        })
    }

    /// Check if a header exists.
    pub fn has_header(&self, name: &str) -> bool {
        self.get_header(name).is_some()
    }

    /// The body decoded as UTF-8.
    pub fn body_text(&self) -> Result<&str, Error> {
        std::str::from_utf8(&self.body).map_err(|_| Error::InvalidBodyEncoding)
    }
}

/// Split the input into the header block and whatever follows the blank line.
fn split_head(input: &[u8]) -> (&[u8], &[u8]) {
    let crlf = find(input, b"\r\n\r\n").map(|pos| (pos, pos + 4));
    let lf = find(input, b"\n\n").map(|pos| (pos, pos + 2));

    let boundary = match (crlf, lf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    };

    match boundary {
        Some((head_end, body_start)) => (&input[..head_end], &input[body_start..]),
        None => (input, &[]),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn content_length(headers: &HashMap<String, String>) -> Result<Option<usize>, Error> {
    let Some(value) = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("Content-Length"))
        .map(|(_, v)| v)
    else {
        return Ok(None);
    };

    value
        .parse::<usize>()
        .map(Some)
        .map_err(|_| Error::InvalidContentLength(value.clone()))
}

/// Total number of bytes the message in `input` occupies, once its header
/// block has fully arrived.
///
/// Returns `None` while the blank line terminating the headers has not been
/// seen yet. A malformed or absent `Content-Length` counts as no body; one
/// too large to add up counts as complete, leaving the parser to reject it.
pub fn message_length(input: &[u8]) -> Option<usize> {
    let (head, rest) = split_head(input);
    if rest.is_empty() && head.len() == input.len() {
        return None;
    }

    let head_str = std::str::from_utf8(head).ok()?;
    let body_len = head_str
        .lines()
        .skip(1)
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("Content-Length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let head_len = input.len() - rest.len();
    Some(head_len.checked_add(body_len).unwrap_or(input.len()))
}

/// Parse an HTTP request from a byte slice.
///
/// The body is taken from the bytes after the header block and trimmed to
/// `Content-Length` when that header is present.
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    let (head, rest) = split_head(input);

    let head_str = match std::str::from_utf8(head) {
        Ok(s) => s,
        Err(_) => return Err(Error::MalformedRequestLine("Invalid UTF-8".to_string())),
    };

    let mut lines = head_str.lines();

    let request_line = match lines.next() {
        Some(line) if !line.trim().is_empty() => line,
        _ => return Err(Error::EmptyRequest),
    };

    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(Error::MalformedRequestLine(request_line.to_string()));
    }

    let method = Method::from_str(parts[0])?;

    let path = parts[1].to_string();
    if !path.starts_with('/') {
        return Err(Error::InvalidPath);
    }

    let version = HttpVersion::from_str(parts[2])?;

    let mut headers = HashMap::new();
    for line in lines {
        if line.is_empty() {
            break;
        }

        let (name, value) = line.split_once(':').ok_or(Error::InvalidHeaderFormat)?;
        headers.insert(name.trim().to_string(), value.trim().to_string());
    }

    if version.requires_host() && !headers.keys().any(|k| k.eq_ignore_ascii_case("Host")) {
        return Err(Error::MissingHeader("Host".to_string()));
    }

    let body = match content_length(&headers)? {
        Some(expected) if rest.len() < expected => {
            return Err(Error::IncompleteBody {
                expected,
                actual: rest.len(),
            });
        }
        Some(expected) => rest[..expected].to_vec(),
        None => rest.to_vec(),
    };

    Ok(HttpRequest::new(method, path, version, headers).with_body(body))
}
