#![forbid(unsafe_code)]

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::signals::RawHeaders;

#[derive(Debug, Clone)]
pub enum HeadOutcome {
    Request(RequestHead),
    /// Peer closed the connection before sending anything
    Closed,
    TooLarge,
    Malformed(String),
}

/// Request line and headers, in the order and case the client sent them
#[derive(Debug, Clone)]
pub struct RequestHead {
    pub method: String,
    pub target: String,
    pub version: String,
    pub headers: RawHeaders,
}

impl RequestHead {
    /// Decoded value of the first query parameter called `name`
    pub fn query_param(&self, name: &str) -> Option<String> {
        let uri: http::Uri = self.target.parse().ok()?;
        uri.query()?
            .split('&')
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                Some((form_decode(key)?, form_decode(value)?))
            })
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

/// Read the request head, up to and including the empty line
pub async fn read_request_head<S>(stream: &mut S, max_bytes: usize) -> std::io::Result<HeadOutcome>
where
    S: AsyncRead + Unpin,
{
    let mut buf = Vec::with_capacity(512);
    let mut tmp = [0u8; 512];
    loop {
        if let Some(end) = find_head_end(&buf) {
            if end > max_bytes {
                return Ok(HeadOutcome::TooLarge);
            }
            return Ok(parse_head(&buf[..end]));
        }
        if buf.len() >= max_bytes {
            return Ok(HeadOutcome::TooLarge);
        }
        let n = stream.read(&mut tmp).await?;
        if n == 0 {
            if buf.is_empty() {
                return Ok(HeadOutcome::Closed);
            }
            return Ok(HeadOutcome::Malformed("connection closed inside request head".into()));
        }
        buf.extend_from_slice(&tmp[..n]);
    }
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    let crlf = buf
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .and_then(|p| p.checked_add(4));
    let lf = buf
        .windows(2)
        .position(|w| w == b"\n\n")
        .and_then(|p| p.checked_add(2));
    match (crlf, lf) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn parse_head(buf: &[u8]) -> HeadOutcome {
    let lossy = String::from_utf8_lossy(buf);
    let text: &str = &lossy;
    let (line, rest) = text.split_once('\n').unwrap_or((text, ""));
    let line = line.trim_end_matches('\r');

    let parts: Vec<&str> = line.split(' ').collect();
    let [method, target, version] = parts.as_slice() else {
        return HeadOutcome::Malformed(format!("invalid request line: {line}"));
    };
    if method.is_empty() || target.is_empty() || !version.starts_with("HTTP/1.") {
        return HeadOutcome::Malformed(format!("invalid request line: {line}"));
    }

    match RawHeaders::parse(rest) {
        Ok(headers) => HeadOutcome::Request(RequestHead {
            method: (*method).to_string(),
            target: (*target).to_string(),
            version: (*version).to_string(),
            headers,
        }),
        Err(e) => HeadOutcome::Malformed(e.to_string()),
    }
}

/// Decode an `application/x-www-form-urlencoded` component
fn form_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hi = *bytes.get(i.checked_add(1)?)?;
                let lo = *bytes.get(i.checked_add(2)?)?;
                let hi = (hi as char).to_digit(16)? as u8;
                let lo = (lo as char).to_digit(16)? as u8;
                out.push((hi << 4) | lo);
                i = i.checked_add(3)?;
            }
            b'+' => {
                out.push(b' ');
                i = i.checked_add(1)?;
            }
            b => {
                out.push(b);
                i = i.checked_add(1)?;
            }
        }
    }
    String::from_utf8(out).ok()
}
