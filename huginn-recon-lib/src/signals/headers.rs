use crate::error::{ReconError, Result};

/// Header name/value pairs of one request, in the order they were received
///
/// Names keep the case the client used. Lookups by name are ASCII
/// case-insensitive and return the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawHeaders {
    entries: Vec<(String, String)>,
}

impl RawHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Value of the first header named `name`, compared case-insensitively
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Header names joined with `", "` in receipt order
    ///
    /// Every header counts, including the ones that carry no signal.
    pub fn header_order(&self) -> String {
        self.entries
            .iter()
            .map(|(n, _)| n.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parse a textual request head
    ///
    /// Accepts `Name: value` lines separated by LF or CRLF, optionally
    /// preceded by an HTTP request line. Parsing stops at the first blank line
    /// after the head started. Continuation lines (leading space or tab) are
    /// folded into the previous value.
    pub fn parse(text: &str) -> Result<Self> {
        let mut headers = RawHeaders::new();
        let mut started = false;

        for (lineno, raw_line) in text.split('\n').enumerate() {
            let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);

            if line.trim().is_empty() {
                if started {
                    break;
                }
                continue;
            }

            if !started {
                started = true;
                if is_request_line(line) {
                    continue;
                }
            }

            if line.starts_with(' ') || line.starts_with('\t') {
                let Some((_, value)) = headers.entries.last_mut() else {
                    return Err(ReconError::HeaderParse(format!(
                        "line {}: continuation without a preceding header",
                        lineno.saturating_add(1)
                    )));
                };
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(line.trim());
                continue;
            }

            let Some((name, value)) = line.split_once(':') else {
                return Err(ReconError::HeaderParse(format!(
                    "line {}: missing ':' separator",
                    lineno.saturating_add(1)
                )));
            };
            let name = name.trim();
            if name.is_empty() {
                return Err(ReconError::HeaderParse(format!(
                    "line {}: empty header name",
                    lineno.saturating_add(1)
                )));
            }
            headers.push(name, value.trim());
        }

        Ok(headers)
    }
}

impl<K, V> FromIterator<(K, V)> for RawHeaders
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = RawHeaders::new();
        for (name, value) in iter {
            headers.push(name, value);
        }
        headers
    }
}

fn is_request_line(line: &str) -> bool {
    let mut parts = line.split_whitespace();
    matches!(
        (parts.next(), parts.next(), parts.next(), parts.next()),
        (Some(method), Some(_), Some(version), None)
            if !method.contains(':') && version.starts_with("HTTP/")
    )
}
