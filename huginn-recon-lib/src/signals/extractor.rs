use super::headers::RawHeaders;
use super::kind::SignalKind;

/// Signal values derived from one request, one slot per [`SignalKind`]
///
/// Empty values are stored as absent: an empty string never matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSignals {
    values: [Option<String>; SignalKind::COUNT],
}

impl RequestSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract every known signal from the raw header collection
    ///
    /// Unknown headers are ignored here but still show up in the
    /// synthesized header order.
    pub fn from_headers(headers: &RawHeaders) -> Self {
        let mut signals = Self::new();
        for kind in SignalKind::ALL {
            match kind.header_name() {
                Some(name) => {
                    if let Some(value) = headers.get(name) {
                        signals.set(kind, value);
                    }
                }
                None => signals.set(kind, headers.header_order()),
            }
        }
        signals
    }

    pub fn set(&mut self, kind: SignalKind, value: impl Into<String>) {
        let value = value.into();
        self.values[kind.index()] = if value.is_empty() { None } else { Some(value) };
    }

    pub fn with(mut self, kind: SignalKind, value: impl Into<String>) -> Self {
        self.set(kind, value);
        self
    }

    pub fn get(&self, kind: SignalKind) -> Option<&str> {
        self.values[kind.index()].as_deref()
    }

    /// Kinds carrying a non-empty value, in declaration order
    pub fn present(&self) -> impl Iterator<Item = (SignalKind, &str)> {
        SignalKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|v| (kind, v)))
    }
}

impl From<&RawHeaders> for RequestSignals {
    fn from(headers: &RawHeaders) -> Self {
        Self::from_headers(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_known_headers_case_insensitively() {
        let headers: RawHeaders = [
            ("user-agent", "TestBot/1.0"),
            ("ACCEPT-LANGUAGE", "en-US"),
            ("X-Unknown", "ignored"),
        ]
        .into_iter()
        .collect();

        let signals = RequestSignals::from_headers(&headers);
        assert_eq!(signals.get(SignalKind::UserAgent), Some("TestBot/1.0"));
        assert_eq!(signals.get(SignalKind::AcceptLanguage), Some("en-US"));
        assert_eq!(signals.get(SignalKind::Accept), None);
        assert_eq!(
            signals.get(SignalKind::HeaderOrder),
            Some("user-agent, ACCEPT-LANGUAGE, X-Unknown")
        );
    }

    #[test]
    fn test_empty_headers_yield_no_signals() {
        let signals = RequestSignals::from_headers(&RawHeaders::new());
        assert_eq!(signals.present().count(), 0);
        assert_eq!(signals, RequestSignals::new());
    }

    #[test]
    fn test_empty_value_is_absent() {
        let headers: RawHeaders = [("TE", "")].into_iter().collect();
        let signals = RequestSignals::from_headers(&headers);
        assert_eq!(signals.get(SignalKind::Te), None);
        assert_eq!(signals.get(SignalKind::HeaderOrder), Some("TE"));
    }
}
