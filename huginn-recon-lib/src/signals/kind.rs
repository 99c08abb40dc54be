use std::fmt;

/// Request attributes used for fingerprinting
///
/// Thirteen kinds are read straight from a transport header; `HeaderOrder`
/// is synthesized from the order in which the client sent its headers.
/// Declaration order is the order in which kinds are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignalKind {
    UserAgent,
    Accept,
    AcceptLanguage,
    AcceptEncoding,
    AcceptCharset,
    KeepAlive,
    Connection,
    CacheControl,
    UaPixels,
    UaColor,
    UaOs,
    UaCpu,
    Te,
    HeaderOrder,
}

impl SignalKind {
    pub const COUNT: usize = 14;

    pub const ALL: [SignalKind; Self::COUNT] = [
        SignalKind::UserAgent,
        SignalKind::Accept,
        SignalKind::AcceptLanguage,
        SignalKind::AcceptEncoding,
        SignalKind::AcceptCharset,
        SignalKind::KeepAlive,
        SignalKind::Connection,
        SignalKind::CacheControl,
        SignalKind::UaPixels,
        SignalKind::UaColor,
        SignalKind::UaOs,
        SignalKind::UaCpu,
        SignalKind::Te,
        SignalKind::HeaderOrder,
    ];

    /// Identifier of the kind, also the stem of its reference table
    pub const fn name(self) -> &'static str {
        match self {
            SignalKind::UserAgent => "user-agent",
            SignalKind::Accept => "accept",
            SignalKind::AcceptLanguage => "accept-language",
            SignalKind::AcceptEncoding => "accept-encoding",
            SignalKind::AcceptCharset => "accept-charset",
            SignalKind::KeepAlive => "keep-alive",
            SignalKind::Connection => "connection",
            SignalKind::CacheControl => "cache-control",
            SignalKind::UaPixels => "ua-pixels",
            SignalKind::UaColor => "ua-color",
            SignalKind::UaOs => "ua-os",
            SignalKind::UaCpu => "ua-cpu",
            SignalKind::Te => "te",
            SignalKind::HeaderOrder => "header-order",
        }
    }

    /// Canonical transport header carrying this signal, `None` for the
    /// synthesized header order
    pub const fn header_name(self) -> Option<&'static str> {
        match self {
            SignalKind::UserAgent => Some("User-Agent"),
            SignalKind::Accept => Some("Accept"),
            SignalKind::AcceptLanguage => Some("Accept-Language"),
            SignalKind::AcceptEncoding => Some("Accept-Encoding"),
            SignalKind::AcceptCharset => Some("Accept-Charset"),
            SignalKind::KeepAlive => Some("Keep-Alive"),
            SignalKind::Connection => Some("Connection"),
            SignalKind::CacheControl => Some("Cache-Control"),
            SignalKind::UaPixels => Some("UA-Pixels"),
            SignalKind::UaColor => Some("UA-Color"),
            SignalKind::UaOs => Some("UA-OS"),
            SignalKind::UaCpu => Some("UA-CPU"),
            SignalKind::Te => Some("TE"),
            SignalKind::HeaderOrder => None,
        }
    }

    /// File name of the reference table for this kind
    pub fn table_file(self) -> String {
        format!("{}.fdb", self.name())
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
