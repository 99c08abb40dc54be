//! Forward proxy detection
//!
//! A request that carries a `Via` header went through a proxy. The product is
//! guessed from vendor markers, checked in a fixed order.

use std::fmt;

use crate::signals::RawHeaders;

const VIA: &str = "Via";
const FORWARDED_FOR: &str = "X-Forwarded-For";
const BLUECOAT_VIA: &str = "X-BlueCoat-Via";

/// Markers searched case-insensitively in the `Via` value, first match wins
const PRODUCT_MARKERS: [(&str, &str); 4] = [
    ("isa", "Microsoft ISA"),
    ("iwss", "Trend Micro InterScan Web Security Suite (IWSS)"),
    ("netcache", "NetCache NetApp"),
    ("squid", "Squid Proxy"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyVerdict {
    Direct,
    Proxied {
        via: String,
        forwarded_for: String,
        product: String,
        details: String,
    },
}

impl ProxyVerdict {
    pub fn is_proxied(&self) -> bool {
        matches!(self, ProxyVerdict::Proxied { .. })
    }
}

impl fmt::Display for ProxyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyVerdict::Direct => f.write_str("no proxy used"),
            ProxyVerdict::Proxied { via, forwarded_for, product, details } => write!(
                f,
                "Proxy used (For: {forwarded_for}, Via: {via}, Product: {product}, Details: {details})"
            ),
        }
    }
}

/// Product markers are looked for in the `Via` value only, not across the
/// whole request.
pub fn detect_proxy(headers: &RawHeaders) -> ProxyVerdict {
    let Some(via) = headers.get(VIA) else {
        return ProxyVerdict::Direct;
    };
    let forwarded_for = headers.get(FORWARDED_FOR).unwrap_or_default().to_string();

    let (product, details) = match headers.get(BLUECOAT_VIA) {
        Some(bluecoat) => ("Bluecoat".to_string(), bluecoat.to_string()),
        None => {
            let haystack = via.to_ascii_lowercase();
            let product = PRODUCT_MARKERS
                .iter()
                .find(|(marker, _)| haystack.contains(marker))
                .map(|(_, product)| *product)
                .unwrap_or("unknown");
            (product.to_string(), "none".to_string())
        }
    };

    ProxyVerdict::Proxied { via: via.to_string(), forwarded_for, product, details }
}
