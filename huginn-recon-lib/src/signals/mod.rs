pub mod extractor;
pub mod headers;
pub mod kind;
pub mod possibility;

pub use extractor::RequestSignals;
pub use headers::RawHeaders;
pub use kind::SignalKind;
pub use possibility::count_hit_possibilities;
