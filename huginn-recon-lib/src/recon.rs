//! Fingerprinting entry points
//!
//! Extraction feeds both the possibility counter and the matcher; the
//! matcher's hits are tallied and handed to the reporter. Every stage
//! returns a fresh value, nothing is cached between calls.

use tracing::{debug, info};

use crate::matching::{match_signals, MatchTally};
use crate::report::{ReportMode, Reporter, Surface};
use crate::signals::{count_hit_possibilities, RawHeaders, RequestSignals};
use crate::store::{FileStore, ReferenceStore};

/// Result of matching one request against the reference tables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identification {
    pub tally: MatchTally,
    pub possibilities: usize,
}

impl Identification {
    pub fn render(&self, reporter: &Reporter, mode: ReportMode) -> String {
        reporter.render(&self.tally, mode, self.possibilities)
    }

    pub fn best_hit(&self) -> Option<(&str, usize)> {
        self.tally.best_hit()
    }
}

/// Match and tally without rendering
pub fn identify<S>(store: &S, signals: &RequestSignals) -> Identification
where
    S: ReferenceStore + ?Sized,
{
    let possibilities = count_hit_possibilities(signals);
    let tally = MatchTally::from_matches(match_signals(store, signals));
    debug!(
        possibilities,
        labels = tally.len(),
        hits = tally.total_hits(),
        "request identified"
    );
    Identification { tally, possibilities }
}

/// Fingerprint a request and render the report for a markup surface
pub fn fingerprint<S>(signals: &RequestSignals, mode: ReportMode, store: &S) -> String
where
    S: ReferenceStore + ?Sized,
{
    identify(store, signals).render(&Reporter::new(Surface::Html), mode)
}

/// Fingerprint raw headers against the file tables under `prefix`
///
/// `mode` is a report mode name; unknown names yield the best hit.
pub fn fingerprint_with_prefix(headers: &RawHeaders, mode: &str, prefix: &str) -> String {
    let signals = RequestSignals::from_headers(headers);
    fingerprint(&signals, ReportMode::parse(mode), &FileStore::new(prefix))
}

/// Number of signals the request could match on
pub fn possibility_count(signals: &RequestSignals) -> usize {
    count_hit_possibilities(signals)
}

/// Store every present signal of a request under `label`
///
/// Best effort: kinds whose value is absent, already stored, or whose table
/// cannot be written are skipped. Returns the number of records written.
pub fn record_sample<S>(store: &S, signals: &RequestSignals, label: &str) -> usize
where
    S: ReferenceStore + ?Sized,
{
    if label.is_empty() {
        return 0;
    }
    let mut written: usize = 0;
    for (kind, value) in signals.present() {
        if store.insert(kind, label, value) {
            written = written.saturating_add(1);
        }
    }
    info!(label, written, "fingerprint sample recorded");
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::SignalKind;
    use crate::store::MemoryStore;

    #[test]
    fn test_two_kinds_same_label() {
        let store = MemoryStore::new()
            .with_record(SignalKind::UserAgent, "Chrome99", "Mozilla/5.0 Chrome/99")
            .with_record(SignalKind::AcceptLanguage, "Chrome99", "en-US,en;q=0.9");
        let signals = RequestSignals::new()
            .with(SignalKind::UserAgent, "Mozilla/5.0 Chrome/99")
            .with(SignalKind::AcceptLanguage, "en-US,en;q=0.9");

        let id = identify(&store, &signals);
        assert_eq!(id.tally.entries(), &[("Chrome99".to_string(), 2)]);
        assert_eq!(id.possibilities, 2);
        assert_eq!(
            fingerprint(&signals, ReportMode::BestHitDetail, &store),
            "Chrome99 (100% with 2 hits)"
        );
    }

    #[test]
    fn test_fingerprint_returns_bare_best_label() {
        let store = MemoryStore::new().with_record(SignalKind::UserAgent, "AT&T <Mobile>", "Mobile/1.0");
        let signals = RequestSignals::new().with(SignalKind::UserAgent, "Mobile/1.0");

        assert_eq!(fingerprint(&signals, ReportMode::BestHit, &store), "AT&T <Mobile>");
        assert_eq!(
            fingerprint(&signals, ReportMode::List, &store),
            "AT&amp;T &lt;Mobile&gt;: 1<br>\n"
        );
    }

    #[test]
    fn test_record_sample_is_idempotent() {
        let store = MemoryStore::new();
        let signals = RequestSignals::new()
            .with(SignalKind::UserAgent, "TestBot/1.0")
            .with(SignalKind::HeaderOrder, "User-Agent");

        assert_eq!(record_sample(&store, &signals, "Alpha"), 2);
        assert_eq!(record_sample(&store, &signals, "Alpha"), 0);
        assert_eq!(store.records(SignalKind::UserAgent).len(), 1);
        assert_eq!(store.records(SignalKind::HeaderOrder).len(), 1);
        assert!(store.records(SignalKind::Accept).is_empty());
    }

    #[test]
    fn test_record_sample_without_label() {
        let store = MemoryStore::new();
        let signals = RequestSignals::new().with(SignalKind::UserAgent, "TestBot/1.0");
        assert_eq!(record_sample(&store, &signals, ""), 0);
        assert!(store.records(SignalKind::UserAgent).is_empty());
    }

    #[test]
    fn test_recorded_sample_is_recognized() {
        let store = MemoryStore::new();
        let headers: RawHeaders = [("User-Agent", "TestBot/1.0"), ("Accept", "*/*")]
            .into_iter()
            .collect();
        let signals = RequestSignals::from_headers(&headers);

        record_sample(&store, &signals, "TestBot");
        assert_eq!(
            fingerprint(&signals, ReportMode::BestHitDetail, &store),
            "TestBot (100% with 3 hits)"
        );
    }
}
