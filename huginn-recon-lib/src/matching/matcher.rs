use tracing::trace;

use crate::signals::RequestSignals;
use crate::store::ReferenceStore;

/// Look every present signal up in its reference table
///
/// Returns the labels of all hits, concatenated in kind order with
/// duplicates preserved: a label matched by three kinds appears three times.
/// Absent signals are skipped rather than looked up as empty strings.
pub fn match_signals<S>(store: &S, signals: &RequestSignals) -> Vec<String>
where
    S: ReferenceStore + ?Sized,
{
    let mut matches = Vec::new();
    for (kind, value) in signals.present() {
        let labels = store.lookup(kind, value);
        trace!(%kind, hits = labels.len(), "signal looked up");
        matches.extend(labels);
    }
    matches
}
