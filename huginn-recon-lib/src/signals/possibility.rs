use super::extractor::RequestSignals;

/// Number of signals this request could possibly match on
///
/// Counts the non-empty header-derived kinds plus the header order, so the
/// result lies in `0..=14`. Used as the denominator of hit accuracy.
pub fn count_hit_possibilities(signals: &RequestSignals) -> usize {
    signals.present().count()
}
