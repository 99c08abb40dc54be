mod helpers;

use helpers::{create_empty_tables, write_tables, TestResult};
use huginn_recon_lib::matching::match_signals;
use huginn_recon_lib::recon::identify;
use huginn_recon_lib::report::{Reporter, Surface, MAX_RANKED};
use huginn_recon_lib::{
    fingerprint, fingerprint_with_prefix, possibility_count, record_sample, MatchTally,
    RawHeaders, ReferenceStore, ReportMode, RequestSignals, SignalKind,
};
use std::fs;

fn chrome_request() -> RawHeaders {
    [
        ("Host", "example.com"),
        ("User-Agent", "Mozilla/5.0 Chrome/99.0"),
        ("Accept", "text/html,*/*;q=0.8"),
        ("Accept-Language", "en-US,en;q=0.9"),
        ("Accept-Encoding", "gzip, deflate, br"),
        ("Connection", "keep-alive"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_shared_value_first_seen_wins() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = write_tables(
        dir.path(),
        &[(SignalKind::UserAgent, "Alpha;TestBot/1.0\nBeta;TestBot/1.0\n")],
    )?;
    let signals = RequestSignals::new().with(SignalKind::UserAgent, "TestBot/1.0");
    assert_eq!(possibility_count(&signals), 1);

    assert_eq!(
        fingerprint(&signals, ReportMode::BestHitDetail, &store),
        "Alpha (100% with 1 hits)"
    );
    let list = fingerprint(&signals, ReportMode::List, &store);
    assert!(list.contains("Alpha: 1"));
    assert!(list.contains("Beta: 1"));
    Ok(())
}

#[test]
fn test_empty_request() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = create_empty_tables(dir.path())?;
    let signals = RequestSignals::from_headers(&RawHeaders::new());

    assert_eq!(possibility_count(&signals), 0);
    assert_eq!(fingerprint(&signals, ReportMode::parse("simple"), &store), "");
    assert_eq!(fingerprint(&signals, ReportMode::BestHitList, &store), "");
    assert_eq!(
        fingerprint(&signals, ReportMode::BestHitDetail, &store),
        " (100% with 0 hits)"
    );
    Ok(())
}

#[test]
fn test_two_signals_same_implementation() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = write_tables(
        dir.path(),
        &[
            (SignalKind::UserAgent, "Chrome99;Mozilla/5.0 Chrome/99.0\n"),
            (SignalKind::Te, "Chrome99;trailers\n"),
        ],
    )?;
    let signals = RequestSignals::new()
        .with(SignalKind::UserAgent, "Mozilla/5.0 Chrome/99.0")
        .with(SignalKind::Te, "trailers");

    let id = identify(&store, &signals);
    assert_eq!(id.tally, MatchTally::from_matches(["Chrome99", "Chrome99"]));
    assert_eq!(id.possibilities, 2);
    assert_eq!(
        fingerprint(&signals, ReportMode::BestHitDetail, &store),
        "Chrome99 (100% with 2 hits)"
    );
    Ok(())
}

#[test]
fn test_unreadable_table_does_not_blank_others() -> TestResult {
    let dir = tempfile::tempdir()?;
    // accept.fdb is a directory, so reading it fails
    let store = write_tables(dir.path(), &[(SignalKind::UserAgent, "Alpha;TestBot/1.0\n")])?;
    fs::create_dir(store.table_path(SignalKind::Accept))?;

    let signals = RequestSignals::new()
        .with(SignalKind::UserAgent, "TestBot/1.0")
        .with(SignalKind::Accept, "*/*");
    assert_eq!(
        fingerprint(&signals, ReportMode::BestHitDetail, &store),
        "Alpha (50% with 1 hits)"
    );
    Ok(())
}

#[test]
fn test_tally_sums_matcher_pairs_and_respects_possibilities() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = write_tables(
        dir.path(),
        &[
            (SignalKind::UserAgent, "Chrome99;Mozilla/5.0 Chrome/99.0\nEdge99;Mozilla/5.0 Chrome/99.0\n"),
            (SignalKind::Accept, "Chrome99;text/html,*/*;q=0.8\nFirefox;text/html,*/*;q=0.8\n"),
            (SignalKind::AcceptEncoding, "Chrome99;gzip, deflate, br\nEdge99;gzip, deflate, br\n"),
            (SignalKind::Connection, "Chrome99;keep-alive\nFirefox;keep-alive\nEdge99;keep-alive\n"),
            (
                SignalKind::HeaderOrder,
                "Chrome99;Host, User-Agent, Accept, Accept-Language, Accept-Encoding, Connection\n",
            ),
        ],
    )?;
    let signals = RequestSignals::from_headers(&chrome_request());
    let possibilities = possibility_count(&signals);
    assert_eq!(possibilities, 6);

    let matches = match_signals(&store, &signals);
    let tally = MatchTally::from_matches(&matches);
    assert_eq!(tally.total_hits(), matches.len());
    assert!(tally.iter().all(|(_, count)| count <= possibilities));
    assert_eq!(tally.get("Chrome99"), Some(5));
    assert_eq!(tally.get("Edge99"), Some(3));
    assert_eq!(tally.get("Firefox"), Some(2));

    let ranked = Reporter::new(Surface::Text).render(&tally, ReportMode::BestHitList, possibilities);
    assert_eq!(
        ranked,
        "1. Chrome99 (83.33% with 5 hits)\n2. Edge99 (50% with 3 hits)\n3. Firefox (33.33% with 2 hits)\n"
    );
    Ok(())
}

#[test]
fn test_ranking_never_exceeds_ten_entries() -> TestResult {
    let dir = tempfile::tempdir()?;
    let rows: String = (0..25).map(|i| format!("Bot{i:02};TestBot/1.0\n")).collect();
    let store = write_tables(dir.path(), &[(SignalKind::UserAgent, &rows)])?;
    let signals = RequestSignals::new().with(SignalKind::UserAgent, "TestBot/1.0");

    let ranked = fingerprint(&signals, ReportMode::BestHitList, &store);
    let lines: Vec<&str> = ranked.split("<br>\n").filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), MAX_RANKED);
    assert!(lines.iter().all(|l| !l.contains("with 0 hits")));
    Ok(())
}

#[test]
fn test_record_sample_twice_stores_once() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = create_empty_tables(dir.path())?;
    let signals = RequestSignals::from_headers(&chrome_request());

    let first = record_sample(&store, &signals, "Chrome99");
    let second = record_sample(&store, &signals, "Chrome99");
    assert_eq!(first, 6);
    assert_eq!(second, 0);

    for kind in SignalKind::ALL {
        let records = store.records(kind)?;
        let expected = usize::from(signals.get(kind).is_some());
        assert_eq!(records.len(), expected, "table {kind}");
    }
    assert_eq!(store.lookup(SignalKind::Connection, "keep-alive"), vec!["Chrome99"]);
    Ok(())
}

#[test]
fn test_fingerprint_with_prefix_matches_raw_headers() -> TestResult {
    let dir = tempfile::tempdir()?;
    let prefix = format!("{}/lab-", dir.path().display());
    fs::write(format!("{prefix}user-agent.fdb"), "Chrome99;Mozilla/5.0 Chrome/99.0\n")?;

    let raw = RawHeaders::parse(
        "GET / HTTP/1.1\r\nHost: example.com\r\nuser-agent: Mozilla/5.0 Chrome/99.0\r\n\r\n",
    )?;
    assert_eq!(
        fingerprint_with_prefix(&raw, "besthitdetail", &prefix),
        "Chrome99 (50% with 1 hits)"
    );
    assert_eq!(fingerprint_with_prefix(&raw, "unheard-of", &prefix), "Chrome99");
    Ok(())
}
