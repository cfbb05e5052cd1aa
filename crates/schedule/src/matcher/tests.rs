//! Tests for the occurrence matcher.

use super::*;

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
}

fn window(start: &str, end: &str) -> MatchWindow {
    MatchWindow::new(at(start), at(end)).unwrap()
}

fn run(expr: &str, start: &str, end: &str) -> Vec<NaiveDateTime> {
    let schedule = Schedule::parse(expr).unwrap();
    occurrences(&schedule, &window(start, end)).collect()
}

/// Reference scan: test every minute of the window.
fn brute_force(schedule: &Schedule, window: &MatchWindow) -> Vec<NaiveDateTime> {
    let mut out = Vec::new();
    let mut t = window.start();
    while t < window.end() {
        if schedule.fires_at(t) {
            out.push(t);
        }
        t += Duration::minutes(1);
    }
    out
}

// ── Window ──────────────────────────────────────────────────────────

#[test]
fn window_truncates_to_minutes() {
    let start = at("2025-01-01T10:07").with_second(42).unwrap();
    let end = at("2025-01-01T11:00").with_nanosecond(5).unwrap();
    let w = MatchWindow::new(start, end).unwrap();
    assert_eq!(w.start(), at("2025-01-01T10:07"));
    assert_eq!(w.end(), at("2025-01-01T11:00"));
    assert_eq!(w.minutes(), 53);
}

#[test]
fn inverted_window_is_rejected() {
    let err = MatchWindow::new(at("2025-01-02T00:00"), at("2025-01-01T00:00")).unwrap_err();
    assert!(matches!(err, WindowError::Inverted { .. }));
    assert!(MatchWindow::from_span(at("2025-01-02T00:00"), Duration::hours(-1)).is_err());
}

#[test]
fn from_span_adds_duration() {
    let w = MatchWindow::from_span(at("2025-01-01T00:00"), Duration::minutes(90)).unwrap();
    assert_eq!(w.end(), at("2025-01-01T01:30"));
    assert!(w.contains(at("2025-01-01T01:29")));
    assert!(!w.contains(at("2025-01-01T01:30")));
}

// ── Matching ────────────────────────────────────────────────────────

#[test]
fn zero_length_window_yields_nothing() {
    let w = window("2025-01-01T00:00", "2025-01-01T00:00");
    assert!(w.is_empty());
    let schedule = Schedule::parse("* * * * *").unwrap();
    assert_eq!(occurrences(&schedule, &w).count(), 0);
}

#[test]
fn every_fifteen_minutes_within_an_hour() {
    let hits = run("*/15 * * * *", "2025-01-01T10:00", "2025-01-01T11:00");
    assert_eq!(
        hits,
        vec![
            at("2025-01-01T10:00"),
            at("2025-01-01T10:15"),
            at("2025-01-01T10:30"),
            at("2025-01-01T10:45"),
        ]
    );
}

#[test]
fn end_is_exclusive_and_start_inclusive() {
    let hits = run("0 * * * *", "2025-01-01T10:00", "2025-01-01T12:00");
    assert_eq!(hits, vec![at("2025-01-01T10:00"), at("2025-01-01T11:00")]);
}

#[test]
fn unaligned_start_is_truncated_before_scanning() {
    let schedule = Schedule::parse("*/15 * * * *").unwrap();
    let start = at("2025-01-01T10:15").with_second(30).unwrap();
    let w = MatchWindow::new(start, at("2025-01-01T10:31")).unwrap();
    let hits: Vec<_> = occurrences(&schedule, &w).collect();
    assert_eq!(hits, vec![at("2025-01-01T10:15"), at("2025-01-01T10:30")]);
}

#[test]
fn day_disjunction_over_a_month() {
    // February 2025: Saturday the 1st plus Mondays 3, 10, 17, 24.
    let hits = run("0 0 1 * 1", "2025-02-01T00:00", "2025-03-01T00:00");
    assert_eq!(hits.len(), 5);
    assert_eq!(hits[0], at("2025-02-01T00:00"));
    assert_eq!(hits[4], at("2025-02-24T00:00"));
}

#[test]
fn day_disjunction_deduplicates_monday_the_first() {
    // September 2025: the 1st is a Monday; Mondays 1, 8, 15, 22, 29.
    let hits = run("0 0 1 * 1", "2025-09-01T00:00", "2025-10-01T00:00");
    assert_eq!(hits.len(), 5);
    assert_eq!(hits[0], at("2025-09-01T00:00"));
    assert_eq!(hits[1], at("2025-09-08T00:00"));
}

#[test]
fn leap_day_only_in_leap_years() {
    let hits = run("0 0 29 2 *", "2023-01-01T00:00", "2025-12-31T00:00");
    assert_eq!(hits, vec![at("2024-02-29T00:00")]);
}

#[test]
fn day_thirty_one_skips_short_months() {
    let hits = run("0 0 31 * *", "2025-01-01T00:00", "2026-01-01T00:00");
    let months: Vec<u32> = hits.iter().map(|t| t.month()).collect();
    assert_eq!(months, vec![1, 3, 5, 7, 8, 10, 12]);
}

#[test]
fn crosses_year_boundary() {
    let hits = run("30 23 31 12 *", "2024-12-30T00:00", "2025-01-02T00:00");
    assert_eq!(hits, vec![at("2024-12-31T23:30")]);

    let hits = run("0 0 1 1 *", "2024-12-31T00:00", "2025-01-02T00:00");
    assert_eq!(hits, vec![at("2025-01-01T00:00")]);
}

#[test]
fn restartable_and_idempotent() {
    let schedule = Schedule::parse("*/7 9-17 * * 1-5").unwrap();
    let w = window("2025-03-01T00:00", "2025-03-15T00:00");
    let first: Vec<_> = occurrences(&schedule, &w).collect();
    let second: Vec<_> = occurrences(&schedule, &w).collect();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn matches_minute_by_minute_scan() {
    let w = window("2024-02-20T22:13", "2024-03-05T03:00");
    for expr in [
        "* * * * *",
        "*/13 */5 * * *",
        "5,55 0,23 * * *",
        "0 12 28-31 * *",
        "10 10 1 * 4",
        "*/20 3 * 2 *",
        "59 23 29 2 *",
        "0-10/3 6-8 */3 * sun,wed",
        "@hourly",
    ] {
        let schedule = Schedule::parse(expr).unwrap();
        let fast: Vec<_> = occurrences(&schedule, &w).collect();
        assert_eq!(fast, brute_force(&schedule, &w), "mismatch for {expr}");
    }
}

#[test]
fn results_are_strictly_increasing() {
    let hits = run("*/10 * * * *", "2025-01-01T00:00", "2025-01-03T00:00");
    assert_eq!(hits.len(), 2 * 24 * 6);
    assert!(hits.windows(2).all(|pair| pair[0] < pair[1]));
}
