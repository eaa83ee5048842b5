//! Integration tests for health stats module.
//!
//! These tests verify that HealthStats tracks scrape outcomes and renders
//! them on the health table.

use ecobee_exporter::{FetchOutcome, HealthStats, ScrapeReport};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

fn report(thermostats: FetchOutcome, summary: FetchOutcome, data_errors: usize) -> ScrapeReport {
    ScrapeReport {
        fetch_time: Duration::from_millis(250),
        thermostats,
        summary,
        data_errors,
    }
}

#[test]
fn test_health_stats_initialize() {
    let stats = HealthStats::new();

    assert_eq!(stats.total_scrapes.load(Ordering::Relaxed), 0);
    assert_eq!(stats.data_errors.load(Ordering::Relaxed), 0);
    let (cur, avg, _, _, count) = stats.fetch_time_seconds.snapshot();
    assert_eq!(count, 0);
    assert_eq!(cur, 0.0);
    assert_eq!(avg, 0.0);

    // No scrape yet counts as healthy.
    assert!(stats.is_healthy());
    assert_eq!(stats.get_last_scrape_time_str(), "N/A");
}

#[test]
fn test_record_successful_scrape() {
    let stats = HealthStats::new();
    stats.record_scrape(
        &report(FetchOutcome::Fetched(2), FetchOutcome::Fetched(2), 1),
        20,
        0.3,
    );

    assert_eq!(stats.total_scrapes.load(Ordering::Relaxed), 1);
    assert_eq!(stats.data_errors.load(Ordering::Relaxed), 1);
    assert_eq!(stats.thermostat_fetch_failures.load(Ordering::Relaxed), 0);

    let (cur, _, _, _, count) = stats.thermostats.snapshot();
    assert_eq!(cur, 2.0);
    assert_eq!(count, 1);

    let (fetch, _, _, _, _) = stats.fetch_time_seconds.snapshot();
    assert_eq!(fetch, 0.25);
    assert!(stats.is_healthy());
    assert_ne!(stats.get_last_scrape_time_str(), "N/A");
}

#[test]
fn test_failed_primary_fetch_is_unhealthy() {
    let stats = HealthStats::new();
    stats.record_scrape(
        &report(FetchOutcome::Failed("timeout".into()), FetchOutcome::Skipped, 0),
        1,
        30.0,
    );

    assert!(!stats.is_healthy());
    assert_eq!(stats.thermostat_fetch_failures.load(Ordering::Relaxed), 1);
    assert_eq!(stats.summary_fetch_failures.load(Ordering::Relaxed), 0);

    // Recovers on the next good scrape.
    stats.record_scrape(
        &report(FetchOutcome::Fetched(1), FetchOutcome::Failed("500".into()), 0),
        8,
        0.5,
    );
    assert!(stats.is_healthy());
    assert_eq!(stats.summary_fetch_failures.load(Ordering::Relaxed), 1);
}

#[test]
fn test_render_table_sections() {
    let stats = HealthStats::new();
    stats.record_scrape(
        &report(FetchOutcome::Fetched(1), FetchOutcome::Fetched(1), 0),
        12,
        0.4,
    );

    let table = stats.render_table();
    assert!(table.contains("HEALTH ENDPOINT - EXPORTER INTERNAL STATS"));
    assert!(table.contains("SCRAPES"));
    assert!(table.contains("ECOBEE API"));
    assert!(table.contains("fetch_time (s)"));
    assert!(table.contains("thermostat_fetch_failures"));
}

#[test]
fn test_concurrent_recording() {
    let stats = Arc::new(HealthStats::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let stats = Arc::clone(&stats);
            std::thread::spawn(move || {
                for _ in 0..25 {
                    stats.record_scrape(
                        &report(FetchOutcome::Fetched(1), FetchOutcome::Fetched(1), 1),
                        10,
                        0.1,
                    );
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(stats.total_scrapes.load(Ordering::Relaxed), 100);
    assert_eq!(stats.data_errors.load(Ordering::Relaxed), 100);
}
