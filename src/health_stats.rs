//! Health statistics for the exporter.
//!
//! Tracks scrape outcomes and API fetch performance across the lifetime of
//! the process, for display on the `/health` endpoint.

use std::fmt::Write as FmtWrite;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock as StdRwLock};
use std::time::{Instant, SystemTime};

use crate::exporter::{FetchOutcome, ScrapeReport};

/// Running statistics for a single metric.
#[derive(Clone, Copy, Default)]
pub struct RunningStat {
    count: u64,
    sum: f64,
    min: f64,
    max: f64,
    last: f64,
}

impl RunningStat {
    pub fn add(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
            self.last = value;
            self.sum = value;
            self.count = 1;
            return;
        }
        self.count += 1;
        self.sum += value;
        self.last = value;
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    pub fn avg(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / (self.count as f64)
        }
    }
}

/// Thread-safe wrapper for running statistics.
#[derive(Default)]
pub struct Stat {
    inner: Mutex<RunningStat>,
}

impl Stat {
    pub fn add_sample(&self, value: f64) {
        if let Ok(mut s) = self.inner.lock() {
            s.add(value);
        }
    }

    /// Returns (last, avg, max, min, count).
    pub fn snapshot(&self) -> (f64, f64, f64, f64, u64) {
        if let Ok(s) = self.inner.lock() {
            (s.last, s.avg(), s.max, s.min, s.count)
        } else {
            (0.0, 0.0, 0.0, 0.0, 0)
        }
    }
}

/// Exporter health statistics.
pub struct HealthStats {
    // Scrapes
    pub total_scrapes: AtomicU64,
    pub samples_per_scrape: Stat,
    pub scrape_duration_seconds: Stat,

    // Ecobee API
    pub fetch_time_seconds: Stat,
    pub thermostat_fetch_failures: AtomicU64,
    pub summary_fetch_failures: AtomicU64,
    pub thermostats: Stat,

    // Data quality
    pub data_errors: AtomicU64,

    // Timing
    pub start_time: Instant,
    pub last_scrape_time: StdRwLock<Option<Instant>>,
    /// Whether the most recent scrape reached the API successfully.
    last_scrape_ok: StdRwLock<Option<bool>>,
}

impl Default for HealthStats {
    fn default() -> Self {
        Self {
            total_scrapes: AtomicU64::new(0),
            samples_per_scrape: Stat::default(),
            scrape_duration_seconds: Stat::default(),
            fetch_time_seconds: Stat::default(),
            thermostat_fetch_failures: AtomicU64::new(0),
            summary_fetch_failures: AtomicU64::new(0),
            thermostats: Stat::default(),
            data_errors: AtomicU64::new(0),
            start_time: Instant::now(),
            last_scrape_time: StdRwLock::new(None),
            last_scrape_ok: StdRwLock::new(None),
        }
    }
}

impl HealthStats {
    pub fn new() -> Self {
        Default::default()
    }

    /// Records the outcome of one scrape.
    pub fn record_scrape(&self, report: &ScrapeReport, samples: usize, duration_seconds: f64) {
        self.total_scrapes.fetch_add(1, Ordering::Relaxed);
        self.samples_per_scrape.add_sample(samples as f64);
        self.scrape_duration_seconds.add_sample(duration_seconds);
        self.fetch_time_seconds
            .add_sample(report.fetch_time.as_secs_f64());
        self.data_errors
            .fetch_add(report.data_errors as u64, Ordering::Relaxed);

        match &report.thermostats {
            FetchOutcome::Fetched(n) => self.thermostats.add_sample(*n as f64),
            FetchOutcome::Failed(_) => {
                self.thermostat_fetch_failures
                    .fetch_add(1, Ordering::Relaxed);
            }
            FetchOutcome::Skipped => {}
        }
        if report.summary.is_failed() {
            self.summary_fetch_failures.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut guard) = self.last_scrape_time.write() {
            *guard = Some(Instant::now());
        }
        if let Ok(mut guard) = self.last_scrape_ok.write() {
            *guard = Some(!report.thermostats.is_failed());
        }
    }

    /// False only if the most recent scrape failed to fetch thermostats.
    pub fn is_healthy(&self) -> bool {
        self.last_scrape_ok
            .read()
            .map(|g| g.unwrap_or(true))
            .unwrap_or(false)
    }

    pub fn get_uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn get_last_scrape_time_str(&self) -> String {
        const SECS_PER_DAY: u64 = 86400;
        const SECS_PER_HOUR: u64 = 3600;
        const SECS_PER_MINUTE: u64 = 60;

        if let Ok(guard) = self.last_scrape_time.read() {
            if let Some(last) = *guard {
                let elapsed = last.elapsed();
                if let Ok(duration) = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH) {
                    let secs = duration.as_secs().saturating_sub(elapsed.as_secs());
                    let hours = (secs % SECS_PER_DAY) / SECS_PER_HOUR;
                    let minutes = (secs % SECS_PER_HOUR) / SECS_PER_MINUTE;
                    let seconds = secs % SECS_PER_MINUTE;
                    return format!("{:02}:{:02}:{:02} UTC", hours, minutes, seconds);
                }
            }
        }
        "N/A".to_string()
    }

    pub fn render_table(&self) -> String {
        let left_col = 26usize;
        let col_w = 12usize;

        let mut out = String::new();
        let row = |out: &mut String, name: &str, stat: &Stat, precision: usize| {
            let (cur, avg, max, min, _) = stat.snapshot();
            writeln!(
                out,
                "{:left$} | {:^col$} | {:^col$} | {:^col$} | {:^col$}",
                name,
                format!("{:.p$}", cur, p = precision),
                format!("{:.p$}", avg, p = precision.max(1)),
                format!("{:.p$}", max, p = precision),
                format!("{:.p$}", min, p = precision),
                left = left_col,
                col = col_w
            )
            .ok();
        };

        writeln!(out, "HEALTH ENDPOINT - EXPORTER INTERNAL STATS").ok();
        writeln!(out, "==========================================").ok();
        writeln!(out).ok();
        writeln!(
            out,
            "{:left$} | {:^col$} | {:^col$} | {:^col$} | {:^col$}",
            "",
            "current",
            "average",
            "max",
            "min",
            left = left_col,
            col = col_w
        )
        .ok();

        writeln!(out).ok();
        writeln!(out, "SCRAPES").ok();
        writeln!(out, "-------").ok();
        row(&mut out, "samples", &self.samples_per_scrape, 0);
        row(&mut out, "scrape_duration (s)", &self.scrape_duration_seconds, 3);

        writeln!(out).ok();
        writeln!(out, "ECOBEE API").ok();
        writeln!(out, "----------").ok();
        row(&mut out, "fetch_time (s)", &self.fetch_time_seconds, 3);
        row(&mut out, "thermostats", &self.thermostats, 0);

        writeln!(out).ok();
        writeln!(out, "COUNTERS").ok();
        writeln!(out, "--------").ok();
        for (name, counter) in [
            ("total_scrapes", &self.total_scrapes),
            ("thermostat_fetch_failures", &self.thermostat_fetch_failures),
            ("summary_fetch_failures", &self.summary_fetch_failures),
            ("data_errors", &self.data_errors),
        ] {
            writeln!(
                out,
                "{:left$} | {:>col$}",
                name,
                counter.load(Ordering::Relaxed),
                left = left_col,
                col = col_w
            )
            .ok();
        }

        writeln!(out).ok();
        writeln!(out, "Last scrape: {}", self.get_last_scrape_time_str()).ok();
        out
    }
}
