use std::time::Duration;

use chrono::{Datelike, NaiveDate, Utc};
use rand::Rng;

/// Source of "now" for anything that compares against the calendar.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
    fn now_millis(&self) -> i64;

    /// `(year, month)` of today, month in 1..=12.
    fn current_month(&self) -> (i32, u32) {
        let today = self.today();
        (today.year(), today.month())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock pinned to one day, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        Self::new(NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn now_millis(&self) -> i64 {
        self.today
            .and_hms_opt(12, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or_default()
    }
}

/// Simulated round-trip delay of the mock services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latency {
    /// Resolve immediately.
    Instant,
    Fixed(Duration),
    /// Uniform delay in `[min, max]`.
    Random { min: Duration, max: Duration },
}

impl Latency {
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        match (min_ms, max_ms) {
            (0, 0) => Latency::Instant,
            (min, max) if max <= min => Latency::Fixed(Duration::from_millis(min)),
            (min, max) => Latency::Random {
                min: Duration::from_millis(min),
                max: Duration::from_millis(max),
            },
        }
    }

    pub fn sample(&self) -> Duration {
        match *self {
            Latency::Instant => Duration::ZERO,
            Latency::Fixed(d) => d,
            Latency::Random { min, max } => {
                let ms = rand::thread_rng().gen_range(min.as_millis()..=max.as_millis());
                Duration::from_millis(ms as u64)
            }
        }
    }

    pub async fn pause(&self) {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Latency::Random {
            min: Duration::from_millis(500),
            max: Duration::from_millis(1500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_month() {
        let clock = FixedClock::ymd(2026, 3, 31);
        assert_eq!(clock.current_month(), (2026, 3));
    }

    #[test]
    fn latency_from_millis() {
        assert_eq!(Latency::from_millis(0, 0), Latency::Instant);
        assert_eq!(Latency::from_millis(200, 100), Latency::Fixed(Duration::from_millis(200)));
        let random = Latency::from_millis(10, 20);
        for _ in 0..20 {
            let d = random.sample();
            assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(20));
        }
    }

    #[tokio::test]
    async fn instant_latency_does_not_sleep() {
        let started = std::time::Instant::now();
        Latency::Instant.pause().await;
        assert!(started.elapsed() < Duration::from_millis(50));
    }
}
