//! Call statistics.
//!
//! Process-lifetime counters owned by the client instance that created
//! them; nothing here is global or persisted. The client bumps the total
//! counter when a call is dispatched ([`RunningStats::record_attempt`])
//! and classifies the result afterwards ([`RunningStats::record`]); a
//! hybrid substitution records both the live failure and the mock
//! substitution against a single attempt.

use std::time::Duration;

use serde::Serialize;

use crate::core::models::CallOutcome;

/// Running counters and the incremental latency mean.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningStats {
    total_calls: u64,
    successful_calls: u64,
    failed_calls: u64,
    mock_calls: u64,
    /// Mean latency of successful calls, in seconds.
    average_response_time: f64,
}

/// Point-in-time view of the counters with derived rates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub total_calls: u64,
    pub successful_calls: u64,
    pub failed_calls: u64,
    pub mock_calls: u64,
    /// Mean latency of successful calls, in seconds.
    pub average_response_time: f64,
    /// Percentage of calls that succeeded live, rounded to 2 decimals.
    pub success_rate: f64,
    /// Percentage of calls that failed, rounded to 2 decimals.
    pub failure_rate: f64,
    /// Percentage of calls answered with mock data, rounded to 2 decimals.
    pub mock_rate: f64,
}

impl RunningStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one dispatched call, before its outcome is known.
    pub fn record_attempt(&mut self) {
        self.total_calls += 1;
    }

    /// Record a classified outcome.
    ///
    /// Successful calls fold their latency into the running mean using
    /// `new_mean = (old_mean * (n - 1) + x) / n`; no history is kept.
    pub fn record(&mut self, outcome: CallOutcome, elapsed: Duration) {
        match outcome {
            CallOutcome::Success => {
                self.successful_calls += 1;
                let n = self.successful_calls as f64;
                let x = elapsed.as_secs_f64();
                self.average_response_time = (self.average_response_time * (n - 1.0) + x) / n;
            }
            CallOutcome::Failure | CallOutcome::Timeout | CallOutcome::RateLimited => {
                self.failed_calls += 1;
            }
            CallOutcome::MockData => {
                self.mock_calls += 1;
            }
        }
    }

    /// Zero all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current counters plus derived rates. Never divides by zero: a
    /// fresh instance reports all-zero counts and rates.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        let (success_rate, failure_rate, mock_rate) = if self.total_calls == 0 {
            (0.0, 0.0, 0.0)
        } else {
            let total = self.total_calls as f64;
            (
                round2(self.successful_calls as f64 / total * 100.0),
                round2(self.failed_calls as f64 / total * 100.0),
                round2(self.mock_calls as f64 / total * 100.0),
            )
        };

        StatsSnapshot {
            total_calls: self.total_calls,
            successful_calls: self.successful_calls,
            failed_calls: self.failed_calls,
            mock_calls: self.mock_calls,
            average_response_time: self.average_response_time,
            success_rate,
            failure_rate,
            mock_rate,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_snapshot_is_all_zero() {
        let stats = RunningStats::new();
        let snap = stats.snapshot();
        assert_eq!(snap.total_calls, 0);
        assert_eq!(snap.successful_calls, 0);
        assert!((snap.success_rate).abs() < f64::EPSILON);
        assert!((snap.average_response_time).abs() < f64::EPSILON);
    }

    #[test]
    fn running_mean_matches_arithmetic_mean() {
        let mut stats = RunningStats::new();
        let latencies = [0.120, 0.340, 0.055, 1.200, 0.010];
        for latency in latencies {
            stats.record_attempt();
            stats.record(CallOutcome::Success, Duration::from_secs_f64(latency));
        }

        let expected: f64 = latencies.iter().sum::<f64>() / latencies.len() as f64;
        let snap = stats.snapshot();
        assert!((snap.average_response_time - expected).abs() < 1e-12);
        assert_eq!(snap.successful_calls, 5);
    }

    #[test]
    fn failures_do_not_touch_the_mean() {
        let mut stats = RunningStats::new();
        stats.record_attempt();
        stats.record(CallOutcome::Success, Duration::from_secs_f64(0.5));
        stats.record_attempt();
        stats.record(CallOutcome::Timeout, Duration::from_secs(30));
        stats.record_attempt();
        stats.record(CallOutcome::RateLimited, Duration::from_secs_f64(0.2));

        let snap = stats.snapshot();
        assert!((snap.average_response_time - 0.5).abs() < f64::EPSILON);
        assert_eq!(snap.failed_calls, 2);
    }

    #[test]
    fn rates_are_rounded_percentages() {
        let mut stats = RunningStats::new();
        for _ in 0..3 {
            stats.record_attempt();
        }
        stats.record(CallOutcome::Success, Duration::from_millis(10));
        stats.record(CallOutcome::Failure, Duration::from_millis(10));
        stats.record(CallOutcome::MockData, Duration::from_millis(1));

        let snap = stats.snapshot();
        assert!((snap.success_rate - 33.33).abs() < f64::EPSILON);
        assert!((snap.failure_rate - 33.33).abs() < f64::EPSILON);
        assert!((snap.mock_rate - 33.33).abs() < f64::EPSILON);
    }

    #[test]
    fn hybrid_substitution_counts_failure_and_mock_against_one_attempt() {
        let mut stats = RunningStats::new();
        stats.record_attempt();
        stats.record(CallOutcome::Timeout, Duration::from_secs(30));
        stats.record(CallOutcome::MockData, Duration::from_millis(1));

        let snap = stats.snapshot();
        assert_eq!(snap.total_calls, 1);
        assert_eq!(snap.failed_calls, 1);
        assert_eq!(snap.mock_calls, 1);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut stats = RunningStats::new();
        stats.record_attempt();
        stats.record(CallOutcome::Success, Duration::from_millis(100));
        stats.reset();
        assert_eq!(stats.snapshot(), RunningStats::new().snapshot());
    }
}
