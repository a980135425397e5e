//! Health reporting across all providers.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::core::models::CallOutcome;
use crate::core::provider::Provider;

fn serialize_secs<S: Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// Result of one provider probe.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub provider: Provider,
    pub status: CallOutcome,
    #[serde(rename = "elapsed_seconds", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    /// True iff the probe produced usable data, live or mocked.
    pub available: bool,
}

/// Snapshot of provider availability across the whole configured set.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// Percentage of providers available, rounded to 2 decimals.
    pub overall_health: f64,
    pub available_count: usize,
    pub total_count: usize,
    pub probes: Vec<ProbeReport>,
    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    /// Aggregate per-provider probes into an overall report.
    #[must_use]
    pub fn from_probes(probes: Vec<ProbeReport>) -> Self {
        let total_count = probes.len();
        let available_count = probes.iter().filter(|p| p.available).count();
        let overall_health = if total_count == 0 {
            0.0
        } else {
            let raw = available_count as f64 / total_count as f64 * 100.0;
            (raw * 100.0).round() / 100.0
        };

        Self {
            overall_health,
            available_count,
            total_count,
            probes,
            checked_at: Utc::now(),
        }
    }

    /// Whether every configured provider is available.
    #[must_use]
    pub fn all_available(&self) -> bool {
        self.available_count == self.total_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(provider: Provider, status: CallOutcome) -> ProbeReport {
        ProbeReport {
            provider,
            status,
            elapsed: Duration::from_millis(10),
            available: status.is_usable(),
        }
    }

    #[test]
    fn empty_probe_set_reports_zero_health() {
        let report = HealthReport::from_probes(Vec::new());
        assert!((report.overall_health).abs() < f64::EPSILON);
        assert_eq!(report.total_count, 0);
    }

    #[test]
    fn mock_substituted_probes_count_as_available() {
        let report = HealthReport::from_probes(vec![
            probe(Provider::ClimateTrace, CallOutcome::MockData),
            probe(Provider::WorldBank, CallOutcome::Success),
        ]);
        assert_eq!(report.available_count, 2);
        assert!((report.overall_health - 100.0).abs() < f64::EPSILON);
        assert!(report.all_available());
    }

    #[test]
    fn failing_probe_lowers_the_percentage() {
        let report = HealthReport::from_probes(vec![
            probe(Provider::ClimateTrace, CallOutcome::Success),
            probe(Provider::WorldBank, CallOutcome::Timeout),
            probe(Provider::UnSdg, CallOutcome::Failure),
        ]);
        assert_eq!(report.available_count, 1);
        assert!((report.overall_health - 33.33).abs() < f64::EPSILON);
        assert!(!report.all_available());
    }
}
