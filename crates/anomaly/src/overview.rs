use crate::anomaly::DetectionReport;
use chrono::{DateTime, Utc};
use configuration::AnomalySettings;
use core_types::{DetectionMethod, Direction, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_ANOMALY_SCORE: u32 = 100;

/// Overall state of a set of metrics, derived from the anomaly score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyStatus {
    Normal,
    Notable,
    Warning,
    Critical,
}

impl AnomalyStatus {
    pub fn from_score(score: u32) -> Self {
        match score {
            50.. => AnomalyStatus::Critical,
            25..=49 => AnomalyStatus::Warning,
            10..=24 => AnomalyStatus::Notable,
            _ => AnomalyStatus::Normal,
        }
    }
}

/// A warning or critical anomaly, tagged with the metric it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub metric: String,
    pub severity: Severity,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    pub direction: Direction,
    pub method: DetectionMethod,
}

/// Per-metric reports plus the combined 0-100 anomaly score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyOverview {
    pub reports: BTreeMap<String, DetectionReport>,
    /// Higher is worse.
    pub anomaly_score: u32,
    pub status: AnomalyStatus,
    pub alerts: Vec<Alert>,
}

impl AnomalyOverview {
    pub fn from_reports(reports: BTreeMap<String, DetectionReport>, settings: &AnomalySettings) -> Self {
        let anomaly_score = anomaly_score(reports.values(), settings);
        let alerts = reports
            .iter()
            .flat_map(|(metric, report)| {
                report
                    .anomalies
                    .iter()
                    .filter(|a| a.is_alertable())
                    .map(move |a| Alert {
                        metric: metric.clone(),
                        severity: a.severity,
                        value: a.value,
                        timestamp: a.timestamp,
                        direction: a.direction,
                        method: a.method,
                    })
            })
            .collect();

        Self {
            anomaly_score,
            status: AnomalyStatus::from_score(anomaly_score),
            alerts,
            reports,
        }
    }

    /// Total deduplicated anomalies across all metrics.
    pub fn total_anomalies(&self) -> usize {
        self.reports.values().map(|r| r.anomalies.len()).sum()
    }
}

/// `critical·10 + warning·5 + total·2`, capped at 100, over deduplicated anomalies.
pub fn anomaly_score<'a>(
    reports: impl IntoIterator<Item = &'a DetectionReport>,
    settings: &AnomalySettings,
) -> u32 {
    let weights = &settings.score;
    let raw: u64 = reports
        .into_iter()
        .flat_map(|r| r.anomalies.iter())
        .map(|a| {
            let by_severity = match a.severity {
                Severity::Critical => weights.per_critical,
                Severity::Warning => weights.per_warning,
                Severity::Notable => 0,
            };
            u64::from(by_severity) + u64::from(weights.per_anomaly)
        })
        .sum();
    raw.min(u64::from(MAX_ANOMALY_SCORE)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anomaly::Anomaly;
    use chrono::TimeZone;

    fn report(severities: &[Severity]) -> DetectionReport {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        DetectionReport {
            anomalies: severities
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    Anomaly::new(
                        i as f64,
                        t0 + chrono::Duration::days(i as i64),
                        DetectionMethod::ZScore,
                        *s,
                        Direction::Above,
                    )
                })
                .collect(),
            data_points: 30,
            ..DetectionReport::default()
        }
    }

    #[test]
    fn score_weights_severity() {
        let settings = AnomalySettings::default();
        let r = report(&[Severity::Critical, Severity::Warning, Severity::Notable]);
        // 10 + 5 + 3*2
        assert_eq!(anomaly_score([&r], &settings), 21);
        assert_eq!(AnomalyStatus::from_score(21), AnomalyStatus::Notable);
    }

    #[test]
    fn score_is_capped() {
        let settings = AnomalySettings::default();
        let r = report(&[Severity::Critical; 12]);
        assert_eq!(anomaly_score([&r], &settings), 100);
    }

    #[test]
    fn status_thresholds() {
        assert_eq!(AnomalyStatus::from_score(0), AnomalyStatus::Normal);
        assert_eq!(AnomalyStatus::from_score(9), AnomalyStatus::Normal);
        assert_eq!(AnomalyStatus::from_score(25), AnomalyStatus::Warning);
        assert_eq!(AnomalyStatus::from_score(50), AnomalyStatus::Critical);
    }

    #[test]
    fn alerts_cover_warning_and_critical_only() {
        let settings = AnomalySettings::default();
        let reports = BTreeMap::from([
            ("revenue".to_string(), report(&[Severity::Critical, Severity::Notable])),
            ("leads".to_string(), report(&[Severity::Warning])),
        ]);
        let overview = AnomalyOverview::from_reports(reports, &settings);
        assert_eq!(overview.alerts.len(), 2);
        assert_eq!(overview.alerts[0].metric, "leads");
        assert_eq!(overview.alerts[1].severity, Severity::Critical);
        assert_eq!(overview.total_anomalies(), 3);
        // 10 + 5 + 3*2
        assert_eq!(overview.anomaly_score, 21);
    }
}
