use crate::anomaly::DetectionReport;
use crate::detectors::{Detector, standard_detectors};
use crate::error::AnomalyError;
use crate::overview::AnomalyOverview;
use crate::reconcile::reconcile;
use configuration::AnomalySettings;
use core_types::{Severity, TimeSeries};
use statistics::Summary;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Runs the detector ensemble over a metric series and reconciles the findings.
pub struct AnomalyDetector {
    settings: AnomalySettings,
    detectors: Vec<Box<dyn Detector>>,
}

impl AnomalyDetector {
    /// Builds the standard four-detector ensemble. The settings are validated first.
    pub fn new(settings: AnomalySettings) -> Result<Self, AnomalyError> {
        settings
            .validate()
            .map_err(|e| AnomalyError::InvalidSettings(e.to_string()))?;
        let detectors = standard_detectors(&settings);
        Ok(Self {
            settings,
            detectors,
        })
    }

    /// Uses a custom detector set. Findings are reconciled in the order given.
    pub fn with_detectors(settings: AnomalySettings, detectors: Vec<Box<dyn Detector>>) -> Self {
        Self {
            settings,
            detectors,
        }
    }

    pub fn settings(&self) -> &AnomalySettings {
        &self.settings
    }

    /// Detects anomalies in one series with the detector's own settings.
    ///
    /// The series must be in chronological order and hold only finite values; a
    /// series shorter than the configured minimum yields a report flagged
    /// `insufficient_data` rather than an error.
    pub fn detect(&self, series: &TimeSeries) -> Result<DetectionReport, AnomalyError> {
        self.detect_with(series, None)
    }

    /// Like [`detect`](Self::detect), but `options` replaces the settings for this
    /// call only. Overrides are validated and run through the standard detectors.
    #[tracing::instrument(skip(self, series, options), fields(points = series.len(), overridden = options.is_some()))]
    pub fn detect_with(
        &self,
        series: &TimeSeries,
        options: Option<&AnomalySettings>,
    ) -> Result<DetectionReport, AnomalyError> {
        match options {
            None => run(series, &self.settings, &self.detectors),
            Some(settings) => {
                settings
                    .validate()
                    .map_err(|e| AnomalyError::InvalidSettings(e.to_string()))?;
                run(series, settings, &standard_detectors(settings))
            }
        }
    }

    /// Detects anomalies in several named metrics and scores the combined result.
    pub fn detect_many(
        &self,
        metrics: &BTreeMap<String, TimeSeries>,
    ) -> Result<AnomalyOverview, AnomalyError> {
        let mut reports = BTreeMap::new();
        for (metric, series) in metrics {
            let report = self.detect(series)?;
            reports.insert(metric.clone(), report);
        }
        Ok(AnomalyOverview::from_reports(reports, &self.settings))
    }
}

fn run(
    series: &TimeSeries,
    settings: &AnomalySettings,
    detectors: &[Box<dyn Detector>],
) -> Result<DetectionReport, AnomalyError> {
    series.ensure_chronological()?;
    series.ensure_finite()?;

    if series.len() < settings.min_data_points {
        debug!(
            required = settings.min_data_points,
            "Series too short for anomaly detection"
        );
        return Ok(DetectionReport::insufficient(series.len()));
    }

    let values = series.values();
    let summary = Summary::from_values(&values);

    let mut per_method_counts = BTreeMap::new();
    let mut findings = Vec::new();
    for detector in detectors {
        let found = detector.detect(series.samples(), &summary);
        debug!(method = %detector.method(), count = found.len(), "Detector finished");
        per_method_counts.insert(detector.method(), found.len());
        findings.extend(found);
    }

    let anomalies = reconcile(findings);
    let report = DetectionReport {
        anomalies,
        per_method_counts,
        statistics: Some(summary),
        data_points: series.len(),
        insufficient_data: false,
    };

    info!(
        anomalies = report.anomalies.len(),
        critical = report.count(Severity::Critical),
        warning = report.count(Severity::Warning),
        "Anomaly detection complete"
    );
    Ok(report)
}

impl std::fmt::Debug for AnomalyDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnomalyDetector")
            .field("settings", &self.settings)
            .field(
                "detectors",
                &self.detectors.iter().map(|d| d.method()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use core_types::{CoreError, DetectionMethod, MetricSample};

    fn start() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn detector() -> AnomalyDetector {
        AnomalyDetector::new(AnomalySettings::default()).unwrap()
    }

    #[test]
    fn short_series_is_insufficient_not_an_error() {
        let series = TimeSeries::daily(start(), &[1.0, 2.0, 3.0]);
        let report = detector().detect(&series).unwrap();
        assert!(report.insufficient_data);
        assert!(report.anomalies.is_empty());
        assert!(report.statistics.is_none());
        assert_eq!(report.data_points, 3);
    }

    #[test]
    fn constant_series_is_quiet() {
        let series = TimeSeries::daily(start(), &[10.0; 10]);
        let report = detector().detect(&series).unwrap();
        assert!(!report.insufficient_data);
        assert!(report.anomalies.is_empty());
        for method in DetectionMethod::ALL {
            assert_eq!(report.per_method_counts[&method], 0);
        }
    }

    #[test]
    fn unordered_series_is_rejected() {
        let t0 = start();
        let mut samples: Vec<MetricSample> = (0..12)
            .map(|i| MetricSample::new(1.0, t0 + Duration::days(i)))
            .collect();
        samples.swap(3, 7);
        let err = detector().detect(&TimeSeries::new(samples)).unwrap_err();
        assert!(matches!(
            err,
            AnomalyError::InvalidSeries(CoreError::UnorderedSeries { .. })
        ));
    }

    #[test]
    fn nan_is_rejected() {
        let mut values = vec![5.0; 12];
        values[4] = f64::NAN;
        let err = detector()
            .detect(&TimeSeries::daily(start(), &values))
            .unwrap_err();
        assert!(matches!(
            err,
            AnomalyError::InvalidSeries(CoreError::NonFiniteValue { index: 4, .. })
        ));
    }

    #[test]
    fn invalid_settings_are_refused() {
        let settings = AnomalySettings {
            z_notable: 5.0,
            ..AnomalySettings::default()
        };
        assert!(matches!(
            AnomalyDetector::new(settings),
            Err(AnomalyError::InvalidSettings(_))
        ));
    }

    #[test]
    fn counts_are_reported_before_deduplication() {
        let mut values = vec![100.0, 101.0, 99.0, 100.0, 102.0, 98.0, 100.0, 101.0, 99.0, 100.0];
        values.extend([101.0, 99.0, 100.0, 102.0, 98.0, 100.0, 101.0, 99.0, 100.0, 100.0]);
        values[10] = 400.0;
        let report = detector()
            .detect(&TimeSeries::daily(start(), &values))
            .unwrap();
        let total: usize = report.per_method_counts.values().sum();
        assert!(total > report.anomalies.len());
        let spike: Vec<_> = report.anomalies.iter().filter(|a| a.value == 400.0).collect();
        assert_eq!(spike.len(), 1);
        assert_eq!(spike[0].severity, Severity::Critical);
        assert!(spike[0].flagged_by.contains(&DetectionMethod::ZScore));
        assert!(spike[0].flagged_by.contains(&DetectionMethod::Spc));
    }

    #[test]
    fn per_call_settings_replace_the_defaults() {
        let series = TimeSeries::daily(start(), &[10.0, 11.0, 9.0, 10.0, 40.0]);
        assert!(detector().detect(&series).unwrap().insufficient_data);

        let relaxed = AnomalySettings {
            min_data_points: 5,
            ..AnomalySettings::default()
        };
        let report = detector().detect_with(&series, Some(&relaxed)).unwrap();
        assert!(!report.insufficient_data);
        assert_eq!(report.data_points, 5);
        assert!(report.anomalies.iter().any(|a| a.value == 40.0));
    }

    #[test]
    fn invalid_per_call_settings_are_refused() {
        let series = TimeSeries::daily(start(), &[10.0; 12]);
        let broken = AnomalySettings {
            min_data_points: 1,
            ..AnomalySettings::default()
        };
        assert!(matches!(
            detector().detect_with(&series, Some(&broken)),
            Err(AnomalyError::InvalidSettings(_))
        ));
    }
}
