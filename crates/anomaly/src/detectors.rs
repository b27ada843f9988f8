use crate::anomaly::Anomaly;
use configuration::AnomalySettings;
use core_types::{DetectionMethod, Direction, MetricSample, Severity};
use statistics::{Summary, population_std_dev};

/// The rolling window is at most this fraction (1/n) of the series.
const MOVING_AVERAGE_WINDOW_FRACTION: usize = 3;

/// One statistical outlier test.
///
/// Detectors are stateless and see the whole series plus its summary, which the
/// ensemble computes once per call. The `Send + Sync` bounds let a detector set be
/// shared across threads.
pub trait Detector: Send + Sync {
    fn method(&self) -> DetectionMethod;

    fn detect(&self, samples: &[MetricSample], summary: &Summary) -> Vec<Anomaly>;
}

/// Flags points by their distance from the mean in standard deviations.
#[derive(Debug, Clone)]
pub struct ZScoreDetector {
    pub critical: f64,
    pub warning: f64,
    pub notable: f64,
}

impl ZScoreDetector {
    fn classify(&self, z: f64) -> Option<Severity> {
        if z >= self.critical {
            Some(Severity::Critical)
        } else if z >= self.warning {
            Some(Severity::Warning)
        } else if z >= self.notable {
            Some(Severity::Notable)
        } else {
            None
        }
    }
}

impl Detector for ZScoreDetector {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::ZScore
    }

    fn detect(&self, samples: &[MetricSample], summary: &Summary) -> Vec<Anomaly> {
        if summary.std_dev <= 0.0 {
            return Vec::new();
        }
        samples
            .iter()
            .filter_map(|s| {
                let deviation = (s.value - summary.mean).abs();
                let z = deviation / summary.std_dev;
                let severity = self.classify(z)?;
                Some(
                    Anomaly::new(
                        s.value,
                        s.timestamp,
                        self.method(),
                        severity,
                        Direction::of(s.value, summary.mean),
                    )
                    .with("z_score", z)
                    .with("deviation", deviation),
                )
            })
            .collect()
    }
}

/// Tukey fences: points strictly outside `[Q1 - k·IQR, Q3 + k·IQR]` are warnings.
#[derive(Debug, Clone)]
pub struct IqrDetector {
    pub multiplier: f64,
}

impl Detector for IqrDetector {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::Iqr
    }

    fn detect(&self, samples: &[MetricSample], summary: &Summary) -> Vec<Anomaly> {
        let lower = summary.q1 - self.multiplier * summary.iqr;
        let upper = summary.q3 + self.multiplier * summary.iqr;

        samples
            .iter()
            .filter(|s| s.value < lower || s.value > upper)
            .map(|s| {
                let direction = if s.value < lower {
                    Direction::Below
                } else {
                    Direction::Above
                };
                Anomaly::new(s.value, s.timestamp, self.method(), Severity::Warning, direction)
                    .with("lower_fence", lower)
                    .with("upper_fence", upper)
            })
            .collect()
    }
}

/// Shewhart control chart: beyond the control limits is critical, beyond the warning
/// limits is a warning. Both limits are strict.
#[derive(Debug, Clone)]
pub struct SpcDetector {
    pub control_sigma: f64,
    pub warning_sigma: f64,
}

impl Detector for SpcDetector {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::Spc
    }

    fn detect(&self, samples: &[MetricSample], summary: &Summary) -> Vec<Anomaly> {
        let ucl = summary.mean + self.control_sigma * summary.std_dev;
        let lcl = summary.mean - self.control_sigma * summary.std_dev;
        let uwl = summary.mean + self.warning_sigma * summary.std_dev;
        let lwl = summary.mean - self.warning_sigma * summary.std_dev;

        samples
            .iter()
            .filter_map(|s| {
                let v = s.value;
                if v > ucl || v < lcl {
                    Some(
                        Anomaly::new(v, s.timestamp, self.method(), Severity::Critical, Direction::of(v, ucl))
                            .with("ucl", ucl)
                            .with("lcl", lcl),
                    )
                } else if v > uwl || v < lwl {
                    Some(
                        Anomaly::new(v, s.timestamp, self.method(), Severity::Warning, Direction::of(v, uwl))
                            .with("uwl", uwl)
                            .with("lwl", lwl),
                    )
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Compares each point against the mean and spread of the window just before it.
#[derive(Debug, Clone)]
pub struct MovingAverageDetector {
    pub max_window: usize,
    pub min_window: usize,
    pub threshold: f64,
}

impl MovingAverageDetector {
    /// `min(max_window, n / 3)`, or `None` when that is shorter than `min_window`.
    pub fn window_for(&self, len: usize) -> Option<usize> {
        let window = self.max_window.min(len / MOVING_AVERAGE_WINDOW_FRACTION);
        (window >= self.min_window).then_some(window)
    }
}

impl Detector for MovingAverageDetector {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::MovingAverage
    }

    fn detect(&self, samples: &[MetricSample], _summary: &Summary) -> Vec<Anomaly> {
        let Some(window) = self.window_for(samples.len()) else {
            return Vec::new();
        };
        let values: Vec<f64> = samples.iter().map(|s| s.value).collect();

        (window..samples.len())
            .filter_map(|i| {
                let preceding = &values[i - window..i];
                let local_mean = preceding.iter().sum::<f64>() / window as f64;
                let local_std = population_std_dev(preceding);
                if local_std <= 0.0 {
                    return None;
                }
                let current = samples[i];
                let deviation = (current.value - local_mean).abs();
                if deviation / local_std <= self.threshold {
                    return None;
                }
                Some(
                    Anomaly::new(
                        current.value,
                        current.timestamp,
                        self.method(),
                        Severity::Notable,
                        Direction::of(current.value, local_mean),
                    )
                    .with("moving_average", local_mean)
                    .with("deviation", deviation),
                )
            })
            .collect()
    }
}

/// The four detectors in ensemble order: z-score, IQR, SPC, moving average.
pub fn standard_detectors(settings: &AnomalySettings) -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(ZScoreDetector {
            critical: settings.z_critical,
            warning: settings.z_warning,
            notable: settings.z_notable,
        }),
        Box::new(IqrDetector {
            multiplier: settings.iqr_multiplier,
        }),
        Box::new(SpcDetector {
            control_sigma: settings.spc_control_sigma,
            warning_sigma: settings.spc_warning_sigma,
        }),
        Box::new(MovingAverageDetector {
            max_window: settings.moving_average_window,
            min_window: settings.moving_average_min_window,
            threshold: settings.moving_average_threshold,
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core_types::TimeSeries;

    fn series(values: &[f64]) -> Vec<MetricSample> {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        TimeSeries::daily(start, values).samples().to_vec()
    }

    fn run(detector: &dyn Detector, values: &[f64]) -> Vec<Anomaly> {
        let samples = series(values);
        let summary = Summary::from_values(values);
        detector.detect(&samples, &summary)
    }

    fn defaults() -> Vec<Box<dyn Detector>> {
        standard_detectors(&AnomalySettings::default())
    }

    #[test]
    fn constant_series_has_no_findings() {
        let values = [10.0; 10];
        for detector in defaults() {
            assert!(run(detector.as_ref(), &values).is_empty(), "{}", detector.method());
        }
    }

    #[test]
    fn z_score_bands() {
        // mean 0, population sigma sqrt(0.8): the +-1 points sit at z = 1.118
        let mut values = vec![1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        values.push(0.0);
        values.push(0.0);
        let z = ZScoreDetector {
            critical: 3.0,
            warning: 2.0,
            notable: 0.9,
        };
        let found = run(&z, &values);
        assert_eq!(found.len(), 8);
        assert!(found.iter().all(|a| a.severity == Severity::Notable));
        assert_eq!(found[0].extra["z_score"], 1.12);
    }

    #[test]
    fn iqr_fences_are_strict() {
        let mut values: Vec<f64> = (1..=9).map(f64::from).collect();
        values.push(13.0);
        let found = run(&IqrDetector { multiplier: 1.5 }, &values);
        // q1 3.25, q3 7.75 -> upper fence 14.5
        assert!(found.is_empty());

        values.push(40.0);
        let found = run(&IqrDetector { multiplier: 1.5 }, &values);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, 40.0);
        assert_eq!(found[0].direction, Direction::Above);
        assert_eq!(found[0].severity, Severity::Warning);
    }

    #[test]
    fn spc_separates_control_and_warning_limits() {
        let mut values = vec![100.0; 20];
        values[5] = 130.0;
        values[12] = 60.0;
        let spc = SpcDetector {
            control_sigma: 3.0,
            warning_sigma: 2.0,
        };
        let found = run(&spc, &values);
        let summary = Summary::from_values(&values);
        for anomaly in &found {
            let distance = (anomaly.value - summary.mean).abs() / summary.std_dev;
            let expected = if distance > 3.0 {
                Severity::Critical
            } else {
                Severity::Warning
            };
            assert_eq!(anomaly.severity, expected);
        }
        let low = found.iter().find(|a| a.value == 60.0).unwrap();
        assert_eq!(low.direction, Direction::Below);
    }

    #[test]
    fn moving_average_window_skips_short_series() {
        let detector = MovingAverageDetector {
            max_window: 7,
            min_window: 3,
            threshold: 2.5,
        };
        assert_eq!(detector.window_for(8), None);
        assert_eq!(detector.window_for(9), Some(3));
        assert_eq!(detector.window_for(30), Some(7));
    }

    #[test]
    fn moving_average_flags_jump_after_quiet_window() {
        let mut values = vec![100.0, 102.0, 98.0, 101.0, 99.0, 100.0, 102.0, 98.0, 101.0, 99.0];
        values.extend([100.0, 101.0, 160.0, 100.0, 99.0, 101.0, 100.0, 98.0, 102.0, 100.0, 99.0]);
        let detector = MovingAverageDetector {
            max_window: 7,
            min_window: 3,
            threshold: 2.5,
        };
        let found = run(&detector, &values);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, 160.0);
        assert_eq!(found[0].severity, Severity::Notable);
        assert_eq!(found[0].direction, Direction::Above);
    }
}
