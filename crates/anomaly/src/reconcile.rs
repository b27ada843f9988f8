use crate::anomaly::Anomaly;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Identity of a flagged point. Values are compared bitwise with `-0.0` folded
/// into `0.0`.
fn point_key(anomaly: &Anomaly) -> (DateTime<Utc>, u64) {
    let value = if anomaly.value == 0.0 { 0.0 } else { anomaly.value };
    (anomaly.timestamp, value.to_bits())
}

/// Merges the findings of several detectors.
///
/// Findings for the same `(timestamp, value)` collapse into one entry that keeps the
/// most severe finding; on equal severity the earlier finding wins, so the input
/// order (the detector order) breaks ties. `flagged_by` accumulates every method
/// that reported the point. The result is ordered by severity, most severe first,
/// then by timestamp.
pub fn reconcile(findings: Vec<Anomaly>) -> Vec<Anomaly> {
    let mut merged: Vec<Anomaly> = Vec::with_capacity(findings.len());
    let mut index: HashMap<(DateTime<Utc>, u64), usize> = HashMap::new();

    for finding in findings {
        let key = point_key(&finding);
        match index.get(&key) {
            Some(&at) => {
                let existing = &mut merged[at];
                let mut flagged_by = std::mem::take(&mut existing.flagged_by);
                for method in &finding.flagged_by {
                    if !flagged_by.contains(method) {
                        flagged_by.push(*method);
                    }
                }
                if finding.severity > existing.severity {
                    *existing = finding;
                }
                existing.flagged_by = flagged_by;
            }
            None => {
                index.insert(key, merged.len());
                merged.push(finding);
            }
        }
    }

    merged.sort_by(|a, b| match b.severity.cmp(&a.severity) {
        Ordering::Equal => a.timestamp.cmp(&b.timestamp),
        other => other,
    });
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use core_types::{DetectionMethod, Direction, Severity};

    fn at(day: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(day)
    }

    fn finding(day: i64, value: f64, method: DetectionMethod, severity: Severity) -> Anomaly {
        Anomaly::new(value, at(day), method, severity, Direction::Above)
    }

    #[test]
    fn keeps_highest_severity_for_shared_point() {
        let merged = reconcile(vec![
            finding(3, 500.0, DetectionMethod::Iqr, Severity::Warning),
            finding(3, 500.0, DetectionMethod::Spc, Severity::Critical),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].severity, Severity::Critical);
        assert_eq!(merged[0].method, DetectionMethod::Spc);
        assert_eq!(
            merged[0].flagged_by,
            vec![DetectionMethod::Iqr, DetectionMethod::Spc]
        );
    }

    #[test]
    fn equal_severity_keeps_first_detector() {
        let merged = reconcile(vec![
            finding(1, 9.0, DetectionMethod::ZScore, Severity::Warning).with("z_score", 2.4),
            finding(1, 9.0, DetectionMethod::Iqr, Severity::Warning),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].method, DetectionMethod::ZScore);
        assert!(merged[0].extra.contains_key("z_score"));
    }

    #[test]
    fn same_timestamp_different_value_is_distinct() {
        let merged = reconcile(vec![
            finding(1, 9.0, DetectionMethod::ZScore, Severity::Warning),
            finding(1, 10.0, DetectionMethod::Iqr, Severity::Warning),
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn ordered_by_severity_then_time() {
        let merged = reconcile(vec![
            finding(5, 1.0, DetectionMethod::ZScore, Severity::Notable),
            finding(4, 2.0, DetectionMethod::ZScore, Severity::Critical),
            finding(2, 3.0, DetectionMethod::ZScore, Severity::Notable),
            finding(9, 4.0, DetectionMethod::Spc, Severity::Critical),
        ]);
        let order: Vec<_> = merged.iter().map(|a| (a.severity, a.value)).collect();
        assert_eq!(
            order,
            vec![
                (Severity::Critical, 2.0),
                (Severity::Critical, 4.0),
                (Severity::Notable, 3.0),
                (Severity::Notable, 1.0),
            ]
        );
    }
}
