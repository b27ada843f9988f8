use chrono::{Datelike, Weekday};
use core_types::MetricSample;
use serde::{Deserialize, Serialize};
use statistics::{coefficient_of_variation, mean};

/// Weekday profiles varying more than this (CV, percent) count as seasonal.
pub const SEASONALITY_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeekdayAverage {
    pub weekday: Weekday,
    pub average: f64,
}

/// Day-of-week revenue profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    pub detected: bool,
    /// Sample coefficient of variation of the weekday averages, in percent.
    pub strength: f64,
    /// Monday first; weekdays absent from the history are omitted.
    pub by_weekday: Vec<WeekdayAverage>,
    pub best_day: Option<Weekday>,
    pub worst_day: Option<Weekday>,
}

impl Seasonality {
    pub fn from_samples(samples: &[MetricSample]) -> Self {
        let mut buckets: [Vec<f64>; 7] = Default::default();
        for sample in samples {
            let day = sample.timestamp.weekday().num_days_from_monday() as usize;
            buckets[day].push(sample.value);
        }

        let by_weekday: Vec<WeekdayAverage> = buckets
            .iter()
            .enumerate()
            .filter(|(_, values)| !values.is_empty())
            .filter_map(|(day, values)| {
                let weekday = Weekday::try_from(day as u8).ok()?;
                Some(WeekdayAverage {
                    weekday,
                    average: mean(values),
                })
            })
            .collect();

        let averages: Vec<f64> = by_weekday.iter().map(|d| d.average).collect();
        let strength = (coefficient_of_variation(&averages) * 10.0).round() / 10.0;

        // Ties go to the earliest weekday.
        let best_day = by_weekday
            .iter()
            .fold(None::<&WeekdayAverage>, |best, d| match best {
                Some(b) if b.average >= d.average => Some(b),
                _ => Some(d),
            })
            .map(|d| d.weekday);
        let worst_day = by_weekday
            .iter()
            .fold(None::<&WeekdayAverage>, |worst, d| match worst {
                Some(w) if w.average <= d.average => Some(w),
                _ => Some(d),
            })
            .map(|d| d.weekday);

        Self {
            detected: strength > SEASONALITY_THRESHOLD,
            strength,
            by_weekday,
            best_day,
            worst_day,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core_types::TimeSeries;

    fn monday() -> chrono::DateTime<Utc> {
        // 2024-01-01 was a Monday
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn weekend_dip_is_detected() {
        let week = [100.0, 100.0, 100.0, 100.0, 100.0, 50.0, 40.0];
        let values: Vec<f64> = week.iter().cycle().take(28).copied().collect();
        let series = TimeSeries::daily(monday(), &values);
        let seasonality = Seasonality::from_samples(series.samples());

        assert!(seasonality.detected);
        assert_eq!(seasonality.by_weekday.len(), 7);
        assert_eq!(seasonality.by_weekday[5].weekday, Weekday::Sat);
        assert_eq!(seasonality.by_weekday[5].average, 50.0);
        assert_eq!(seasonality.best_day, Some(Weekday::Mon));
        assert_eq!(seasonality.worst_day, Some(Weekday::Sun));
    }

    #[test]
    fn flat_week_is_not_seasonal() {
        let series = TimeSeries::daily(monday(), &[80.0; 14]);
        let seasonality = Seasonality::from_samples(series.samples());
        assert!(!seasonality.detected);
        assert_eq!(seasonality.strength, 0.0);
    }

    #[test]
    fn empty_history_has_no_profile() {
        let seasonality = Seasonality::from_samples(&[]);
        assert!(seasonality.by_weekday.is_empty());
        assert_eq!(seasonality.best_day, None);
        assert!(!seasonality.detected);
    }
}
