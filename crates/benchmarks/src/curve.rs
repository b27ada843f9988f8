use core_types::{BenchmarkCurve, Polarity};

/// Score returned for input that cannot be placed on a curve (NaN, infinities).
pub const NEUTRAL_SCORE: u8 = 50;

/// Maps a raw metric value onto 0-100 with the curve's four break points.
///
/// The break points land exactly on 25, 50, 75 and 100. Between them the mapping is
/// linear; a segment of zero width yields the score at its start instead of dividing
/// by zero.
///
/// For [`Polarity::HigherIsBetter`] values between 0 and `poor` rise from 0 to 25 and
/// anything past `excellent` is 100. For [`Polarity::LowerIsBetter`] the thresholds
/// descend: anything at or below `excellent` is 100 and values past `poor` keep
/// decaying linearly from 25 towards 0.
pub fn normalize(value: f64, curve: &BenchmarkCurve, polarity: Polarity) -> u8 {
    if !value.is_finite() {
        return NEUTRAL_SCORE;
    }
    let raw = match polarity {
        Polarity::HigherIsBetter => ascending(value, curve),
        Polarity::LowerIsBetter => descending(value, curve),
    };
    raw.round().clamp(0.0, 100.0) as u8
}

/// Converts a 0-100 score to the 0-10 scale with one decimal.
pub fn to_ten_point(score: u8) -> f64 {
    f64::from(score.min(100)) / 10.0
}

fn ascending(value: f64, c: &BenchmarkCurve) -> f64 {
    if value < c.poor {
        return if c.poor > 0.0 {
            value / c.poor * 25.0
        } else {
            0.0
        };
    }
    if value <= c.average {
        return segment(value - c.poor, c.average - c.poor, 25.0);
    }
    if value <= c.good {
        return segment(value - c.average, c.good - c.average, 50.0);
    }
    if value <= c.excellent {
        return segment(value - c.good, c.excellent - c.good, 75.0);
    }
    100.0
}

fn descending(value: f64, c: &BenchmarkCurve) -> f64 {
    if value >= c.poor {
        // decay is scaled by at least one unit so a non-positive `poor` still scores 25
        return 25.0 - (value - c.poor) / c.poor.max(1.0) * 25.0;
    }
    if value >= c.average {
        return segment(c.poor - value, c.poor - c.average, 25.0);
    }
    if value >= c.good {
        return segment(c.average - value, c.average - c.good, 50.0);
    }
    if value >= c.excellent {
        return segment(c.good - value, c.good - c.excellent, 75.0);
    }
    100.0
}

/// `start + progress / width * 25`, collapsing to `start` on a zero-width segment.
fn segment(progress: f64, width: f64, start: f64) -> f64 {
    if width > 0.0 {
        start + progress / width * 25.0
    } else {
        start
    }
}
