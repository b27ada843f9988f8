use crate::models::{ForecastModel, ModelKind};
use configuration::EnsembleWeights;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use statistics::mean_absolute_percentage_error;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelAccuracy {
    pub mape: f64,
    /// `max(0, 100 - mape)`.
    pub accuracy_percent: f64,
}

impl ModelAccuracy {
    fn from_mape(mape: f64) -> Self {
        Self {
            mape: round2(mape),
            accuracy_percent: round2((100.0 - mape).max(0.0)),
        }
    }
}

/// Hold-out accuracy of each model and of the blend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    pub insufficient_data: bool,
    pub holdout: usize,
    pub models: BTreeMap<ModelKind, ModelAccuracy>,
    pub ensemble: Option<ModelAccuracy>,
}

impl AccuracyReport {
    fn insufficient(holdout: usize) -> Self {
        Self {
            insufficient_data: true,
            holdout,
            ..Self::default()
        }
    }
}

/// Blends the point forecasts of `models` fitted on `history`.
///
/// Returns each model's forecast alongside the weighted blend.
pub fn blend(
    models: &[Box<dyn ForecastModel>],
    weights: &EnsembleWeights,
    history: &[f64],
) -> (BTreeMap<ModelKind, f64>, f64) {
    let mut forecasts = BTreeMap::new();
    let mut blended = 0.0;
    for model in models {
        let forecast = model.point_forecast(history);
        let weight = model.kind().weight(weights).to_f64().unwrap_or(0.0);
        blended += forecast * weight;
        forecasts.insert(model.kind(), forecast);
    }
    (forecasts, blended)
}

/// Scores every model against the last `holdout` points.
///
/// Each model is refitted on the history before the hold-out, and its single
/// next-day forecast is compared with every held-out actual by MAPE. The series
/// must hold at least two hold-out windows, and the hold-out at least one positive
/// actual; otherwise the report is marked insufficient.
pub fn holdout_accuracy(
    models: &[Box<dyn ForecastModel>],
    weights: &EnsembleWeights,
    values: &[f64],
    holdout: usize,
) -> AccuracyReport {
    if holdout == 0 || values.len() < 2 * holdout {
        return AccuracyReport::insufficient(holdout);
    }
    let (train, test) = values.split_at(values.len() - holdout);
    let (forecasts, blended) = blend(models, weights, train);

    let score = |prediction: f64| {
        mean_absolute_percentage_error(test, &vec![prediction; test.len()])
            .map(ModelAccuracy::from_mape)
    };

    let Some(ensemble) = score(blended) else {
        return AccuracyReport::insufficient(holdout);
    };
    let models = forecasts
        .into_iter()
        .filter_map(|(kind, forecast)| score(forecast).map(|accuracy| (kind, accuracy)))
        .collect();

    AccuracyReport {
        insufficient_data: false,
        holdout,
        models,
        ensemble: Some(ensemble),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::standard_models;
    use configuration::ForecastSettings;

    fn models() -> Vec<Box<dyn ForecastModel>> {
        standard_models(&ForecastSettings::default())
    }

    #[test]
    fn under_fourteen_points_is_insufficient() {
        let report = holdout_accuracy(&models(), &EnsembleWeights::default(), &[100.0; 13], 7);
        assert!(report.insufficient_data);
        assert!(report.models.is_empty());
        assert!(report.ensemble.is_none());
    }

    #[test]
    fn flat_history_is_perfectly_accurate() {
        let report = holdout_accuracy(&models(), &EnsembleWeights::default(), &[250.0; 14], 7);
        assert!(!report.insufficient_data);
        assert_eq!(report.models.len(), 4);
        for accuracy in report.models.values() {
            assert_eq!(accuracy.mape, 0.0);
            assert_eq!(accuracy.accuracy_percent, 100.0);
        }
        assert_eq!(report.ensemble.unwrap().accuracy_percent, 100.0);
    }

    #[test]
    fn refit_excludes_the_holdout() {
        // A level shift only inside the hold-out: every model fitted on the
        // training prefix still forecasts 100 and misses by 50%.
        let mut values = vec![100.0; 7];
        values.extend([200.0; 7]);
        let report = holdout_accuracy(&models(), &EnsembleWeights::default(), &values, 7);
        for accuracy in report.models.values() {
            assert_eq!(accuracy.mape, 50.0);
        }
        assert_eq!(report.ensemble.unwrap().accuracy_percent, 50.0);
    }

    #[test]
    fn huge_error_floors_accuracy_at_zero() {
        let mut values = vec![1000.0; 7];
        values.extend([10.0; 7]);
        let report = holdout_accuracy(&models(), &EnsembleWeights::default(), &values, 7);
        let ensemble = report.ensemble.unwrap();
        assert_eq!(ensemble.mape, 9900.0);
        assert_eq!(ensemble.accuracy_percent, 0.0);
    }

    #[test]
    fn non_positive_holdout_is_insufficient() {
        let mut values = vec![100.0; 7];
        values.extend([0.0; 7]);
        assert!(holdout_accuracy(&models(), &EnsembleWeights::default(), &values, 7).insufficient_data);
    }

    #[test]
    fn blend_uses_configured_weights() {
        let (forecasts, blended) = blend(&models(), &EnsembleWeights::default(), &[40.0; 10]);
        assert_eq!(forecasts.len(), 4);
        assert!((blended - 40.0).abs() < 1e-9);
    }
}
