use crate::label::Label;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 2x2 contingency counts of predicted against reference labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    /// Count outcomes over two label sequences of equal length.
    ///
    /// Extra elements in the longer sequence are ignored; callers pass columns
    /// from the same table so the lengths always agree.
    pub fn from_labels(reference: &[Label], predicted: &[Label]) -> Self {
        debug_assert_eq!(reference.len(), predicted.len());

        let mut matrix = Self::default();
        for (&actual, &guess) in reference.iter().zip(predicted) {
            match (actual, guess) {
                (Label::Positive, Label::Positive) => matrix.true_positives += 1,
                (Label::Negative, Label::Positive) => matrix.false_positives += 1,
                (Label::Negative, Label::Negative) => matrix.true_negatives += 1,
                (Label::Positive, Label::Negative) => matrix.false_negatives += 1,
            }
        }
        matrix
    }

    /// Number of observations counted
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Compute every metric; zero denominators yield `None`
    pub fn metrics(&self) -> BTreeMap<Metric, Option<f64>> {
        let tp = self.true_positives;
        let fp = self.false_positives;
        let tn = self.true_negatives;
        let fn_ = self.false_negatives;
        let n = self.total();

        let sensitivity = ratio(tp, tp + fn_);
        let specificity = ratio(tn, tn + fp);
        let ppv = ratio(tp, tp + fp);
        let npv = ratio(tn, tn + fn_);

        let f1 = match (ppv, sensitivity) {
            (Some(p), Some(r)) if p + r > 0.0 => Some(2.0 * p * r / (p + r)),
            _ => None,
        };
        let balanced_accuracy = match (sensitivity, specificity) {
            (Some(se), Some(sp)) => Some((se + sp) / 2.0),
            _ => None,
        };

        Metric::ALL
            .iter()
            .map(|&metric| {
                let value = match metric {
                    Metric::Sensitivity | Metric::Recall => sensitivity,
                    Metric::Specificity => specificity,
                    Metric::PositivePredictiveValue | Metric::Precision => ppv,
                    Metric::NegativePredictiveValue => npv,
                    Metric::F1 => f1,
                    Metric::Prevalence => ratio(tp + fn_, n),
                    Metric::DetectionRate => ratio(tp, n),
                    Metric::DetectionPrevalence => ratio(tp + fp, n),
                    Metric::BalancedAccuracy => balanced_accuracy,
                };
                (metric, value)
            })
            .collect()
    }
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

/// The fixed set of binary classification metrics, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    Sensitivity,
    Specificity,
    #[serde(rename = "Positive Predictive Value")]
    PositivePredictiveValue,
    #[serde(rename = "Negative Predictive Value")]
    NegativePredictiveValue,
    Precision,
    Recall,
    F1,
    Prevalence,
    #[serde(rename = "Detection Rate")]
    DetectionRate,
    #[serde(rename = "Detection Prevalence")]
    DetectionPrevalence,
    #[serde(rename = "Balanced Accuracy")]
    BalancedAccuracy,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::Sensitivity,
        Metric::Specificity,
        Metric::PositivePredictiveValue,
        Metric::NegativePredictiveValue,
        Metric::Precision,
        Metric::Recall,
        Metric::F1,
        Metric::Prevalence,
        Metric::DetectionRate,
        Metric::DetectionPrevalence,
        Metric::BalancedAccuracy,
    ];

    /// Metrics shown in the condensed report, in row order
    pub const REPORTED: [Metric; 4] = [
        Metric::Specificity,
        Metric::Sensitivity,
        Metric::Precision,
        Metric::F1,
    ];

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Metric::Sensitivity => "Sensitivity",
            Metric::Specificity => "Specificity",
            Metric::PositivePredictiveValue => "Positive Predictive Value",
            Metric::NegativePredictiveValue => "Negative Predictive Value",
            Metric::Precision => "Precision",
            Metric::Recall => "Recall",
            Metric::F1 => "F1",
            Metric::Prevalence => "Prevalence",
            Metric::DetectionRate => "Detection Rate",
            Metric::DetectionPrevalence => "Detection Prevalence",
            Metric::BalancedAccuracy => "Balanced Accuracy",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metric values for one prediction column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Prediction column the metrics were computed from
    pub prediction_column: String,
    /// Underlying outcome counts
    pub confusion: ConfusionMatrix,
    /// Value per metric; `None` where the metric is undefined
    pub values: BTreeMap<Metric, Option<f64>>,
}

impl MetricRecord {
    /// Build the record for a confusion matrix
    pub fn new(prediction_column: &str, confusion: ConfusionMatrix) -> Self {
        Self {
            prediction_column: prediction_column.to_string(),
            confusion,
            values: confusion.metrics(),
        }
    }

    /// Value of a metric, `None` when undefined
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied().flatten()
    }
}
