use crate::metrics::{Metric, MetricRecord};
use serde::{Deserialize, Serialize};

/// Metric records produced by one bootstrap resample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationResult {
    /// 1-based iteration index
    pub iteration: usize,
    /// One record per prediction column
    pub records: Vec<MetricRecord>,
}

/// Bootstrap summary for one (metric, prediction column) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    #[serde(rename = "Metric")]
    pub metric: Metric,
    /// Mean over resamples where the metric was defined
    #[serde(rename = "Value")]
    pub value: Option<f64>,
    #[serde(rename = "CI_Lower")]
    pub ci_lower: Option<f64>,
    #[serde(rename = "CI_Upper")]
    pub ci_upper: Option<f64>,
    #[serde(rename = "PredictionColumn")]
    pub prediction_column: String,
}

/// Parameters a bootstrap run was executed with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    pub id_column: String,
    pub reference_column: String,
    pub prediction_columns: Vec<String>,
    pub positive_class: String,
    pub negative_class: String,
    pub n_iterations: usize,
    pub seed: u64,
    pub alpha: f64,
}

/// Final results for one configured evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalResults {
    /// Evaluation title from the run file
    pub title: String,
    /// Parameters used for the run
    pub parameters: RunParameters,
    /// Number of rows and distinct groups in the input
    pub rows: usize,
    pub groups: usize,
    /// Metrics on the full, unresampled table
    pub point_estimates: Vec<MetricRecord>,
    /// Bootstrap mean and percentile interval per metric and prediction column
    pub summaries: Vec<SummaryRecord>,
}

impl FinalResults {
    /// Look up the summary for a metric of a prediction column
    pub fn summary(&self, prediction_column: &str, metric: Metric) -> Option<&SummaryRecord> {
        self.summaries
            .iter()
            .find(|s| s.prediction_column == prediction_column && s.metric == metric)
    }
}
