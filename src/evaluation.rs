use crate::error::ConfigurationError;
use crate::label::{Label, LabelDomain};
use crate::metrics::{ConfusionMatrix, MetricRecord};
use crate::table::Table;

/// Computes per-prediction-column metrics for one observation table
pub trait Evaluate {
    /// Evaluate each prediction column against the reference column.
    ///
    /// Records are returned in the order of `prediction_columns`.
    fn evaluate(
        &self,
        table: &Table,
        reference_column: &str,
        prediction_columns: &[String],
        domain: &LabelDomain,
    ) -> Result<Vec<MetricRecord>, ConfigurationError>;
}

/// Fail on an empty or repeated prediction list, then with every absent column name, reference first
pub(crate) fn ensure_columns(
    table: &Table,
    reference_column: &str,
    prediction_columns: &[String],
) -> Result<(), ConfigurationError> {
    if prediction_columns.is_empty() {
        return Err(ConfigurationError::NoPredictionColumns);
    }
    for (index, column) in prediction_columns.iter().enumerate() {
        if prediction_columns[..index].contains(column) {
            return Err(ConfigurationError::DuplicatePredictionColumn(column.clone()));
        }
    }

    let wanted = std::iter::once(reference_column)
        .chain(prediction_columns.iter().map(String::as_str));
    let missing = table.missing_columns(wanted);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigurationError::MissingColumns(missing))
    }
}

/// Confusion-matrix evaluator for binary labels
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsEvaluator;

impl MetricsEvaluator {
    /// Create a new evaluator
    pub fn new() -> Self {
        Self
    }

    /// Parse a column that is known to exist
    fn labels(
        &self,
        table: &Table,
        column: &str,
        domain: &LabelDomain,
    ) -> Result<Vec<Label>, ConfigurationError> {
        let values = table
            .column(column)
            .ok_or_else(|| ConfigurationError::MissingColumns(vec![column.to_string()]))?;
        domain.parse_column(column, values)
    }
}

impl Evaluate for MetricsEvaluator {
    fn evaluate(
        &self,
        table: &Table,
        reference_column: &str,
        prediction_columns: &[String],
        domain: &LabelDomain,
    ) -> Result<Vec<MetricRecord>, ConfigurationError> {
        ensure_columns(table, reference_column, prediction_columns)?;

        let reference = self.labels(table, reference_column, domain)?;

        prediction_columns
            .iter()
            .map(|column| {
                let predicted = self.labels(table, column, domain)?;
                let confusion = ConfusionMatrix::from_labels(&reference, &predicted);
                Ok(MetricRecord::new(column, confusion))
            })
            .collect()
    }
}
