use crate::bootstrap::{DEFAULT_ALPHA, DEFAULT_ITERATIONS, DEFAULT_SEED};
use crate::label::LabelDomain;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A column computed as the logical OR of other label columns
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DerivedColumn {
    /// Name of the new column
    pub name: String,
    /// Source columns; the result is positive when any of them is
    pub any_of: Vec<String>,
}

/// Configuration for a single evaluation run
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvaluationConfig {
    /// Title shown in reports
    pub title: String,
    /// Comma-separated input file with a header row
    pub input: PathBuf,
    /// Column holding the participant/visit identifier
    pub id_column: String,
    /// Column holding the reference labels
    pub reference_column: String,
    /// Columns holding the predicted labels
    #[serde(default)]
    pub prediction_columns: Vec<String>,
    /// Columns derived before evaluation; evaluated alongside the predictions
    #[serde(default)]
    pub derived_columns: Vec<DerivedColumn>,
    /// Label treated as positive
    #[serde(default = "default_positive_class")]
    pub positive_class: String,
    /// The other label
    #[serde(default = "default_negative_class")]
    pub negative_class: String,
    /// Number of bootstrap resamples
    #[serde(default = "default_n_iterations")]
    pub n_iterations: usize,
    /// Seed for the resampling generator
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Two-sided significance level of the percentile intervals
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Optional local path to store results as JSON
    #[serde(default)]
    pub storage_path: Option<String>,
}

fn default_positive_class() -> String {
    "Yes".to_string()
}

fn default_negative_class() -> String {
    "No".to_string()
}

fn default_n_iterations() -> usize {
    DEFAULT_ITERATIONS
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

impl EvaluationConfig {
    /// Label domain described by the positive and negative classes
    pub fn label_domain(&self) -> Result<LabelDomain> {
        LabelDomain::new(&self.positive_class, &self.negative_class)
            .with_context(|| format!("Invalid label classes in evaluation {:?}", self.title))
    }

    /// Prediction columns followed by any derived column not already listed
    pub fn evaluated_columns(&self) -> Vec<String> {
        let mut columns = self.prediction_columns.clone();
        for derived in &self.derived_columns {
            if !columns.contains(&derived.name) {
                columns.push(derived.name.clone());
            }
        }
        columns
    }
}

/// Root configuration containing list of evaluations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// List of evaluation configurations
    pub evaluations: Vec<EvaluationConfig>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject parameter errors before any input is read
    pub fn validate(&self) -> Result<()> {
        if self.evaluations.is_empty() {
            anyhow::bail!("Config contains no evaluations");
        }

        for evaluation in &self.evaluations {
            evaluation.label_domain()?;

            if evaluation.evaluated_columns().is_empty() {
                anyhow::bail!(
                    "Evaluation {:?} has no prediction or derived columns",
                    evaluation.title
                );
            }
            for (index, column) in evaluation.prediction_columns.iter().enumerate() {
                if evaluation.prediction_columns[..index].contains(column) {
                    anyhow::bail!(
                        "Evaluation {:?}: prediction column {:?} is listed more than once",
                        evaluation.title,
                        column
                    );
                }
            }
            if evaluation.n_iterations == 0 {
                anyhow::bail!(
                    "Evaluation {:?}: n_iterations must be at least 1",
                    evaluation.title
                );
            }
            if !(evaluation.alpha > 0.0 && evaluation.alpha < 1.0) {
                anyhow::bail!(
                    "Evaluation {:?}: alpha must lie strictly between 0 and 1, got {}",
                    evaluation.title,
                    evaluation.alpha
                );
            }
        }

        Ok(())
    }
}
