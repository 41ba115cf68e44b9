use crate::bootstrap::{ClusteredBootstrapper, group_rows};
use crate::config::{Config, EvaluationConfig};
use crate::evaluation::{Evaluate, MetricsEvaluator};
use crate::label::LabelDomain;
use crate::metrics::MetricRecord;
use crate::models::{FinalResults, RunParameters, SummaryRecord};
use crate::table::Table;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main runner that orchestrates the evaluation process
pub struct Runner {
    config: Config,
    evaluator: MetricsEvaluator,
}

impl Runner {
    /// Create a new runner with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            evaluator: MetricsEvaluator::new(),
        }
    }

    /// Run all evaluations defined in the configuration
    pub fn run_evaluations(&self) -> Result<Vec<FinalResults>> {
        let total_evaluations = self.config.evaluations.len();
        let mut all_results = Vec::with_capacity(total_evaluations);

        for (eval_index, eval_config) in self.config.evaluations.iter().enumerate() {
            let eval_num = eval_index + 1;
            let results = self
                .run_single_evaluation(eval_config, eval_num, total_evaluations)
                .with_context(|| format!("Evaluation {:?} failed", eval_config.title))?;
            all_results.push(results);
        }

        Ok(all_results)
    }

    /// Run evaluation for a single configuration
    fn run_single_evaluation(
        &self,
        config: &EvaluationConfig,
        eval_num: usize,
        total_evaluations: usize,
    ) -> Result<FinalResults> {
        info!(
            "Running evaluation {}/{}: {}",
            eval_num, total_evaluations, config.title
        );

        let domain = config.label_domain()?;
        let table = self.prepare_table(config, &domain)?;
        let prediction_columns = config.evaluated_columns();

        let point_estimates =
            self.compute_point_estimates(&table, config, &prediction_columns, &domain)?;
        let summaries = self.run_bootstrap(&table, config, &prediction_columns, &domain)?;
        let groups = table
            .column(&config.id_column)
            .and_then(|ids| group_rows(&config.id_column, ids).ok())
            .map_or(0, |groups| groups.len());

        let final_results = FinalResults {
            title: config.title.clone(),
            parameters: RunParameters {
                id_column: config.id_column.clone(),
                reference_column: config.reference_column.clone(),
                prediction_columns,
                positive_class: domain.positive.clone(),
                negative_class: domain.negative.clone(),
                n_iterations: config.n_iterations,
                seed: config.seed,
                alpha: config.alpha,
            },
            rows: table.len(),
            groups,
            point_estimates,
            summaries,
        };

        self.store_results_if_configured(&final_results, config)?;

        Ok(final_results)
    }

    /// Load the input table and add derived columns
    fn prepare_table(&self, config: &EvaluationConfig, domain: &LabelDomain) -> Result<Table> {
        let mut table = Table::from_csv_path(&config.input)?;
        debug!(
            rows = table.len(),
            columns = ?table.column_names().collect::<Vec<_>>(),
            input = %config.input.display(),
            "Loaded input table"
        );

        for derived in &config.derived_columns {
            table
                .add_any_of_column(&derived.name, &derived.any_of, domain)
                .with_context(|| format!("Failed to derive column {:?}", derived.name))?;
            debug!(column = %derived.name, sources = ?derived.any_of, "Added derived column");
        }

        Ok(table)
    }

    /// Evaluate the full, unresampled table
    fn compute_point_estimates(
        &self,
        table: &Table,
        config: &EvaluationConfig,
        prediction_columns: &[String],
        domain: &LabelDomain,
    ) -> Result<Vec<MetricRecord>> {
        self.evaluator
            .evaluate(table, &config.reference_column, prediction_columns, domain)
            .context("Failed to evaluate full table")
    }

    /// Resample participants and summarize each metric
    fn run_bootstrap(
        &self,
        table: &Table,
        config: &EvaluationConfig,
        prediction_columns: &[String],
        domain: &LabelDomain,
    ) -> Result<Vec<SummaryRecord>> {
        info!(
            "Bootstrapping {} iterations over column {:?} (seed {})",
            config.n_iterations, config.id_column, config.seed
        );

        let bootstrapper =
            ClusteredBootstrapper::new(config.n_iterations, config.seed, config.alpha)?;
        bootstrapper
            .run(
                table,
                &config.id_column,
                &config.reference_column,
                prediction_columns,
                domain,
            )
            .context("Clustered bootstrap failed")
    }

    /// Store results if storage path is configured
    fn store_results_if_configured(
        &self,
        final_results: &FinalResults,
        config: &EvaluationConfig,
    ) -> Result<()> {
        if let Some(storage_path) = &config.storage_path {
            self.store_results(final_results, storage_path)?;
        }
        Ok(())
    }

    /// Store results to a JSON file
    fn store_results(&self, final_results: &FinalResults, path: &str) -> Result<()> {
        let json_content = serde_json::to_string_pretty(final_results)
            .context("Failed to serialize results to JSON")?;
        self.ensure_directory_exists(path)?;
        std::fs::write(path, json_content)
            .with_context(|| format!("Failed to write results to: {}", path))?;
        info!("Results stored to: {}", path);

        Ok(())
    }

    /// Ensure the directory for the results file exists
    fn ensure_directory_exists(&self, path: &str) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        Ok(())
    }
}
