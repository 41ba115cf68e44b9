use crate::error::ConfigurationError;
use crate::evaluation::{Evaluate, MetricsEvaluator, ensure_columns};
use crate::label::LabelDomain;
use crate::metrics::Metric;
use crate::models::{IterationResult, SummaryRecord};
use crate::statistics::percentile_interval;
use crate::table::Table;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Default number of resamples
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Default generator seed
pub const DEFAULT_SEED: u64 = 123;

/// Default two-sided significance level (95% intervals)
pub const DEFAULT_ALPHA: f64 = 0.05;

const PROGRESS_EVERY: usize = 100;

/// Rows of one group identifier
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: String,
    pub rows: Vec<usize>,
}

/// Group row indices by trimmed identifier, in order of first appearance.
///
/// A blank identifier cannot be assigned to a participant and is rejected.
pub fn group_rows(id_column: &str, ids: &[String]) -> Result<Vec<Group>, ConfigurationError> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for (row, raw) in ids.iter().enumerate() {
        let id = raw.trim();
        if id.is_empty() {
            return Err(ConfigurationError::MissingGroupId {
                column: id_column.to_string(),
                row: row + 1,
            });
        }
        match position.get(id) {
            Some(&index) => groups[index].rows.push(row),
            None => {
                position.insert(id, groups.len());
                groups.push(Group {
                    id: id.to_string(),
                    rows: vec![row],
                });
            }
        }
    }

    Ok(groups)
}

/// Draw `groups.len()` groups with replacement and concatenate their rows in draw order
pub fn draw_resample<R: Rng + ?Sized>(rng: &mut R, groups: &[Group]) -> Vec<usize> {
    let mut indices = Vec::new();
    for _ in 0..groups.len() {
        let drawn = rng.random_range(0..groups.len());
        indices.extend_from_slice(&groups[drawn].rows);
    }
    indices
}

/// Resamples whole groups of rows and summarizes each metric's bootstrap distribution
#[derive(Debug, Clone)]
pub struct ClusteredBootstrapper<E = MetricsEvaluator> {
    evaluator: E,
    n_iterations: usize,
    seed: u64,
    alpha: f64,
}

impl ClusteredBootstrapper<MetricsEvaluator> {
    /// Create a bootstrapper backed by the confusion-matrix evaluator
    pub fn new(n_iterations: usize, seed: u64, alpha: f64) -> Result<Self, ConfigurationError> {
        Self::with_evaluator(MetricsEvaluator::new(), n_iterations, seed, alpha)
    }
}

impl<E: Evaluate> ClusteredBootstrapper<E> {
    /// Create a bootstrapper around any evaluator
    pub fn with_evaluator(
        evaluator: E,
        n_iterations: usize,
        seed: u64,
        alpha: f64,
    ) -> Result<Self, ConfigurationError> {
        if n_iterations == 0 {
            return Err(ConfigurationError::InvalidIterations(n_iterations));
        }
        // also rejects NaN
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ConfigurationError::InvalidAlpha(alpha));
        }

        Ok(Self {
            evaluator,
            n_iterations,
            seed,
            alpha,
        })
    }

    /// Run the bootstrap with a generator seeded from the configured seed
    pub fn run(
        &self,
        table: &Table,
        id_column: &str,
        reference_column: &str,
        prediction_columns: &[String],
        domain: &LabelDomain,
    ) -> Result<Vec<SummaryRecord>, ConfigurationError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.run_with_rng(
            &mut rng,
            table,
            id_column,
            reference_column,
            prediction_columns,
            domain,
        )
    }

    /// Run the bootstrap drawing from a caller-supplied generator
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        table: &Table,
        id_column: &str,
        reference_column: &str,
        prediction_columns: &[String],
        domain: &LabelDomain,
    ) -> Result<Vec<SummaryRecord>, ConfigurationError> {
        let replicates = self.resample(
            rng,
            table,
            id_column,
            reference_column,
            prediction_columns,
            domain,
        )?;
        Ok(self.summarize(&replicates, prediction_columns))
    }

    /// Evaluate every resample and return the per-iteration records
    pub fn resample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        table: &Table,
        id_column: &str,
        reference_column: &str,
        prediction_columns: &[String],
        domain: &LabelDomain,
    ) -> Result<Vec<IterationResult>, ConfigurationError> {
        let ids = table
            .column(id_column)
            .ok_or_else(|| ConfigurationError::MissingColumns(vec![id_column.to_string()]))?;
        if table.is_empty() {
            return Err(ConfigurationError::EmptyTable);
        }
        let groups = group_rows(id_column, ids)?;
        validate_labels(table, reference_column, prediction_columns, domain)?;

        // resamples only ever need these columns
        let projected = table.select(
            [id_column, reference_column]
                .into_iter()
                .chain(prediction_columns.iter().map(String::as_str)),
        );
        debug!(
            groups = groups.len(),
            rows = table.len(),
            iterations = self.n_iterations,
            seed = self.seed,
            "Starting clustered bootstrap"
        );

        let mut replicates = Vec::with_capacity(self.n_iterations);
        for iteration in 1..=self.n_iterations {
            let indices = draw_resample(rng, &groups);
            let sample = projected.take(&indices);
            let records =
                self.evaluator
                    .evaluate(&sample, reference_column, prediction_columns, domain)?;
            replicates.push(IterationResult { iteration, records });

            if iteration % PROGRESS_EVERY == 0 {
                trace!(iteration, total = self.n_iterations, "Bootstrap progress");
            }
        }

        Ok(replicates)
    }

    /// Mean and percentile interval per prediction column and metric, skipping undefined values
    pub fn summarize(
        &self,
        replicates: &[IterationResult],
        prediction_columns: &[String],
    ) -> Vec<SummaryRecord> {
        let mut summaries = Vec::with_capacity(prediction_columns.len() * Metric::ALL.len());

        for column in prediction_columns {
            for metric in Metric::ALL {
                let values: Vec<f64> = replicates
                    .iter()
                    .filter_map(|r| r.records.iter().find(|rec| &rec.prediction_column == column))
                    .filter_map(|record| record.get(metric))
                    .collect();

                let estimate = percentile_interval(&values, self.alpha);
                if estimate.is_none() {
                    debug!(column = %column, metric = %metric, "Metric undefined in every resample");
                }

                summaries.push(SummaryRecord {
                    metric,
                    value: estimate.map(|e| e.mean),
                    ci_lower: estimate.map(|e| e.lower),
                    ci_upper: estimate.map(|e| e.upper),
                    prediction_column: column.clone(),
                });
            }
        }

        summaries
    }
}

/// Check columns and levels once on the full table, before any resampling
fn validate_labels(
    table: &Table,
    reference_column: &str,
    prediction_columns: &[String],
    domain: &LabelDomain,
) -> Result<(), ConfigurationError> {
    ensure_columns(table, reference_column, prediction_columns)?;

    let wanted =
        std::iter::once(reference_column).chain(prediction_columns.iter().map(String::as_str));
    for column in wanted {
        if let Some(values) = table.column(column) {
            domain.parse_column(column, values)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricRecord;
    use proptest::prelude::*;
    use std::cell::RefCell;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    /// 4 participants x 2 rows, reference 5 Yes / 3 No, GPT a perfect copy
    fn create_perfect_table() -> Table {
        let mut table = Table::new(["ID", "Concensus", "GPT"]).unwrap();
        let rows = [
            ["A", "Yes"],
            ["A", "Yes"],
            ["B", "Yes"],
            ["B", "Yes"],
            ["C", "Yes"],
            ["C", "No"],
            ["D", "No"],
            ["D", "No"],
        ];
        for [id, label] in rows {
            table.push_row([id, label, label]).unwrap();
        }
        table
    }

    /// Interleaved groups with an imperfect predictor and one that never says Yes
    fn create_mixed_table() -> Table {
        let mut table = Table::new(["ID", "Concensus", "GPT", "Regex"]).unwrap();
        let rows = [
            ["p1", "Yes", "Yes", "No"],
            ["p2", "No", "No", "No"],
            ["p1", "Yes", "No", "No"],
            ["p3", "No", "Yes", "No"],
            ["p4", "Yes", "Yes", "No"],
            ["p2", "Yes", "Yes", "No"],
            ["p5", "No", "No", "No"],
            ["p3", "No", "No", "No"],
            ["p6", "Yes", "Yes", "No"],
            ["p6", "No", "No", "No"],
        ];
        for row in rows {
            table.push_row(row).unwrap();
        }
        table
    }

    /// Records the group id sequence and column names of every table it is asked to evaluate
    struct RecordingEvaluator {
        seen: RefCell<Vec<Vec<String>>>,
        columns_seen: RefCell<Vec<Vec<String>>>,
    }

    impl RecordingEvaluator {
        fn new() -> Self {
            Self {
                seen: RefCell::new(Vec::new()),
                columns_seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Evaluate for RecordingEvaluator {
        fn evaluate(
            &self,
            table: &Table,
            reference_column: &str,
            prediction_columns: &[String],
            domain: &LabelDomain,
        ) -> Result<Vec<MetricRecord>, ConfigurationError> {
            self.seen
                .borrow_mut()
                .push(table.column("ID").unwrap_or_default().to_vec());
            self.columns_seen
                .borrow_mut()
                .push(table.column_names().map(str::to_string).collect());
            MetricsEvaluator::new().evaluate(table, reference_column, prediction_columns, domain)
        }
    }

    #[test]
    fn test_group_rows_first_appearance_order() {
        let ids = columns(&["b", "a", "b", "c", "a"]);
        let groups = group_rows("ID", &ids).unwrap();

        assert_eq!(
            groups,
            vec![
                Group { id: "b".to_string(), rows: vec![0, 2] },
                Group { id: "a".to_string(), rows: vec![1, 4] },
                Group { id: "c".to_string(), rows: vec![3] },
            ]
        );
    }

    #[test]
    fn test_draw_resample_keeps_groups_whole() {
        let groups = group_rows("ID", &columns(&["a", "a", "b", "c", "c", "c"])).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let indices = draw_resample(&mut rng, &groups);
            let mut rest = indices.as_slice();
            let mut draws = 0;
            while !rest.is_empty() {
                let group = groups
                    .iter()
                    .find(|g| rest.starts_with(&g.rows))
                    .expect("resample must be a concatenation of whole groups");
                rest = &rest[group.rows.len()..];
                draws += 1;
            }
            assert_eq!(draws, groups.len());
        }
    }

    #[test]
    fn test_perfect_predictor_has_degenerate_interval() {
        let table = create_perfect_table();
        let domain = LabelDomain::default();

        for seed in [1, 123, 9999] {
            let bootstrapper = ClusteredBootstrapper::new(1000, seed, 0.05).unwrap();
            let summaries = bootstrapper
                .run(&table, "ID", "Concensus", &columns(&["GPT"]), &domain)
                .unwrap();

            for metric in [
                Metric::Sensitivity,
                Metric::Specificity,
                Metric::Precision,
                Metric::F1,
            ] {
                let summary = summaries.iter().find(|s| s.metric == metric).unwrap();
                assert_eq!(summary.value, Some(1.0), "{metric} with seed {seed}");
                assert_eq!(summary.ci_lower, Some(1.0));
                assert_eq!(summary.ci_upper, Some(1.0));
            }
        }
    }

    #[test]
    fn test_same_seed_reproduces_summaries() {
        let table = create_mixed_table();
        let domain = LabelDomain::default();
        let predictions = columns(&["GPT", "Regex"]);
        let bootstrapper = ClusteredBootstrapper::new(200, 123, 0.05).unwrap();

        let first = bootstrapper
            .run(&table, "ID", "Concensus", &predictions, &domain)
            .unwrap();
        let second = bootstrapper
            .run(&table, "ID", "Concensus", &predictions, &domain)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2 * Metric::ALL.len());
    }

    #[test]
    fn test_summaries_ordered_by_column_then_metric() {
        let table = create_mixed_table();
        let summaries = ClusteredBootstrapper::new(10, 1, 0.05)
            .unwrap()
            .run(
                &table,
                "ID",
                "Concensus",
                &columns(&["Regex", "GPT"]),
                &LabelDomain::default(),
            )
            .unwrap();

        assert_eq!(summaries[0].prediction_column, "Regex");
        assert_eq!(summaries[0].metric, Metric::Sensitivity);
        assert_eq!(summaries[10].metric, Metric::BalancedAccuracy);
        assert_eq!(summaries[11].prediction_column, "GPT");
    }

    #[test]
    fn test_every_resample_contains_whole_drawn_groups() {
        let table = create_mixed_table();
        let evaluator = RecordingEvaluator::new();
        let bootstrapper = ClusteredBootstrapper::with_evaluator(evaluator, 100, 42, 0.05).unwrap();

        bootstrapper
            .run(
                &table,
                "ID",
                "Concensus",
                &columns(&["GPT"]),
                &LabelDomain::default(),
            )
            .unwrap();

        let original_ids = table.column("ID").unwrap();
        let groups = group_rows("ID", original_ids).unwrap();
        let seen = bootstrapper.evaluator.seen.borrow();
        assert_eq!(seen.len(), 100);

        for sample_ids in seen.iter() {
            let mut drawn_rows = 0;
            for group in &groups {
                let present = sample_ids.iter().filter(|id| **id == group.id).count();
                // each draw of a group contributes all of its rows
                assert_eq!(present % group.rows.len(), 0, "partial group {}", group.id);
                drawn_rows += present;
            }
            assert_eq!(drawn_rows, sample_ids.len());

            let draws: usize = groups
                .iter()
                .map(|g| sample_ids.iter().filter(|id| **id == g.id).count() / g.rows.len())
                .sum();
            assert_eq!(draws, groups.len());
        }
    }

    #[test]
    fn test_undefined_precision_does_not_drag_mean_to_zero() {
        // Sparse only says Yes for participant A, always correctly
        let mut table = Table::new(["ID", "Concensus", "Sparse"]).unwrap();
        for [id, reference, sparse] in [
            ["A", "Yes", "Yes"],
            ["A", "Yes", "Yes"],
            ["B", "Yes", "No"],
            ["B", "No", "No"],
            ["C", "No", "No"],
            ["D", "No", "No"],
        ] {
            table.push_row([id, reference, sparse]).unwrap();
        }
        let domain = LabelDomain::default();
        let predictions = columns(&["Sparse"]);
        let bootstrapper = ClusteredBootstrapper::new(300, 5, 0.05).unwrap();

        let mut rng = StdRng::seed_from_u64(5);
        let replicates = bootstrapper
            .resample(&mut rng, &table, "ID", "Concensus", &predictions, &domain)
            .unwrap();
        let undefined = replicates
            .iter()
            .filter(|r| r.records[0].get(Metric::Precision).is_none())
            .count();
        assert!(undefined > 0 && undefined < replicates.len());

        let summaries = bootstrapper.summarize(&replicates, &predictions);
        let precision = summaries
            .iter()
            .find(|s| s.metric == Metric::Precision)
            .unwrap();
        assert_eq!(precision.value, Some(1.0));
        assert_eq!(precision.ci_lower, Some(1.0));
        assert_eq!(precision.ci_upper, Some(1.0));
    }

    #[test]
    fn test_metric_undefined_in_every_resample_is_missing() {
        let table = create_mixed_table();
        let summaries = ClusteredBootstrapper::new(100, 5, 0.05)
            .unwrap()
            .run(
                &table,
                "ID",
                "Concensus",
                &columns(&["Regex"]),
                &LabelDomain::default(),
            )
            .unwrap();

        let precision = summaries
            .iter()
            .find(|s| s.metric == Metric::Precision)
            .unwrap();
        assert_eq!(precision.value, None);
        assert_eq!(precision.ci_lower, None);
        assert_eq!(precision.ci_upper, None);
    }

    #[test]
    fn test_intervals_bracket_the_mean() {
        let table = create_mixed_table();
        let summaries = ClusteredBootstrapper::new(500, 123, 0.05)
            .unwrap()
            .run(
                &table,
                "ID",
                "Concensus",
                &columns(&["GPT", "Regex"]),
                &LabelDomain::default(),
            )
            .unwrap();

        for summary in summaries.iter().filter(|s| s.value.is_some()) {
            let value = summary.value.unwrap();
            let lower = summary.ci_lower.unwrap();
            let upper = summary.ci_upper.unwrap();
            assert!(lower <= upper);
            assert!(lower <= value + 1e-9, "{:?}", summary);
            assert!(value <= upper + 1e-9, "{:?}", summary);
            assert!((0.0..=1.0).contains(&lower) && (0.0..=1.0).contains(&upper));
        }
    }

    #[test]
    fn test_missing_id_column_fails_before_evaluating() {
        let table = create_mixed_table();
        let evaluator = RecordingEvaluator::new();
        let bootstrapper = ClusteredBootstrapper::with_evaluator(evaluator, 10, 1, 0.05).unwrap();

        let err = bootstrapper
            .run(
                &table,
                "Participant",
                "Concensus",
                &columns(&["GPT"]),
                &LabelDomain::default(),
            )
            .unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::MissingColumns(vec!["Participant".to_string()])
        );
        assert!(bootstrapper.evaluator.seen.borrow().is_empty());
    }

    #[test]
    fn test_bad_level_fails_before_evaluating() {
        let mut table = create_mixed_table();
        table.push_row(["p7", "Maybe", "No", "No"]).unwrap();
        let evaluator = RecordingEvaluator::new();
        let bootstrapper = ClusteredBootstrapper::with_evaluator(evaluator, 10, 1, 0.05).unwrap();

        let err = bootstrapper
            .run(
                &table,
                "ID",
                "Concensus",
                &columns(&["GPT"]),
                &LabelDomain::default(),
            )
            .unwrap_err();

        assert!(matches!(err, ConfigurationError::UnexpectedLevel { row: 11, .. }));
        assert!(bootstrapper.evaluator.seen.borrow().is_empty());
    }

    #[test]
    fn test_group_rows_trims_identifiers() {
        let ids = columns(&[" P01", "P01", "P02 ", "P02"]);
        let groups = group_rows("ID", &ids).unwrap();

        assert_eq!(
            groups,
            vec![
                Group { id: "P01".to_string(), rows: vec![0, 1] },
                Group { id: "P02".to_string(), rows: vec![2, 3] },
            ]
        );
    }

    #[test]
    fn test_blank_id_is_rejected() {
        let mut table = Table::new(["ID", "Concensus", "GPT"]).unwrap();
        for id in ["A", "A", "  ", ""] {
            table.push_row([id, "Yes", "Yes"]).unwrap();
        }
        let evaluator = RecordingEvaluator::new();
        let bootstrapper = ClusteredBootstrapper::with_evaluator(evaluator, 10, 1, 0.05).unwrap();

        let err = bootstrapper
            .run(
                &table,
                "ID",
                "Concensus",
                &columns(&["GPT"]),
                &LabelDomain::default(),
            )
            .unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::MissingGroupId {
                column: "ID".to_string(),
                row: 3,
            }
        );
        assert!(bootstrapper.evaluator.seen.borrow().is_empty());
    }

    #[test]
    fn test_padded_ids_resample_as_one_group() {
        // " P01" and "P01" are the same participant
        let mut table = Table::new(["ID", "Concensus", "GPT"]).unwrap();
        for [id, label] in [[" P01", "Yes"], ["P01", "No"], ["P02", "Yes"], ["P02", "No"]] {
            table.push_row([id, label, label]).unwrap();
        }
        let evaluator = RecordingEvaluator::new();
        let bootstrapper = ClusteredBootstrapper::with_evaluator(evaluator, 50, 3, 0.05).unwrap();

        bootstrapper
            .run(
                &table,
                "ID",
                "Concensus",
                &columns(&["GPT"]),
                &LabelDomain::default(),
            )
            .unwrap();

        for sample_ids in bootstrapper.evaluator.seen.borrow().iter() {
            assert_eq!(sample_ids.len(), 4);
            let p01 = sample_ids.iter().filter(|id| id.trim() == "P01").count();
            assert_eq!(p01 % 2, 0);
        }
    }

    #[test]
    fn test_resamples_carry_only_evaluated_columns() {
        let mut table = Table::new(["ID", "Note", "Concensus", "GPT", "Regex"]).unwrap();
        for [id, label] in [["A", "Yes"], ["A", "No"], ["B", "Yes"], ["C", "No"]] {
            table
                .push_row([id, "free text that is never evaluated", label, label, "No"])
                .unwrap();
        }
        let evaluator = RecordingEvaluator::new();
        let bootstrapper = ClusteredBootstrapper::with_evaluator(evaluator, 5, 9, 0.05).unwrap();

        bootstrapper
            .run(
                &table,
                "ID",
                "Concensus",
                &columns(&["GPT"]),
                &LabelDomain::default(),
            )
            .unwrap();

        let columns_seen = bootstrapper.evaluator.columns_seen.borrow();
        assert_eq!(columns_seen.len(), 5);
        for names in columns_seen.iter() {
            assert_eq!(names, &columns(&["ID", "Concensus", "GPT"]));
        }
    }

    #[test]
    fn test_repeated_prediction_column_fails_before_evaluating() {
        let table = create_mixed_table();
        let evaluator = RecordingEvaluator::new();
        let bootstrapper = ClusteredBootstrapper::with_evaluator(evaluator, 10, 1, 0.05).unwrap();

        let err = bootstrapper
            .run(
                &table,
                "ID",
                "Concensus",
                &columns(&["GPT", "GPT"]),
                &LabelDomain::default(),
            )
            .unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::DuplicatePredictionColumn("GPT".to_string())
        );
        assert!(bootstrapper.evaluator.seen.borrow().is_empty());
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let table = Table::new(["ID", "Concensus", "GPT"]).unwrap();
        let err = ClusteredBootstrapper::new(10, 1, 0.05)
            .unwrap()
            .run(
                &table,
                "ID",
                "Concensus",
                &columns(&["GPT"]),
                &LabelDomain::default(),
            )
            .unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyTable);
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            ClusteredBootstrapper::new(0, 1, 0.05).unwrap_err(),
            ConfigurationError::InvalidIterations(0)
        );
        assert!(matches!(
            ClusteredBootstrapper::new(10, 1, 1.0).unwrap_err(),
            ConfigurationError::InvalidAlpha(_)
        ));
        assert!(matches!(
            ClusteredBootstrapper::new(10, 1, 0.0).unwrap_err(),
            ConfigurationError::InvalidAlpha(_)
        ));
        assert!(ClusteredBootstrapper::new(10, 1, f64::NAN).is_err());
    }

    #[test]
    fn test_injected_generator_drives_draws() {
        let table = create_mixed_table();
        let bootstrapper = ClusteredBootstrapper::new(50, 0, 0.05).unwrap();
        let domain = LabelDomain::default();
        let predictions = columns(&["GPT"]);

        let mut rng_a = StdRng::seed_from_u64(77);
        let mut rng_b = StdRng::seed_from_u64(77);
        let a = bootstrapper
            .resample(&mut rng_a, &table, "ID", "Concensus", &predictions, &domain)
            .unwrap();
        let b = bootstrapper
            .resample(&mut rng_b, &table, "ID", "Concensus", &predictions, &domain)
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(a.first().map(|r| r.iteration), Some(1));
        assert_eq!(a.last().map(|r| r.iteration), Some(50));
    }

    proptest! {
        #[test]
        fn prop_intervals_are_ordered_and_within_unit_range(
            labels in prop::collection::vec((0u8..4, any::<bool>(), any::<bool>()), 1..30),
            seed in any::<u64>(),
        ) {
            let mut table = Table::new(["ID", "Concensus", "GPT"]).unwrap();
            for (id, reference, predicted) in &labels {
                let yes_no = |b: bool| if b { "Yes" } else { "No" };
                table
                    .push_row([format!("p{id}"), yes_no(*reference).to_string(), yes_no(*predicted).to_string()])
                    .unwrap();
            }

            let summaries = ClusteredBootstrapper::new(50, seed, 0.05)
                .unwrap()
                .run(&table, "ID", "Concensus", &columns(&["GPT"]), &LabelDomain::default())
                .unwrap();

            for summary in summaries {
                if let (Some(value), Some(lower), Some(upper)) =
                    (summary.value, summary.ci_lower, summary.ci_upper)
                {
                    prop_assert!(lower <= upper);
                    prop_assert!((0.0..=1.0).contains(&value));
                    prop_assert!((0.0..=1.0).contains(&lower));
                    prop_assert!((0.0..=1.0).contains(&upper));
                }
            }
        }
    }
}
