use thiserror::Error;

/// Fatal input or parameter problems, raised before any resampling starts
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("missing column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("duplicate column name in header: {0:?}")]
    DuplicateColumn(String),

    #[error(
        "unexpected level {level:?} in column {column:?} at row {row}; expected {positive:?} or {negative:?}"
    )]
    UnexpectedLevel {
        column: String,
        /// 1-based data row (header excluded)
        row: usize,
        level: String,
        positive: String,
        negative: String,
    },

    #[error("missing group identifier in column {column:?} at row {row}")]
    MissingGroupId {
        column: String,
        /// 1-based data row (header excluded)
        row: usize,
    },

    #[error("prediction column {0:?} is listed more than once")]
    DuplicatePredictionColumn(String),

    #[error("positive and negative class must differ, both are {0:?}")]
    IndistinctClasses(String),

    #[error("alpha must lie strictly between 0 and 1, got {0}")]
    InvalidAlpha(f64),

    #[error("n_iterations must be at least 1, got {0}")]
    InvalidIterations(usize),

    #[error("at least one prediction column is required")]
    NoPredictionColumns,

    #[error("table has no rows to resample")]
    EmptyTable,

    #[error("derived column {0:?} clashes with an existing column")]
    ColumnExists(String),

    #[error("derived column {0:?} has no source columns")]
    EmptyDerivation(String),
}
