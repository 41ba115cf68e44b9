use crate::error::ConfigurationError;
use crate::label::{Label, LabelDomain};
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// A named column of raw string cells
#[derive(Debug, Clone, PartialEq)]
struct Column {
    name: String,
    values: Vec<String>,
}

/// Ordered observation rows stored column by column
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Create an empty table with the given header
    pub fn new<S: Into<String>>(
        headers: impl IntoIterator<Item = S>,
    ) -> Result<Self, ConfigurationError> {
        let mut columns: Vec<Column> = Vec::new();
        for header in headers {
            let name = header.into();
            if columns.iter().any(|c| c.name == name) {
                return Err(ConfigurationError::DuplicateColumn(name));
            }
            columns.push(Column {
                name,
                values: Vec::new(),
            });
        }

        Ok(Self { columns, rows: 0 })
    }

    /// Append a row; cells are matched to columns by position
    pub fn push_row<S: Into<String>>(&mut self, row: impl IntoIterator<Item = S>) -> Result<()> {
        let cells: Vec<String> = row.into_iter().map(Into::into).collect();
        if cells.len() != self.columns.len() {
            anyhow::bail!(
                "row {} has {} cells, header has {}",
                self.rows + 1,
                cells.len(),
                self.columns.len()
            );
        }

        for (column, cell) in self.columns.iter_mut().zip(cells) {
            column.values.push(cell);
        }
        self.rows += 1;
        Ok(())
    }

    /// Load a comma-separated file with a header row
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open input file: {}", path.display()))?;

        Self::from_csv_reader(file)
            .with_context(|| format!("Failed to load table from: {}", path.display()))
    }

    /// Load comma-separated data with a header row from any reader
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let headers = reader.headers().context("Failed to read CSV header")?.clone();
        let mut table = Self::new(headers.iter())?;

        for (index, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Failed to read CSV row {}", index + 1))?;
            table.push_row(record.iter())?;
        }

        Ok(table)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Column names in header order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Cells of a column, if present
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Names from `wanted` that are absent, in the order given
    pub fn missing_columns<'a>(&self, wanted: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        wanted
            .into_iter()
            .filter(|name| !self.has_column(name))
            .map(str::to_string)
            .collect()
    }

    /// Keep only the named columns, in the order given; absent and repeated names are skipped
    pub fn select<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Table {
        let mut columns: Vec<Column> = Vec::new();
        for name in names {
            if columns.iter().any(|c| c.name == name) {
                continue;
            }
            if let Some(column) = self.columns.iter().find(|c| c.name == name) {
                columns.push(column.clone());
            }
        }

        Table {
            columns,
            rows: self.rows,
        }
    }

    /// Build a new table from rows at `indices`, repeating rows as often as they appear
    pub fn take(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|column| Column {
                name: column.name.clone(),
                values: indices.iter().map(|&i| column.values[i].clone()).collect(),
            })
            .collect();

        Table {
            columns,
            rows: indices.len(),
        }
    }

    /// Add a column that is positive wherever any of `sources` is positive
    pub fn add_any_of_column(
        &mut self,
        name: &str,
        sources: &[String],
        domain: &LabelDomain,
    ) -> Result<(), ConfigurationError> {
        if self.has_column(name) {
            return Err(ConfigurationError::ColumnExists(name.to_string()));
        }
        if sources.is_empty() {
            return Err(ConfigurationError::EmptyDerivation(name.to_string()));
        }

        let missing = self.missing_columns(sources.iter().map(String::as_str));
        if !missing.is_empty() {
            return Err(ConfigurationError::MissingColumns(missing));
        }

        let mut any_positive = vec![false; self.rows];
        for source in sources {
            let values = self.column(source).unwrap_or_default();
            let labels = domain.parse_column(source, values)?;
            for (flag, label) in any_positive.iter_mut().zip(labels) {
                *flag |= label.is_positive();
            }
        }

        let values = any_positive
            .into_iter()
            .map(|positive| {
                let label = if positive { Label::Positive } else { Label::Negative };
                domain.render(label).to_string()
            })
            .collect();

        self.columns.push(Column {
            name: name.to_string(),
            values,
        });
        Ok(())
    }
}
