use crate::metrics::{Metric, MetricRecord};
use crate::models::{FinalResults, SummaryRecord};
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    Plain,
    Json,
    Csv,
}

const MISSING: &str = "NA";

/// Print evaluation results to stdout in the specified format
pub fn print_results(results: &[FinalResults], format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_results(&mut handle, results, format)
}

/// Write evaluation results in the specified format
pub fn write_results<W: Write>(
    out: &mut W,
    results: &[FinalResults],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Plain => write_plain(out, results),
        OutputFormat::Json => write_json(out, results),
        OutputFormat::Csv => write_csv(out, results),
    }
}

/// Render a summary as `"<value>% [<lower> - <upper>]"`, all scaled to percent
pub fn format_interval(summary: &SummaryRecord) -> String {
    match (summary.value, summary.ci_lower, summary.ci_upper) {
        (Some(value), Some(lower), Some(upper)) => format!(
            "{:.2}% [{:.2} - {:.2}]",
            value * 100.0,
            lower * 100.0,
            upper * 100.0
        ),
        _ => MISSING.to_string(),
    }
}

fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.2}%", value * 100.0),
        None => MISSING.to_string(),
    }
}

fn format_number(value: Option<f64>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => MISSING.to_string(),
    }
}

/// Reported metrics pivoted so each prediction column is its own column
pub fn pivot_report(result: &FinalResults) -> Vec<Vec<String>> {
    let columns = &result.parameters.prediction_columns;

    let mut rows = Vec::with_capacity(Metric::REPORTED.len() + 1);
    let mut header = vec!["Metric".to_string()];
    header.extend(columns.iter().cloned());
    rows.push(header);

    for metric in Metric::REPORTED {
        let mut row = vec![metric.name().to_string()];
        for column in columns {
            let cell = match result.summary(column, metric) {
                Some(summary) => format_interval(summary),
                None => MISSING.to_string(),
            };
            row.push(cell);
        }
        rows.push(row);
    }

    rows
}

/// Full-table counts and reported metrics, one row per prediction column
fn point_estimate_rows(records: &[MetricRecord]) -> Vec<Vec<String>> {
    let mut header: Vec<String> = ["Column", "TP", "TN", "FP", "FN"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    header.extend(Metric::REPORTED.iter().map(|m| m.name().to_string()));

    let mut rows = vec![header];
    for record in records {
        let counts = record.confusion;
        let mut row = vec![
            record.prediction_column.clone(),
            counts.true_positives.to_string(),
            counts.true_negatives.to_string(),
            counts.false_positives.to_string(),
            counts.false_negatives.to_string(),
        ];
        row.extend(
            Metric::REPORTED
                .iter()
                .map(|&metric| format_percent(record.get(metric))),
        );
        rows.push(row);
    }
    rows
}

/// Write rows as left-aligned columns
fn write_aligned<W: Write>(out: &mut W, rows: &[Vec<String>]) -> Result<()> {
    let width_count = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; width_count];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    for (index, row) in rows.iter().enumerate() {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(out, "{}", line.trim_end())?;

        if index == 0 {
            let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
            writeln!(out, "{}", "-".repeat(total))?;
        }
    }
    Ok(())
}

/// Write results in plain text format
fn write_plain<W: Write>(out: &mut W, results: &[FinalResults]) -> Result<()> {
    for (i, result) in results.iter().enumerate() {
        let parameters = &result.parameters;
        writeln!(out, "=== {} ===", result.title)?;
        writeln!(
            out,
            "Rows: {}, groups: {}, iterations: {}, seed: {}, alpha: {}",
            result.rows, result.groups, parameters.n_iterations, parameters.seed, parameters.alpha
        )?;
        writeln!(out)?;

        writeln!(out, "📝 FULL TABLE")?;
        writeln!(out, "-------------")?;
        write_aligned(out, &point_estimate_rows(&result.point_estimates))?;
        writeln!(out)?;

        writeln!(
            out,
            "📊 CLUSTERED BOOTSTRAP ({}% percentile intervals)",
            format_confidence(parameters.alpha)
        )?;
        writeln!(out, "-----------------------------------------------")?;
        write_aligned(out, &pivot_report(result))?;
        writeln!(out)?;

        if i + 1 < results.len() {
            writeln!(out, "{}", "=".repeat(50))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Confidence level for display, e.g. `95` for alpha 0.05
fn format_confidence(alpha: f64) -> String {
    let level = (1.0 - alpha) * 100.0;
    if (level - level.round()).abs() < 1e-9 {
        format!("{}", level.round())
    } else {
        format!("{:.1}", level)
    }
}

/// Write results in JSON format
fn write_json<W: Write>(out: &mut W, results: &[FinalResults]) -> Result<()> {
    let json =
        serde_json::to_string_pretty(results).context("Failed to serialize results to JSON")?;
    writeln!(out, "{}", json)?;
    Ok(())
}

/// Write every summary record as one CSV row
fn write_csv<W: Write>(out: &mut W, results: &[FinalResults]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "Metric",
        "Value",
        "CI_Lower",
        "CI_Upper",
        "PredictionColumn",
        "Evaluation",
    ])?;

    for result in results {
        for summary in &result.summaries {
            writer.write_record([
                summary.metric.name().to_string(),
                format_number(summary.value),
                format_number(summary.ci_lower),
                format_number(summary.ci_upper),
                summary.prediction_column.clone(),
                result.title.clone(),
            ])?;
        }
    }

    writer.flush().context("Failed to write CSV output")?;
    Ok(())
}
