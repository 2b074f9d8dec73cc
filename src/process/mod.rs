// src/process/mod.rs
pub mod convert;
pub mod date_parser;
pub mod utils;
pub mod write;

use anyhow::{bail, Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

pub use convert::{
    convert_line, convert_with, ConvertOptions, FieldValue, LineConverter, Record, StringRule,
};
pub use write::{write_csv, write_csv_file};

use crate::schema::{load_layout, Layout};

/// Outcome of a successful [`convert_file`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub records: usize,
    pub output: PathBuf,
}

/// Convert every line of `reader`, in order.
///
/// Stops at the first bad line; the returned error names the 1-based line
/// number and still downcasts to the underlying `ConvertError`.
pub fn convert_reader<R: BufRead>(
    reader: R,
    layout: &Layout,
    options: ConvertOptions,
) -> Result<Vec<Record>> {
    let converter = LineConverter::new(layout, options);
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("Failed to read input line {}", line_no))?;
        let line = match line.strip_prefix('\u{feff}') {
            Some(rest) if idx == 0 => rest,
            _ => line.as_str(),
        };
        let record = converter
            .convert(line)
            .with_context(|| format!("Failed to convert input line {}", line_no))?;
        records.push(record);
    }

    debug!(
        records = records.len(),
        width = converter.expected_len(),
        "Converted input"
    );
    Ok(records)
}

/// Read `path_meta` as the layout, convert `path_input`, write CSV to `path_csv`.
///
/// The whole input is converted before anything is written, and the CSV goes
/// through a temp file that is renamed into place, so a failed run never
/// leaves a partial output file.
#[tracing::instrument(level = "info", skip_all, fields(input = %path_input.as_ref().display()))]
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>, M: AsRef<Path>>(
    path_input: P,
    path_csv: Q,
    path_meta: M,
    options: ConvertOptions,
) -> Result<ConversionSummary> {
    let layout = load_layout(&path_meta)?;
    if layout.is_empty() {
        bail!("Layout file {:?} defines no columns", path_meta.as_ref());
    }
    info!(
        columns = layout.len(),
        width = layout.total_width(),
        "loaded layout"
    );

    let input = File::open(&path_input)
        .with_context(|| format!("Failed to open input file: {:?}", path_input.as_ref()))?;
    let records = convert_reader(BufReader::new(input), &layout, options)
        .with_context(|| format!("Failed to convert {:?}", path_input.as_ref()))?;

    write_csv_file(&path_csv, &layout, &records)?;
    info!(records = records.len(), output = %path_csv.as_ref().display(), "wrote CSV");

    Ok(ConversionSummary {
        records: records.len(),
        output: path_csv.as_ref().to_path_buf(),
    })
}
