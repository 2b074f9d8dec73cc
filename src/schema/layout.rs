// src/schema/layout.rs

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::{debug, instrument, trace, warn};

use super::types::{Column, ColumnType, Layout};
use crate::error::LayoutError;

/// Parse a layout description (`name,size,type` per line) into a `Layout`.
///
/// Blank lines are skipped. Any other line that does not hold exactly three
/// comma-separated fields, a positive size and a known type fails the whole
/// parse; no partial layout is returned.
#[instrument(level = "debug", skip(contents), fields(content_len = contents.len()))]
pub fn parse_layout(contents: &str) -> Result<Layout, LayoutError> {
    debug!("Starting layout parsing");
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);

    let mut columns = Vec::new();
    let mut width: usize = 0;
    for (idx, raw) in contents.lines().enumerate() {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
        if fields.len() != 3 {
            warn!(line, fields = fields.len(), "Layout entry has wrong field count");
            return Err(malformed(
                line,
                format!("expected 3 fields (name,size,type), found {}", fields.len()),
            ));
        }

        let name = fields[0];
        if name.is_empty() {
            return Err(malformed(line, "column name is empty"));
        }

        let size = match fields[1].parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                return Err(malformed(
                    line,
                    format!("size `{}` is not a positive integer", fields[1]),
                ))
            }
        };

        width = width.checked_add(size).ok_or_else(|| {
            malformed(line, "total width of all columns overflows")
        })?;

        let ty = ColumnType::from_token(fields[2]).ok_or_else(|| {
            malformed(
                line,
                format!(
                    "unknown column type `{}` (expected date, string or numeric)",
                    fields[2]
                ),
            )
        })?;

        trace!(name = %name, size, ty = %ty, "Parsed column");
        columns.push(Column {
            name: name.to_owned(),
            size,
            ty,
        });
    }

    debug!(columns = columns.len(), width, "Finished layout parsing");
    Ok(Layout::new(columns, width))
}

/// Read `path` and parse it with [`parse_layout`].
pub fn load_layout<P: AsRef<Path>>(path: P) -> Result<Layout> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout file: {:?}", path))?;
    let layout = parse_layout(&contents)
        .with_context(|| format!("Failed to parse layout file: {:?}", path))?;
    Ok(layout)
}

fn malformed(line: usize, reason: impl Into<String>) -> LayoutError {
    LayoutError::Malformed {
        line,
        reason: reason.into(),
    }
}
