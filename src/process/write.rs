use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use super::convert::Record;
use crate::schema::Layout;

/// Write the header row (layout names) followed by one row per record.
///
/// Fields are only quoted when they contain a delimiter, quote or newline.
pub fn write_csv<W: Write>(writer: W, layout: &Layout, records: &[Record]) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(layout.headers())
        .context("writing CSV header")?;
    for (idx, record) in records.iter().enumerate() {
        wtr.write_record(record.iter().map(|v| v.to_string()))
            .with_context(|| format!("writing CSV row {}", idx + 1))?;
    }
    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

/// Write CSV to `path` atomically: to a hidden tmp file, then rename over the target.
pub fn write_csv_file<P: AsRef<Path>>(path: P, layout: &Layout, records: &[Record]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {:?}", parent))?;
        }
    }

    let file_name = path
        .file_name()
        .with_context(|| format!("output path {:?} has no file name", path))?
        .to_string_lossy();
    let tmp_path: PathBuf = path.with_file_name(format!(".{}.tmp", file_name));

    let result = fs::File::create(&tmp_path)
        .with_context(|| format!("creating {:?}", tmp_path))
        .and_then(|f| write_csv(f, layout, records));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;
    Ok(())
}
