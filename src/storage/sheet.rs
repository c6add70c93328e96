//! CSV sheets of content items
//!
//! The input sheet needs a header row with at least `type`, `description` and
//! `direct_download_link`. Other columns are passed through in their original
//! position. The output sheet takes its column set from the first row and
//! appends `scheduled_time` and `response`.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::{ContentItem, ScheduledRow, DESCRIPTION_COLUMN, LINK_COLUMN, TYPE_COLUMN};

/// Read content items from a CSV file
pub fn read_content(path: &Path) -> Result<Vec<ContentItem>> {
    let file = File::open(path).map_err(|source| Error::InputOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let items = read_content_from(file)?;
    tracing::debug!(path = %path.display(), rows = items.len(), "Loaded content sheet");
    Ok(items)
}

/// Read content items from any CSV source
pub fn read_content_from<R: Read>(source: R) -> Result<Vec<ContentItem>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let columns: Arc<[String]> = headers.iter().map(str::to_string).collect();

    for (idx, name) in columns.iter().enumerate() {
        if columns[..idx].contains(name) {
            return Err(Error::DuplicateColumn {
                column: name.clone(),
            });
        }
    }

    let position = |name: &str| {
        columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| Error::missing_column(name))
    };
    let type_idx = position(TYPE_COLUMN)?;
    let description_idx = position(DESCRIPTION_COLUMN)?;
    let link_idx = position(LINK_COLUMN)?;

    let mut items = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();

        let extra = columns
            .iter()
            .enumerate()
            .filter(|(idx, _)| ![type_idx, description_idx, link_idx].contains(idx))
            .map(|(idx, name)| (name.clone(), field(idx)))
            .collect();

        items.push(ContentItem {
            content_type: field(type_idx),
            description: field(description_idx),
            direct_download_link: field(link_idx),
            extra,
            columns: Arc::clone(&columns),
        });
    }

    Ok(items)
}

/// Write scheduled rows to a CSV file
///
/// # Errors
///
/// Returns [`Error::EmptyPlan`] when `rows` is empty and
/// [`Error::InconsistentColumns`] when a row's columns differ from the first
/// row's. Both are checked before the file is created.
pub fn write_scheduled(path: &Path, rows: &[ScheduledRow]) -> Result<()> {
    validate_columns(rows)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_scheduled_to(file, rows)?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "Wrote scheduled sheet");
    Ok(())
}

/// Write scheduled rows to any CSV sink
pub fn write_scheduled_to<W: Write>(sink: W, rows: &[ScheduledRow]) -> Result<()> {
    let columns = validate_columns(rows)?;

    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(&columns)?;
    for row in rows {
        writer.write_record(row.values()?)?;
    }
    writer.flush()?;

    Ok(())
}

/// Column set of the first row, checked against every other row
fn validate_columns(rows: &[ScheduledRow]) -> Result<Vec<String>> {
    let first = rows.first().ok_or(Error::EmptyPlan)?;
    let expected = first.column_names();

    for (idx, row) in rows.iter().enumerate().skip(1) {
        let found = row.column_names();
        if found != expected {
            return Err(Error::InconsistentColumns {
                row: idx,
                expected,
                found,
            });
        }
    }

    Ok(expected)
}
