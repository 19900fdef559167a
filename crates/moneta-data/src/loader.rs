//! Dataset loader: delimited text file → in-memory table.

use std::path::Path;

use crate::{Currency, DataError};

/// Loads the currency table from a comma-delimited text file.
///
/// One record per line, fields in the order: name, code, numeric code,
/// country. Blank lines are skipped; a line with any other field count
/// is an error. The loader runs once at startup and the table is never
/// mutated afterwards.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Currency>, DataError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut table = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 4 {
            return Err(DataError::MalformedRecord {
                path: path.to_path_buf(),
                line: idx + 1,
                fields: fields.len(),
            });
        }
        table.push(Currency {
            name: fields[0].to_string(),
            code: fields[1].to_string(),
            number: fields[2].to_string(),
            country: fields[3].to_string(),
        });
    }
    Ok(table)
}
