//! TOML formatting helpers for lock file output.

use anyhow::{Context, Result};
use toml_edit::{Array, DocumentMut, Item, Table, Value};

/// Convert a lock file to TOML with every non-empty array written one element per line.
///
/// `toml` produces inline arrays; the result is re-parsed with `toml_edit`
/// and each array's decor is rewritten so that
///
/// ```toml
/// packages = ["cmd", "pkg/foo"]
/// ```
///
/// becomes
///
/// ```toml
/// packages = [
///   "cmd",
///   "pkg/foo",
/// ]
/// ```
///
/// which keeps lock file diffs to one line per changed package.
///
/// # Errors
///
/// Returns an error if TOML serialization or document parsing fails.
pub(crate) fn serialize_with_multiline_arrays<T: serde::Serialize>(lockfile: &T) -> Result<String> {
    let toml_str = toml::to_string(lockfile).context("Failed to serialize to TOML")?;
    let mut doc: DocumentMut = toml_str.parse().context("Failed to parse TOML document")?;

    explode_arrays_in_table(doc.as_table_mut());

    Ok(doc.to_string())
}

fn explode_arrays_in_table(table: &mut Table) {
    for (_, item) in table.iter_mut() {
        match item {
            Item::Value(Value::Array(array)) => one_element_per_line(array),
            Item::Table(child) => explode_arrays_in_table(child),
            Item::ArrayOfTables(tables) => {
                for child in tables.iter_mut() {
                    explode_arrays_in_table(child);
                }
            }
            _ => {}
        }
    }
}

fn one_element_per_line(array: &mut Array) {
    if array.is_empty() {
        return;
    }
    for value in array.iter_mut() {
        value.decor_mut().set_prefix("\n  ");
        value.decor_mut().set_suffix("");
    }
    array.set_trailing_comma(true);
    array.set_trailing("\n");
}
