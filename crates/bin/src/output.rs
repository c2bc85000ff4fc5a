//! Output formatting helpers for human-readable and JSON output.

use clap::ValueEnum;
use harvest::{DeltaSummary, SharedView, StoredBasket, VersionKey};
use serde_json::Value;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned tables
    Human,
    /// A single JSON document per command
    Json,
}

/// Print a table with aligned columns in human-readable format.
///
/// `headers` and each row in `rows` must have the same length.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    // A column is as wide as its widest cell, header included
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(String::len)
                .fold(header.len(), usize::max)
        })
        .collect();

    println!("{}", render_row(headers.iter().copied(), &widths));
    for row in rows {
        println!("{}", render_row(row.iter().map(String::as_str), &widths));
    }
}

/// Pad each cell to its column width. Cells past the last column are dropped
/// and so is trailing padding.
fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// Render a JSON value compactly for a table cell. Strings print bare.
fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Print a reconstructed view.
pub fn print_shared_view(view: &SharedView, format: OutputFormat) -> serde_json::Result<()> {
    match format {
        OutputFormat::Human => {
            println!("Tag:      {}", view.tag);
            println!("Version:  {}", view.version);
            if let Some(id) = &view.id {
                println!("Basket:   {id}");
            }
            println!("Created:  {}", view.created_at.to_rfc3339());
            println!();
            if view.data.is_empty() {
                println!("(no fields)");
            } else {
                let rows: Vec<Vec<String>> = view
                    .data
                    .iter()
                    .map(|(field, value)| vec![field.clone(), cell(value)])
                    .collect();
                print_table(&["FIELD", "VALUE"], &rows);
            }
            println!();
            let tags: Vec<Vec<String>> = view
                .meta
                .tags
                .iter()
                .map(|(tag, key)| vec![tag.clone(), key.to_string()])
                .collect();
            print_table(&["TAG", "VERSION"], &tags);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(view)?),
    }
    Ok(())
}

/// Print the version table of a stored basket.
pub fn print_versions(basket: &StoredBasket, format: OutputFormat) -> serde_json::Result<()> {
    match format {
        OutputFormat::Human => {
            let rows: Vec<Vec<String>> = basket
                .versions
                .iter()
                .map(|(key, version)| {
                    let head = if basket.tags.get(&basket.head) == Some(key) {
                        "*"
                    } else {
                        ""
                    };
                    vec![
                        head.to_string(),
                        key.to_string(),
                        version.tag.clone(),
                        version
                            .base
                            .as_ref()
                            .map(VersionKey::to_string)
                            .unwrap_or_else(|| "-".to_string()),
                        format!("+{} -{}", version.additions.len(), version.subtractions.len()),
                    ]
                })
                .collect();
            print_table(&["", "VERSION", "TAG", "BASE", "DELTA"], &rows);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(basket)?),
    }
    Ok(())
}

/// Print the outcome of a save.
pub fn print_delta(tag: &str, summary: &DeltaSummary, format: OutputFormat) -> serde_json::Result<()> {
    match format {
        OutputFormat::Human => println!(
            "Saved {tag} ({}): {} added or changed, {} removed",
            summary.version, summary.additions, summary.subtractions
        ),
        OutputFormat::Json => {
            let value = serde_json::json!({
                "tag": tag,
                "version": summary.version,
                "additions": summary.additions,
                "subtractions": summary.subtractions,
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}
