use std::path::Path;

use serde::Serialize;

use crate::site::{LoadError, read_required};

/// One row of the navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TocEntry {
    pub title: String,
    pub link: String,
    /// Heading-only row without a target file.
    pub is_section: bool,
    pub is_first: bool,
    pub is_empty: bool,
}

/// Read the `toc` descriptor. Missing file is fatal.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<TocEntry>, LoadError> {
    let content = read_required(path.as_ref())?;
    let entries = parse(&content);
    tracing::debug!("Loaded {} toc entries from {}", entries.len(), path.as_ref().display());
    Ok(entries)
}

/// Parse lines of the form `"<title>" <file-or-url>`, keeping source order.
/// Comment lines and lines without a quoted title are skipped.
pub fn parse(content: &str) -> Vec<TocEntry> {
    let mut entries = Vec::new();

    for line in content.replace("\r\n", "\n").lines() {
        if line.trim_start().starts_with("//") {
            continue;
        }
        let Some((title, file)) = split_line(line) else {
            continue;
        };

        let link = if file.starts_with("http") {
            file.to_string()
        } else {
            format!("{file}.html")
        };

        entries.push(TocEntry {
            is_section: file.is_empty(),
            is_first: entries.is_empty(),
            is_empty: title.trim().is_empty(),
            title: title.to_string(),
            link,
        });
    }

    entries
}

fn split_line(line: &str) -> Option<(&str, &str)> {
    let open = line.find('"')?;
    let close = open + 1 + line[open + 1..].find('"')?;
    Some((&line[open + 1..close], line[close + 1..].trim()))
}
