use std::collections::BTreeMap;
use std::path::Path;

use crate::site::{LoadError, read_required};

/// Global substitution values shared by every page.
pub type Variables = BTreeMap<String, String>;

/// Read a `key=value` file. Missing file is fatal.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Variables, LoadError> {
    let content = read_required(path.as_ref())?;
    let vars = parse(&content);
    tracing::debug!("Loaded {} variables from {}", vars.len(), path.as_ref().display());
    Ok(vars)
}

/// Split every line on its first `=`. Lines without one are ignored and the
/// last occurrence of a key wins.
pub fn parse(content: &str) -> Variables {
    let mut vars = Variables::new();

    for line in content.replace("\r\n", "\n").lines() {
        if let Some((key, value)) = line.split_once('=') {
            vars.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    vars
}
