use serde::{Deserialize, Serialize};

/// Knobs for a single build run. Everything has a sensible default so an
/// empty config file (or none at all) gives the conventional layout.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct BuildOptions {
    /// Template every Markdown page extends.
    pub master_template: String,
    /// Block in the master template that receives the page body.
    pub content_block: String,
    /// Extension (without the dot) that marks a content file as Markdown.
    pub markdown_extension: String,
    /// Base-name prefixes of template fragments that are never rendered as pages.
    pub reserved_prefixes: Vec<String>,
    pub images_dir: String,
    pub stylesheet: String,
    pub index_template: String,
    pub syntax_theme: String,
    /// Remove top-level `*.html` files from the output directory before building.
    pub clean_output: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            master_template: "master.html".to_string(),
            content_block: "content".to_string(),
            markdown_extension: "md".to_string(),
            reserved_prefixes: vec!["master".to_string(), "menu".to_string()],
            images_dir: "img".to_string(),
            stylesheet: "site.css".to_string(),
            index_template: "index.html".to_string(),
            syntax_theme: "base16-ocean.dark".to_string(),
            clean_output: false,
        }
    }
}

impl BuildOptions {
    /// Whether a base name belongs to a template fragment rather than a page.
    pub fn is_reserved(&self, base_name: &str) -> bool {
        self.reserved_prefixes
            .iter()
            .any(|prefix| base_name.starts_with(prefix.as_str()))
    }
}
