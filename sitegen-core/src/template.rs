use std::path::{Path, PathBuf};

use tera::{Context, Tera};
use thiserror::Error;

use crate::config::BuildOptions;

/// Written in content where a literal `{{` is wanted; swapped in after rendering.
pub const ESCAPE_TOKEN: &str = "LBRACELBRACE";
pub const OPEN_DELIMITER: &str = "{{";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    #[error("IO error reading template {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Replace the escape token with the engine's opening delimiter.
pub fn unescape_delimiters(rendered: &str) -> String {
    rendered.replace(ESCAPE_TOKEN, OPEN_DELIMITER)
}

/// Wraps Tera with the template fragments of one content directory.
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Register every reserved fragment (`master*`, `menu*`) and the index
    /// template found directly inside `content_dir`, keyed by file name.
    /// Only `.html` and Markdown files are read; other reserved-prefix files
    /// (images and the like) are skipped.
    pub fn load(content_dir: &Path, options: &BuildOptions) -> Result<Self, TemplateError> {
        let mut sources = Vec::new();
        let entries = std::fs::read_dir(content_dir).map_err(|source| TemplateError::Io {
            path: content_dir.to_path_buf(),
            source,
        })?;

        for entry in entries {
            let path = entry
                .map_err(|source| TemplateError::Io {
                    path: content_dir.to_path_buf(),
                    source,
                })?
                .path();
            if !path.is_file() {
                continue;
            }
            let (Some(name), Some(stem)) = (path.file_name(), path.file_stem()) else {
                continue;
            };
            let name = name.to_string_lossy().to_string();
            if !options.is_reserved(&stem.to_string_lossy()) && name != options.index_template {
                continue;
            }
            let is_text = path
                .extension()
                .is_some_and(|ext| ext == "html" || ext == options.markdown_extension.as_str());
            if !is_text {
                tracing::debug!("Skipping non-template {}", name);
                continue;
            }

            let source = std::fs::read_to_string(&path)
                .map_err(|source| TemplateError::Io { path: path.clone(), source })?;
            tracing::debug!("Registered template {}", name);
            sources.push((name, source));
        }

        Self::from_sources(sources)
    }

    pub fn from_sources<N, S>(sources: Vec<(N, S)>) -> Result<Self, TemplateError>
    where
        N: AsRef<str>,
        S: AsRef<str>,
    {
        let mut tera = Tera::default();
        // Variables are plain substitution values, whatever the template's suffix
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(sources)?;
        Ok(Self { tera })
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Register `source` under `name` (replacing any previous one) and render it.
    pub fn render_source(
        &mut self,
        name: &str,
        source: &str,
        context: &Context,
    ) -> Result<String, TemplateError> {
        self.tera.add_raw_template(name, source)?;
        self.render(name, context)
    }

    /// Render a registered template and undo delimiter escaping.
    pub fn render(&self, name: &str, context: &Context) -> Result<String, TemplateError> {
        let rendered = self.tera.render(name, context)?;
        Ok(unescape_delimiters(&rendered))
    }
}
