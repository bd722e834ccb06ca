use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::BuildOptions;
use crate::site::{ContentFile, ContentKind};

#[derive(Error, Debug)]
#[error("IO error scanning {}: {source}", path.display())]
pub struct ScanError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Finds the pages of a content directory.
pub struct SiteScanner<'a> {
    source_dir: PathBuf,
    options: &'a BuildOptions,
}

impl<'a> SiteScanner<'a> {
    pub fn new<P: AsRef<Path>>(path: P, options: &'a BuildOptions) -> Self {
        Self {
            source_dir: path.as_ref().to_path_buf(),
            options,
        }
    }

    /// Markdown files directly inside the content directory, minus template
    /// fragments, sorted by file name.
    pub fn scan_pages(&self) -> Result<Vec<ContentFile>, ScanError> {
        let io_err = |source| ScanError {
            path: self.source_dir.clone(),
            source,
        };
        let mut pages = Vec::new();

        for entry in std::fs::read_dir(&self.source_dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if !path.is_file() {
                continue;
            }
            let Some(page) = ContentFile::new(&path, &self.options.markdown_extension) else {
                continue;
            };
            if page.kind != ContentKind::Markdown || self.options.is_reserved(&page.base_name) {
                tracing::debug!("Skipping {}", path.display());
                continue;
            }
            pages.push(page);
        }

        pages.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(pages)
    }
}
