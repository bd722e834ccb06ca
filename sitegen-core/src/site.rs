use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tera::Context;
use thiserror::Error;

use crate::toc::{self, TocEntry};
use crate::vars::{self, Variables};

pub const TOC_FILE: &str = "toc";
pub const VARS_FILE: &str = "vars";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Missing required file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a file that has to exist, telling absence apart from other failures.
pub(crate) fn read_required(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::MissingFile(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Data shared by every page of a build. Built once, read-only afterward.
#[derive(Debug, Clone, Default)]
pub struct SiteModel {
    pub vars: Variables,
    pub toc: Vec<TocEntry>,
}

impl SiteModel {
    pub fn new(vars: Variables, toc: Vec<TocEntry>) -> Self {
        Self { vars, toc }
    }

    /// Load `toc` and `vars` from the content directory.
    pub fn load<P: AsRef<Path>>(content_dir: P) -> Result<Self, LoadError> {
        let content_dir = content_dir.as_ref();
        let toc = toc::load(content_dir.join(TOC_FILE))?;
        let vars = vars::load(content_dir.join(VARS_FILE))?;
        Ok(Self { vars, toc })
    }

    /// Compose the render model for one page. Variables go in first so the
    /// page fields win when a variable shares their name.
    pub fn page_context(&self, title: &str, menu: &str) -> Context {
        let mut context = Context::new();
        for (key, value) in &self.vars {
            context.insert(key.as_str(), value);
        }
        context.insert("toc", &self.toc);
        context.insert("title", title);
        context.insert("menu", menu);
        context
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Markdown,
    Html,
}

/// A page source on disk.
#[derive(Debug, Clone)]
pub struct ContentFile {
    pub path: PathBuf,
    /// File name without extension; names the output file and is the default title.
    pub base_name: String,
    pub kind: ContentKind,
}

impl ContentFile {
    /// Classify a file by its extension. Returns `None` when the path has no
    /// usable file name.
    pub fn new<P: AsRef<Path>>(path: P, markdown_extension: &str) -> Option<Self> {
        let path = path.as_ref();
        let base_name = path.file_stem()?.to_string_lossy().to_string();
        let kind = match path.extension() {
            Some(ext) if ext == markdown_extension => ContentKind::Markdown,
            _ => ContentKind::Html,
        };

        Some(Self {
            path: path.to_path_buf(),
            base_name,
            kind,
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.base_name.clone())
    }

    pub fn out_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.html", self.base_name))
    }
}
