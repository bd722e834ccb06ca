use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::config::BuildOptions;
use crate::links::LinkWarning;
use crate::markdown::extract_title;
use crate::renderer::{PageRenderer, RenderError, RenderErrorKind, RenderedPage, write_page};
use crate::scanner::{ScanError, SiteScanner};
use crate::site::{LoadError, SiteModel};
use crate::template::{TemplateError, TemplateRenderer};

/// Value of the `menu` field when rendering the index page.
pub const INDEX_MENU: &str = "index";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Source directory not specified")]
    MissingSourceDir,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        BuildError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Outcome of a successful build.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages: Vec<RenderedPage>,
    pub index: Option<PathBuf>,
    pub assets_copied: usize,
    pub asset_failures: usize,
}

impl BuildReport {
    pub fn warnings(&self) -> impl Iterator<Item = &LinkWarning> {
        self.pages.iter().flat_map(|page| page.warnings.iter())
    }
}

pub struct SiteBuilder {
    source_dir: Option<PathBuf>,
    output_dir: PathBuf,
    options: BuildOptions,
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteBuilder {
    pub fn new() -> Self {
        Self {
            source_dir: None,
            output_dir: PathBuf::from("./out"),
            options: BuildOptions::default(),
        }
    }

    // Required configuration
    pub fn source_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Load the shared model and templates. Fails if `toc` or `vars` is missing.
    pub fn build(self) -> Result<Site, BuildError> {
        let source_dir = self.source_dir.ok_or(BuildError::MissingSourceDir)?;

        let model = SiteModel::load(&source_dir)?;
        tracing::info!(
            "Loaded {} toc entries and {} variables",
            model.toc.len(),
            model.vars.len()
        );
        let templates = TemplateRenderer::load(&source_dir, &self.options)?;

        Ok(Site {
            source_dir,
            output_dir: self.output_dir,
            options: self.options,
            model,
            templates,
        })
    }
}

pub struct Site {
    source_dir: PathBuf,
    output_dir: PathBuf,
    options: BuildOptions,
    model: SiteModel,
    templates: TemplateRenderer,
}

impl Site {
    pub fn model(&self) -> &SiteModel {
        &self.model
    }

    pub fn render_all(&mut self) -> Result<BuildReport, BuildError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| BuildError::io(&self.output_dir, e))?;
        if self.options.clean_output {
            self.clean_output()?;
        }

        let mut report = BuildReport::default();

        let pages = SiteScanner::new(&self.source_dir, &self.options).scan_pages()?;
        tracing::info!("Found {} pages", pages.len());
        let mut renderer = PageRenderer::new(&mut self.templates, &self.model, &self.options);
        for page in &pages {
            report.pages.push(renderer.render(page, &self.output_dir)?);
        }

        let (copied, failed) = copy_dir(
            &self.source_dir.join(&self.options.images_dir),
            &self.output_dir.join(&self.options.images_dir),
        );
        report.assets_copied += copied;
        report.asset_failures += failed;

        report.index = self.render_index()?;

        let stylesheet = &self.options.stylesheet;
        match copy_optional(&self.source_dir.join(stylesheet), &self.output_dir.join(stylesheet)) {
            Some(true) => report.assets_copied += 1,
            Some(false) => report.asset_failures += 1,
            None => {}
        }

        Ok(report)
    }

    fn render_index(&self) -> Result<Option<PathBuf>, BuildError> {
        let name = &self.options.index_template;
        if !self.templates.has_template(name) {
            tracing::debug!("No {} template, skipping index", name);
            return Ok(None);
        }

        let source_path = self.source_dir.join(name);
        let render_err = |kind: RenderErrorKind| RenderError {
            file: source_path.clone(),
            kind,
        };

        let source = std::fs::read_to_string(&source_path)
            .map_err(|e| render_err(e.into()))?;
        let title = extract_title(INDEX_MENU, &source).map_err(|e| render_err(e.into()))?;
        let context = self.model.page_context(&title, INDEX_MENU);
        let html = self
            .templates
            .render(name, &context)
            .map_err(|e| render_err(e.into()))?;

        let output = self.output_dir.join("index.html");
        write_page(&output, &html).map_err(|e| render_err(e.into()))?;
        tracing::info!("Rendered {} -> {}", name, output.display());
        Ok(Some(output))
    }

    /// Drop top-level `*.html` files left over from earlier builds.
    fn clean_output(&self) -> Result<(), BuildError> {
        let entries = std::fs::read_dir(&self.output_dir).map_err(|e| BuildError::io(&self.output_dir, e))?;
        for entry in entries {
            let path = entry.map_err(|e| BuildError::io(&self.output_dir, e))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "html") {
                std::fs::remove_file(&path).map_err(|e| BuildError::io(&path, e))?;
                tracing::debug!("Removed stale {}", path.display());
            }
        }
        Ok(())
    }
}

/// Mirror `from` into `to`, overwriting existing files. Failures are logged
/// and counted, never fatal. Returns `(copied, failed)`.
fn copy_dir(from: &Path, to: &Path) -> (usize, usize) {
    if !from.is_dir() {
        return (0, 0);
    }

    let mut copied = 0;
    let mut failed = 0;
    for entry in WalkDir::new(from).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", from.display(), e);
                failed += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(from) else {
            continue;
        };
        match copy_optional(entry.path(), &to.join(relative)) {
            Some(true) => copied += 1,
            Some(false) => failed += 1,
            None => {}
        }
    }

    tracing::info!("Copied {} files from {}", copied, from.display());
    (copied, failed)
}

/// Copy a single file if it exists. `None` when absent, otherwise whether
/// the copy worked.
fn copy_optional(from: &Path, to: &Path) -> Option<bool> {
    if !from.is_file() {
        return None;
    }

    let result = to
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|_| std::fs::copy(from, to));
    match result {
        Ok(_) => Some(true),
        Err(e) => {
            tracing::warn!("Failed to copy {} to {}: {}", from.display(), to.display(), e);
            Some(false)
        }
    }
}

/// Build a whole site: load the model, render every page, copy assets and
/// render the index.
pub fn build_site(
    options: &BuildOptions,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<BuildReport, BuildError> {
    let mut site = SiteBuilder::new()
        .source_dir(source_dir)
        .output_dir(output_dir)
        .options(options.clone())
        .build()?;
    site.render_all()
}
