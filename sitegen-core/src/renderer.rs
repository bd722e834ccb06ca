use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::BuildOptions;
use crate::links::{LinkWarning, check_links};
use crate::markdown::{MalformedContent, extract_title, markdown_to_html, normalize_source};
use crate::site::{ContentFile, ContentKind, SiteModel};
use crate::template::{TemplateError, TemplateRenderer};

/// Value of the `menu` field for ordinary content pages.
pub const CONTENT_MENU: &str = "content";

#[derive(Error, Debug)]
#[error("Failed to render {}", file.display())]
pub struct RenderError {
    pub file: PathBuf,
    #[source]
    pub kind: RenderErrorKind,
}

#[derive(Error, Debug)]
pub enum RenderErrorKind {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed content: {0}")]
    MalformedContent(#[from] MalformedContent),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// What a single page render produced.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub source: PathBuf,
    pub output: PathBuf,
    pub title: String,
    pub warnings: Vec<LinkWarning>,
}

/// Turns content files into finished pages against a shared, read-only model.
pub struct PageRenderer<'a> {
    templates: &'a mut TemplateRenderer,
    model: &'a SiteModel,
    options: &'a BuildOptions,
}

impl<'a> PageRenderer<'a> {
    pub fn new(
        templates: &'a mut TemplateRenderer,
        model: &'a SiteModel,
        options: &'a BuildOptions,
    ) -> Self {
        Self {
            templates,
            model,
            options,
        }
    }

    /// Render `page` into `<output_dir>/<base name>.html`. Nothing is written
    /// unless rendering succeeds.
    pub fn render(&mut self, page: &ContentFile, output_dir: &Path) -> Result<RenderedPage, RenderError> {
        self.render_inner(page, output_dir).map_err(|kind| RenderError {
            file: page.path.clone(),
            kind,
        })
    }

    fn render_inner(
        &mut self,
        page: &ContentFile,
        output_dir: &Path,
    ) -> Result<RenderedPage, RenderErrorKind> {
        let raw = std::fs::read_to_string(&page.path)?;

        let warnings = check_links(&raw, &page.file_name());
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }

        let (body, source) = match page.kind {
            ContentKind::Markdown => {
                let body = markdown_to_html(&normalize_source(&raw), &self.options.syntax_theme);
                let source = self.wrap_in_master(&body);
                (body, source)
            }
            ContentKind::Html => (raw.clone(), raw),
        };

        let title = extract_title(&page.base_name, &body)?;
        let context = self.model.page_context(&title, CONTENT_MENU);
        let html = self
            .templates
            .render_source(&page.file_name(), &source, &context)?;

        let output = page.out_path(output_dir);
        write_page(&output, &html)?;
        tracing::info!("Rendered {} -> {}", page.file_name(), output.display());

        Ok(RenderedPage {
            source: page.path.clone(),
            output,
            title,
            warnings,
        })
    }

    fn wrap_in_master(&self, body: &str) -> String {
        let block = &self.options.content_block;
        format!(
            "{{% extends \"{}\" %}}{{% block {} %}}{}{{% endblock {} %}}",
            self.options.master_template, block, body, block
        )
    }
}

/// Write a finished page, creating parent directories as needed.
pub(crate) fn write_page(path: &Path, html: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
}
