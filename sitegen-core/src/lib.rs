pub mod builder;
pub mod config;
pub mod links;
pub mod markdown;
pub mod renderer;
pub mod scanner;
pub mod site;
pub mod template;
pub mod toc;
pub mod vars;

// Re-export main types
pub use builder::{BuildError, BuildReport, Site, SiteBuilder, build_site};
pub use config::BuildOptions;
pub use links::{LinkWarning, check_links};
pub use markdown::{MalformedContent, extract_title};
pub use renderer::{PageRenderer, RenderError, RenderedPage};
pub use site::{ContentFile, ContentKind, LoadError, SiteModel};
pub use template::{TemplateError, TemplateRenderer};
pub use toc::TocEntry;
pub use vars::Variables;
