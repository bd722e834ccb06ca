use anyhow::Result;
use clap::Command;
use tracing_subscriber::EnvFilter;

mod cmd;
mod config;

/// `RUST_LOG` directives when present and valid, `info` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let matches = cmd::build::add_build_args(Command::new("sitegen"))
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build a static site from Markdown fragments, a toc and a vars file")
        .get_matches();

    cmd::build::execute(&matches)
}
