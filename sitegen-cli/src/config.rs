use anyhow::Result;
use clap::ArgMatches;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use sitegen_core::BuildOptions;
use std::path::Path;

/// Optional config file looked up inside the content directory.
pub const CONFIG_FILE: &str = "sitegen.toml";

/// Complete configuration that merges CLI args, env vars, config files, and defaults
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SitegenConfig {
    pub build: BuildConfig,
    /// Options handed to sitegen-core
    pub site: BuildOptions,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Content directory
    pub source: String,
    /// Output directory for generated site
    pub output: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: "./site".to_string(),
            output: "./out".to_string(),
        }
    }
}

impl SitegenConfig {
    /// Load configuration with cascading precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (SITEGEN_*)
    /// 3. `sitegen.toml` in the content directory
    /// 4. Defaults (lowest priority)
    pub fn load(args: &ArgMatches) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        let defaults = Self::default();
        builder = builder.add_source(ConfigBuilder::try_from(&defaults)?);

        let source = args
            .get_one::<String>("source")
            .cloned()
            .unwrap_or(defaults.build.source);
        let config_file = Path::new(&source).join(CONFIG_FILE);
        if config_file.is_file() {
            builder = builder.add_source(File::from(config_file.as_path()));
        }

        builder = builder.add_source(
            Environment::with_prefix("SITEGEN")
                .prefix_separator("_")
                .separator("__"),
        );

        let mut cli_overrides = std::collections::HashMap::new();
        if let Some(source) = args.get_one::<String>("source") {
            cli_overrides.insert("build.source".to_string(), source.clone());
        }
        if let Some(output) = args.get_one::<String>("output") {
            cli_overrides.insert("build.output".to_string(), output.clone());
        }
        if !cli_overrides.is_empty() {
            builder = builder.add_source(ConfigBuilder::try_from(&cli_overrides)?);
        }

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn site_options(&self) -> &BuildOptions {
        &self.site
    }

    pub fn build_config(&self) -> &BuildConfig {
        &self.build
    }
}

pub fn load_build_config(args: &ArgMatches) -> Result<SitegenConfig> {
    SitegenConfig::load(args)
}
