use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Command-line values that take precedence over the configuration file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub seed: Option<String>,
    pub max_pages: Option<usize>,
    pub concurrency: Option<usize>,
    pub summary_path: Option<String>,
}

impl ConfigOverrides {
    /// Applies every override that is set onto `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(seed) = &self.seed {
            config.crawler.seed = seed.clone();
        }
        if let Some(max_pages) = self.max_pages {
            config.crawler.max_pages = max_pages;
        }
        if let Some(concurrency) = self.concurrency {
            config.crawler.concurrency = concurrency;
        }
        if let Some(path) = &self.summary_path {
            config.output.summary_path = Some(path.clone());
        }
    }
}

/// Loads and parses a configuration file from the given path
///
/// The result is not validated yet: the seed is commonly supplied on the
/// command line, so validation runs after overrides in [`resolve_config`].
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use breadth_crawl::config::load_config;
///
/// let config = load_config(Path::new("crawl.toml")).unwrap();
/// println!("Max pages: {}", config.crawler.max_pages);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Builds the effective configuration
///
/// Starts from the file at `path` (or defaults when there is none), applies
/// the command-line overrides and validates the outcome.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    overrides.apply(&mut config);
    validate(&config)?;

    Ok(config)
}
