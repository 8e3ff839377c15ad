//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".gridsel/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    resource: Option<String>,
    #[serde(default)]
    pretty: Option<bool>,
}

impl Defaults {
    fn default_resource() -> String {
        "posts".to_owned()
    }

    fn default_pretty() -> bool {
        true
    }

    /// Resource used when a command does not name one.
    pub fn resource(&self) -> String {
        self.resource
            .clone()
            .unwrap_or_else(Self::default_resource)
    }

    /// Whether JSON output is pretty-printed.
    pub fn pretty(&self) -> bool {
        self.pretty.unwrap_or_else(Self::default_pretty)
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            resource: Some(Self::default_resource()),
            pretty: Some(Self::default_pretty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logging {
    #[serde(default)]
    level: Option<String>,
}

impl Logging {
    fn default_level() -> String {
        "warn".into()
    }

    /// Level filter for the stderr subscriber.
    pub fn level(&self) -> String {
        self.level.clone().unwrap_or_else(Self::default_level)
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: Some(Self::default_level()),
        }
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    resource: Option<String>,
    log_level: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            resource: env::var("GRIDSEL_RESOURCE").ok(),
            log_level: env::var("GRIDSEL_LOG_LEVEL").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(resource: &str, log_level: &str) -> Self {
        Self {
            resource: Some(resource.to_owned()),
            log_level: Some(log_level.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        Self::load_with_layers(global, workspace, env)
    }

    /// Load configuration from an explicit file on top of the embedded defaults, still honoring
    /// env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_with_layers(None, Some(path.to_path_buf()), EnvOverrides::from_env())
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("failed to load config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            defaults: merge_defaults(self.defaults, other.defaults),
            logging: merge_logging(self.logging, other.logging),
        }
    }
}

fn merge_defaults(base: Defaults, overlay: Defaults) -> Defaults {
    Defaults {
        resource: overlay.resource.or(base.resource),
        pretty: overlay.pretty.or(base.pretty),
    }
}

fn merge_logging(base: Logging, overlay: Logging) -> Logging {
    Logging {
        level: overlay.level.or(base.level),
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("gridsel/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(resource) = env.resource {
        config.defaults.resource = Some(resource);
    }
    if let Some(level) = env.log_level {
        config.logging.level = Some(level);
    }
    config
}
