//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use super::template::CONFIG_TEMPLATE;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-level file names, first match wins
const PROJECT_FILES: [&str; 2] = ["eskai.toml", ".eskai.toml"];

/// Prefix of configuration environment variables
const ENV_PREFIX: &str = "ESKAI_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let project_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::figment(Self::global_config_path(), &project_dir, config_path)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// File sources only, lowest priority first
    fn figment(global: Option<PathBuf>, project_dir: &Path, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global
            && global_path.exists()
        {
            debug!(path = %global_path.display(), "Loading global config");
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(path) = Self::project_config_path_in(project_dir) {
            debug!(path = %path.display(), "Loading project config");
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = explicit {
            debug!(path = %path.display(), "Loading explicit config");
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// `$XDG_CONFIG_HOME/eskai/config.toml`, or the platform equivalent
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("eskai").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_path_in(Path::new("."))
    }

    fn project_config_path_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Default history file for the interactive mode
    pub fn default_history_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("eskai").join("history.txt"))
    }

    /// Write the commented template; an existing file is only replaced
    /// with `force`.
    pub fn write_template(path: &Path, force: bool) -> io::Result<()> {
        if path.exists() && !force {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists (use --force to overwrite)", path.display()),
            ));
        }
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, CONFIG_TEMPLATE)
    }

    /// Describe the config file locations being used
    pub fn describe_sources() -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];
        lines.push(format!("  [     ] Environment: {ENV_PREFIX}*"));

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push("  [     ] Project: ./eskai.toml or ./.eskai.toml".to_string()),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{mark}] Global:  {}", path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn extract(figment: Figment) -> FileConfig {
        figment.extract().unwrap()
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.execution.max_concurrent_agents, 3);
        assert!(config.tools.enable_internet);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path().unwrap();
        assert!(path.to_string_lossy().contains("eskai"));
        assert!(path.ends_with("config.toml"));
    }

    #[test]
    fn test_no_files_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = extract(ConfigLoader::figment(None, dir.path(), None));
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_sources_merge_in_priority_order() {
        let dir = TempDir::new().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(
            &global,
            "[execution]\nmax_concurrent_agents = 7\nretry_attempts = 9\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("eskai.toml"),
            "[execution]\nmax_concurrent_agents = 5\n\n[providers.openai]\nmodel = \"gpt-4o\"\n",
        )
        .unwrap();
        let explicit = dir.path().join("explicit.toml");
        fs::write(&explicit, "[providers.openai]\nmodel = \"gpt-4o-mini\"\n").unwrap();

        let config = extract(ConfigLoader::figment(
            Some(global),
            dir.path(),
            Some(&explicit),
        ));
        assert_eq!(config.execution.max_concurrent_agents, 5);
        assert_eq!(config.execution.retry_attempts, 9);
        assert_eq!(config.providers.openai.model.as_deref(), Some("gpt-4o-mini"));
        // Untouched keys keep their defaults
        assert_eq!(config.execution.timeout_seconds, 3600);
    }

    #[test]
    fn test_hidden_project_file_is_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".eskai.toml"), "[logging]\nlevel = \"debug\"\n").unwrap();
        let config = extract(ConfigLoader::figment(None, dir.path(), None));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("bad.toml");
        fs::write(&explicit, "[execution]\nmax_concurrent_agents = \"many\"\n").unwrap();
        let result: Result<FileConfig, _> =
            ConfigLoader::figment(None, dir.path(), Some(&explicit)).extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_write_template_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("eskai.toml");

        ConfigLoader::write_template(&path, false).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, CONFIG_TEMPLATE);

        let err = ConfigLoader::write_template(&path, false).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        ConfigLoader::write_template(&path, true).unwrap();
    }
}
