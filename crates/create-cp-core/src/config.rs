//! Hierarchical runtime configuration
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Built-in defaults
//! 2. User config (~/.create-cp/config.yaml), or an explicit file
//! 3. Environment variables (CREATE_CP_* prefix)
//! 4. CLI flags (handled by caller)

use crate::catalog::{builtin_owners, TemplateNode};
use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use tracing::debug;

/// Directory used when the project-name prompt is left blank
pub const DEFAULT_TARGET_DIR: &str = "cp-project";

/// Environment variable package managers export to child processes
pub const DEFAULT_USER_AGENT_VAR: &str = "npm_config_user_agent";

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolved runtime settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RuntimeConfig {
    /// Fallback target directory
    pub default_target_dir: String,

    /// Version-control client used to fetch templates
    pub vcs_command: String,

    /// Shallow-clone depth, full history when unset
    pub clone_depth: Option<u32>,

    /// Variable carrying the invoking package manager's user agent
    pub user_agent_var: String,

    /// Owners appended after the built-in catalog
    pub owners: Vec<TemplateNode>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_target_dir: DEFAULT_TARGET_DIR.to_string(),
            vcs_command: "git".to_string(),
            clone_depth: None,
            user_agent_var: DEFAULT_USER_AGENT_VAR.to_string(),
            owners: Vec::new(),
        }
    }
}

impl RuntimeConfig {
    /// Built-in owners followed by any configured ones
    pub fn owner_tree(&self) -> Vec<TemplateNode> {
        let mut owners = builtin_owners();
        owners.extend(self.owners.iter().cloned());
        owners
    }
}

/// Configuration hierarchy loader
pub struct ConfigLoader {
    /// Directory holding `config.yaml`, if one could be determined
    config_dir: Option<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a loader rooted at `~/.create-cp`
    pub fn new() -> Self {
        let config_dir = dirs::home_dir()
            .and_then(|home| Utf8PathBuf::from_path_buf(home).ok())
            .map(|home| home.join(".create-cp"));
        Self { config_dir }
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self {
            config_dir: Some(config_dir),
        }
    }

    /// Load with the default file location
    pub fn load(&self) -> Result<RuntimeConfig> {
        let path = self
            .config_dir
            .as_ref()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .filter(|path| path.exists());
        self.load_from(path.as_deref())
    }

    /// Load with an explicit file in place of the default location.
    ///
    /// The file must exist when given.
    pub fn load_file(&self, path: &Utf8Path) -> Result<RuntimeConfig> {
        if !path.exists() {
            return Err(Error::invalid_config(format!(
                "Config file not found: {}",
                path
            )));
        }
        self.load_from(Some(path))
    }

    fn load_from(&self, path: Option<&Utf8Path>) -> Result<RuntimeConfig> {
        let mut config = match path {
            Some(path) => {
                debug!("Loading config from {}", path);
                Self::load_yaml_file(path)?
            }
            None => RuntimeConfig::default(),
        };
        Self::apply_env_overrides(&mut config)?;
        Ok(config)
    }

    fn load_yaml_file(path: &Utf8Path) -> Result<RuntimeConfig> {
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(RuntimeConfig::default());
        }
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    fn apply_env_overrides(config: &mut RuntimeConfig) -> Result<()> {
        if let Ok(val) = env::var("CREATE_CP_DEFAULT_DIR") {
            if !val.trim().is_empty() {
                config.default_target_dir = val;
            }
        }

        if let Ok(val) = env::var("CREATE_CP_VCS") {
            if !val.trim().is_empty() {
                config.vcs_command = val;
            }
        }

        if let Ok(val) = env::var("CREATE_CP_CLONE_DEPTH") {
            let depth = val.parse().map_err(|_| {
                Error::invalid_config("CREATE_CP_CLONE_DEPTH must be a valid number")
            })?;
            config.clone_depth = Some(depth);
        }

        Ok(())
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> Option<&Utf8Path> {
        self.config_dir.as_deref()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_temp_loader() -> (ConfigLoader, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_dir =
            Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("Invalid UTF-8 path");
        (ConfigLoader::with_dir(config_dir), temp_dir)
    }

    fn clear_env() {
        env::remove_var("CREATE_CP_DEFAULT_DIR");
        env::remove_var("CREATE_CP_VCS");
        env::remove_var("CREATE_CP_CLONE_DEPTH");
    }

    #[test]
    #[serial]
    fn test_defaults_without_file() {
        clear_env();
        let (loader, _temp) = create_temp_loader();
        let config = loader.load().unwrap();
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.default_target_dir, "cp-project");
        assert_eq!(config.vcs_command, "git");
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        clear_env();
        let (loader, temp) = create_temp_loader();
        let content = r#"
default-target-dir: my-projects
clone-depth: 1
owners:
  - name: acme
    color: cyan
    variants:
      - name: acme-web
        locator: https://example.com/acme/web.git
"#;
        fs::write(temp.path().join("config.yaml"), content).unwrap();

        let config = loader.load().unwrap();
        assert_eq!(config.default_target_dir, "my-projects");
        assert_eq!(config.clone_depth, Some(1));
        assert_eq!(config.vcs_command, "git");
        assert_eq!(config.owners.len(), 1);

        let tree = config.owner_tree();
        assert_eq!(tree.len(), builtin_owners().len() + 1);
        assert_eq!(tree.last().unwrap().name, "acme");
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let (loader, temp) = create_temp_loader();
        fs::write(temp.path().join("config.yaml"), "vcs-command: hg\n").unwrap();

        env::set_var("CREATE_CP_VCS", "/usr/local/bin/git");
        env::set_var("CREATE_CP_CLONE_DEPTH", "3");
        let config = loader.load();
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.vcs_command, "/usr/local/bin/git");
        assert_eq!(config.clone_depth, Some(3));
    }

    #[test]
    #[serial]
    fn test_invalid_depth_env() {
        clear_env();
        let (loader, _temp) = create_temp_loader();
        env::set_var("CREATE_CP_CLONE_DEPTH", "deep");
        let result = loader.load();
        clear_env();

        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    #[serial]
    fn test_malformed_file() {
        clear_env();
        let (loader, temp) = create_temp_loader();
        fs::write(temp.path().join("config.yaml"), "clone-depth: [oops").unwrap();
        assert!(matches!(loader.load(), Err(Error::InvalidConfig { .. })));
    }

    #[test]
    #[serial]
    fn test_explicit_missing_file() {
        clear_env();
        let (loader, temp) = create_temp_loader();
        let path = Utf8PathBuf::from_path_buf(temp.path().join("nope.yaml")).unwrap();
        assert!(matches!(
            loader.load_file(&path),
            Err(Error::InvalidConfig { .. })
        ));
    }
}
