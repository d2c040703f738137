use notebook_porter_engine::TableOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// User preferences: where the workspace lives and the tabular import
/// options last asked to be remembered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_workspace_path")]
    pub workspace_path: PathBuf,
    #[serde(default)]
    pub tabular: TableOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace_path: Self::default_workspace_path(),
            tabular: TableOptions::default(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded workspace path
        config.workspace_path =
            Self::expand_path(&config.workspace_path).unwrap_or(config.workspace_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// The saved config, or defaults when there is none yet
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/notebook-porter");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn default_workspace_path() -> PathBuf {
        let data_dir = shellexpand::tilde("~/.local/share/notebook-porter");
        PathBuf::from(data_dir.as_ref()).join("workspace.json")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notebook_porter_engine::Orientation;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        // Should contain the expected config file name
        assert!(path_str.ends_with(".config/notebook-porter/config.toml"));
    }

    #[test]
    fn test_default_workspace_path() {
        let config = Config::default();
        let path_str = config.workspace_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with("notebook-porter/workspace.json"));
        assert_eq!(config.tabular, TableOptions::default());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            workspace_path: PathBuf::from("/tmp/workspace.json"),
            tabular: TableOptions {
                separator: ';',
                has_headers: false,
                orientation: Orientation::Column,
                ..TableOptions::default()
            },
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config_content = r#"
[tabular]
separator = "\t"
simplify_single_column = true
"#;

        let config: Config = toml::from_str(config_content).unwrap();

        assert_eq!(config.tabular.separator, '\t');
        assert!(config.tabular.simplify_single_column);
        assert!(config.tabular.has_headers);
        assert_eq!(config.tabular.orientation, Orientation::Row);
        assert!(config.workspace_path.ends_with("workspace.json"));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/workspace.json");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[tabular]\norientation = \"diagonal\"\n").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(
            result,
            Err(ConfigError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let test_config = Config {
            workspace_path: PathBuf::from("/tmp/workspace.json"),
            tabular: TableOptions {
                use_header_names: false,
                ..TableOptions::default()
            },
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_config_with_env_var_in_toml() {
        unsafe {
            env::set_var("PORTER_DATA", "/custom/data");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "workspace_path = \"$PORTER_DATA/workspace.json\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(
            config.workspace_path,
            PathBuf::from("/custom/data/workspace.json")
        );

        unsafe {
            env::remove_var("PORTER_DATA");
        }
    }
}
