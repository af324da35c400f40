use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the current directory.
pub const PROJECT_CONFIG_FILE: &str = "taskrelay.toml";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub clean: CleanConfig,
    pub data: DataConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Program run inside each collaborator directory.
    pub build_tool: String,
    /// Extra arguments passed before the target name.
    pub tool_args: Vec<String>,
    pub keep_going: bool,
    pub color: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// Cleaned in declaration order.
    pub dirs: Vec<PathBuf>,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub dir: PathBuf,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub root: PathBuf,
    pub glob: String,
    pub line_numbers: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            build_tool: "make".to_string(),
            tool_args: Vec::new(),
            keep_going: false,
            color: true,
        }
    }
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            dirs: vec![PathBuf::from("qpy"), PathBuf::from("example")],
            target: "clean".to_string(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            target: "convert".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            glob: "*.py".to_string(),
            line_numbers: false,
        }
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Project(PathBuf),
    User(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::Project(path) | ConfigSource::User(path) => {
                Some(path.as_path())
            }
            ConfigSource::Defaults => None,
        }
    }
}

impl Config {
    /// Load the configuration for a run started in the current directory.
    pub fn load(explicit: Option<&Path>) -> AppResult<(Self, ConfigSource)> {
        let cwd = std::env::current_dir()?;
        let source = Self::locate(explicit, &cwd, Self::user_config_path().as_deref())?;
        let config = match source.path() {
            Some(path) => Self::load_custom(path)?,
            None => Config::default(),
        };
        Ok((config, source))
    }

    /// Resolve the configuration file: explicit path, then the project file,
    /// then the per-user file, then built-in defaults.
    pub fn locate(
        explicit: Option<&Path>,
        project_dir: &Path,
        user_path: Option<&Path>,
    ) -> AppResult<ConfigSource> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(AppError::Config(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            return Ok(ConfigSource::Explicit(path.to_path_buf()));
        }

        let project = project_dir.join(PROJECT_CONFIG_FILE);
        if project.is_file() {
            return Ok(ConfigSource::Project(project));
        }

        if let Some(user) = user_path
            && user.is_file()
        {
            return Ok(ConfigSource::User(user.to_path_buf()));
        }

        Ok(ConfigSource::Defaults)
    }

    pub fn load_custom(config_path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(config_path)
            .map_err(|e| AppError::Io(format!("{}: {}", config_path.display(), e)))?;

        Self::from_toml(&content).map_err(|e| match e {
            AppError::Config(msg) => AppError::Config(format!("{}: {}", config_path.display(), msg)),
            other => other,
        })
    }

    pub fn from_toml(content: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.general.build_tool.trim().is_empty() {
            return Err(AppError::Config("Build tool cannot be empty".to_string()));
        }

        if self.clean.target.trim().is_empty() {
            return Err(AppError::Config("Clean target cannot be empty".to_string()));
        }

        if self.clean.dirs.iter().any(|dir| dir.as_os_str().is_empty()) {
            return Err(AppError::Config(
                "Clean directories cannot contain an empty entry".to_string(),
            ));
        }

        if self.data.dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory cannot be empty".to_string()));
        }

        if self.data.target.trim().is_empty() {
            return Err(AppError::Config("Data target cannot be empty".to_string()));
        }

        glob::Pattern::new(&self.search.glob).map_err(|e| {
            AppError::Config(format!("Invalid search glob '{}': {}", self.search.glob, e))
        })?;

        Ok(())
    }

    pub fn to_toml(&self) -> AppResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))
    }

    pub fn save(&self, config_path: &Path) -> AppResult<()> {
        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(config_path, self.to_toml()?)?;
        Ok(())
    }

    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("taskrelay").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_reproduce_repository_layout() {
        let config = Config::default();
        assert_eq!(config.general.build_tool, "make");
        assert_eq!(
            config.clean.dirs,
            vec![PathBuf::from("qpy"), PathBuf::from("example")]
        );
        assert_eq!(config.clean.target, "clean");
        assert_eq!(config.data.dir, PathBuf::from("data"));
        assert_eq!(config.data.target, "convert");
        assert_eq!(config.search.glob, "*.py");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = Config::from_toml(
            r#"
            [clean]
            dirs = ["lib", "docs", "demo"]

            [general]
            keep_going = true
            "#,
        )
        .unwrap();

        assert_eq!(
            config.clean.dirs,
            vec![PathBuf::from("lib"), PathBuf::from("docs"), PathBuf::from("demo")]
        );
        assert_eq!(config.clean.target, "clean");
        assert!(config.general.keep_going);
        assert_eq!(config.general.build_tool, "make");
        assert_eq!(config.data, DataConfig::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let err = Config::from_toml("[clean]\ndirs = [\"qpy\", \"\"]\n").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = Config::from_toml("[general]\nbuild_tool = \"  \"\n").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = Config::from_toml("[search]\nglob = \"[\"\n").unwrap_err();
        assert!(err.to_string().contains("Invalid search glob"));

        let err = Config::from_toml("[clean\n").unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_locate_precedence() {
        let dir = TempDir::new().unwrap();
        let user = dir.path().join("user.toml");
        std::fs::write(&user, "").unwrap();

        let source = Config::locate(None, dir.path(), Some(user.as_path())).unwrap();
        assert_eq!(source, ConfigSource::User(user.clone()));

        let project = dir.path().join(PROJECT_CONFIG_FILE);
        std::fs::write(&project, "").unwrap();
        let source = Config::locate(None, dir.path(), Some(user.as_path())).unwrap();
        assert_eq!(source, ConfigSource::Project(project));

        let source = Config::locate(Some(user.as_path()), dir.path(), None).unwrap();
        assert_eq!(source, ConfigSource::Explicit(user));
    }

    #[test]
    fn test_locate_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::locate(Some(missing.as_path()), dir.path(), None).is_err());

        let source = Config::locate(None, dir.path(), None).unwrap();
        assert_eq!(source, ConfigSource::Defaults);
        assert!(source.path().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(PROJECT_CONFIG_FILE);

        let mut config = Config::default();
        config.general.tool_args = vec!["--no-print-directory".to_string()];
        config.save(&path).unwrap();

        assert_eq!(Config::load_custom(&path).unwrap(), config);
    }
}
