//! Configuration file support for the `modopts` tool.
//!
//! Two locations are read:
//! - Global: `~/.modopts/config.toml` - User-wide defaults
//! - Project: `.modopts/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. These settings tune
//! the tool itself; they never supply option values.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Parser settings
    pub parser: ParserConfig,

    /// Manifest settings
    pub manifest: ManifestConfig,
}

/// Parser-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Program name used in diagnostics (defaults to the binary name)
    pub program_name: Option<String>,

    /// Skip unknown options instead of failing
    pub ignore_errors: bool,

    /// Color choice for diagnostics (auto, always, never)
    pub color: Option<String>,
}

/// Manifest-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    /// Registry manifest used when `--manifest` is not given
    pub path: Option<PathBuf>,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

impl ColorChoice {
    /// Whether stderr output should be colored.
    pub fn for_stderr(self) -> bool {
        match self {
            ColorChoice::Auto => std::io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.parser.program_name.is_some() {
            self.parser.program_name = other.parser.program_name;
        }
        if other.parser.ignore_errors {
            self.parser.ignore_errors = true;
        }
        if other.parser.color.is_some() {
            self.parser.color = other.parser.color;
        }

        if other.manifest.path.is_some() {
            self.manifest.path = other.manifest.path;
        }
    }

    /// Parse the color choice, falling back to auto-detection.
    pub fn color(&self) -> ColorChoice {
        self.parser
            .color
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

/// Get the global config directory (~/.modopts).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".modopts"))
}

/// Get the project config path (.modopts/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".modopts").join("config.toml")
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.modopts/config.toml)
/// 2. Global config (~/.modopts/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.parser.program_name.is_none());
        assert!(!config.parser.ignore_errors);
        assert_eq!(config.color(), ColorChoice::Auto);
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[parser]
program_name = "vlc"
ignore_errors = true
color = "never"

[manifest]
path = "registry.toml"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.parser.program_name.as_deref(), Some("vlc"));
        assert!(config.parser.ignore_errors);
        assert_eq!(config.color(), ColorChoice::Never);
        assert_eq!(config.manifest.path, Some(PathBuf::from("registry.toml")));
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.parser.program_name = Some("global".to_string());
        base.parser.color = Some("always".to_string());

        let mut project = Config::default();
        project.parser.program_name = Some("project".to_string());

        base.merge(project);

        assert_eq!(base.parser.program_name.as_deref(), Some("project"));
        assert_eq!(base.color(), ColorChoice::Always); // Not overridden
    }

    #[test]
    fn test_load_config_layers() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        std::fs::write(&global, "[parser]\nprogram_name = \"global\"\nignore_errors = true\n")
            .unwrap();
        let project = project_config_path(tmp.path());
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();
        std::fs::write(&project, "[parser]\nprogram_name = \"local\"\n").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.parser.program_name.as_deref(), Some("local"));
        assert!(config.parser.ignore_errors);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[parser\n").unwrap();
        assert!(Config::load(&path).is_err());
        assert!(Config::load_or_default(&path).parser.program_name.is_none());
    }

    #[test]
    fn test_color_choice_parse() {
        assert_eq!("ALWAYS".parse::<ColorChoice>(), Ok(ColorChoice::Always));
        assert!("rainbow".parse::<ColorChoice>().is_err());
    }
}
