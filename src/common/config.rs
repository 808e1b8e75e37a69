use std::path::{Path, PathBuf};

use anyhow::bail;
use serde::{Deserialize, Serialize};

const WORKSPACE_RANGE: std::ops::RangeInclusive<u32> = 1..=9;

pub fn config_file() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_default()
        .join("i3dt")
        .join("config.toml")
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub workspaces: WorkspaceSettings,
    #[serde(default)]
    pub opacity: OpacitySettings,
    #[serde(default)]
    pub bar: BarSettings,
}

/// Which workspaces take part in dynamic tiling.
///
/// `only` wins over `ignore` when both are given.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceSettings {
    #[serde(default)]
    pub ignore: Vec<String>,
    #[serde(default)]
    pub only: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct OpacitySettings {
    #[serde(default = "opaque")]
    pub focused: f64,
    #[serde(default = "opaque")]
    pub inactive: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct BarSettings {
    /// Hide the status bar while a workspace is tabbed or monocle.
    #[serde(default = "no")]
    pub hide_on_tabbed: bool,
    #[serde(default = "default_hide_command")]
    pub hide_command: String,
    #[serde(default = "default_show_command")]
    pub show_command: String,
    /// Windows whose name starts with this are bars and never tiled.
    #[serde(default = "default_bar_prefix")]
    pub name_prefix: String,
}

impl WorkspaceSettings {
    pub fn is_managed(&self, workspace: &str) -> bool {
        if !self.only.is_empty() {
            return self.only.iter().any(|w| w == workspace);
        }
        !self.ignore.iter().any(|w| w == workspace)
    }

    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for (key, names) in [("ignore", &self.ignore), ("only", &self.only)] {
            for name in names {
                let in_range = name.parse::<u32>().is_ok_and(|n| WORKSPACE_RANGE.contains(&n));
                if !in_range {
                    issues.push(format!(
                        "workspaces.{key} contains invalid workspace '{name}' (expected 1-9)"
                    ));
                }
            }
        }
        issues
    }
}

impl Default for OpacitySettings {
    fn default() -> Self {
        Self { focused: opaque(), inactive: opaque() }
    }
}

impl OpacitySettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for (key, value) in [("focused", self.focused), ("inactive", self.inactive)] {
            if !(0.0..=1.0).contains(&value) {
                issues.push(format!("opacity.{key} must be between 0 and 1, got {value}"));
            }
        }
        issues
    }
}

impl Default for BarSettings {
    fn default() -> Self {
        Self {
            hide_on_tabbed: no(),
            hide_command: default_hide_command(),
            show_command: default_show_command(),
            name_prefix: default_bar_prefix(),
        }
    }
}

impl BarSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.hide_on_tabbed {
            if self.hide_command.trim().is_empty() {
                issues.push("bar.hide_command must not be empty".to_string());
            }
            if self.show_command.trim().is_empty() {
                issues.push("bar.show_command must not be empty".to_string());
            }
        }
        issues
    }
}

fn opaque() -> f64 { 1.0 }

fn no() -> bool { false }

fn default_hide_command() -> String { "polybar-msg cmd hide".to_string() }

fn default_show_command() -> String { "polybar-msg cmd show".to_string() }

fn default_bar_prefix() -> String { "polybar".to_string() }

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    /// Validates the entire configuration and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        issues.extend(self.workspaces.validate());
        issues.extend(self.opacity.validate());
        issues.extend(self.bar.validate());
        issues
    }

    fn parse(buf: &str) -> anyhow::Result<Config> {
        match toml::from_str::<Config>(buf) {
            Ok(config) => Ok(config),
            Err(e) => bail!("{e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.opacity.focused, 1.0);
        assert_eq!(config.bar.name_prefix, "polybar");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = Config::parse("[workspaces]\nskip = [\"1\"]\n").unwrap_err();
        assert!(err.to_string().contains("skip"));
    }

    #[test]
    fn test_ignore_list() {
        let settings = WorkspaceSettings {
            ignore: vec!["3".to_string()],
            only: vec![],
        };
        assert!(settings.is_managed("1"));
        assert!(!settings.is_managed("3"));
    }

    #[test]
    fn test_only_overrides_ignore() {
        let settings = WorkspaceSettings {
            ignore: vec!["1".to_string()],
            only: vec!["1".to_string(), "2".to_string()],
        };
        assert!(settings.is_managed("1"));
        assert!(settings.is_managed("2"));
        assert!(!settings.is_managed("5"));
    }

    #[test]
    fn test_workspace_validation() {
        let settings = WorkspaceSettings {
            ignore: vec!["10".to_string(), "web".to_string(), "4".to_string()],
            only: vec![],
        };
        let issues = settings.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| i.contains("'10'")));
        assert!(issues.iter().any(|i| i.contains("'web'")));
    }

    #[test]
    fn test_opacity_validation() {
        let settings = OpacitySettings { focused: 1.5, inactive: -0.1 };
        assert_eq!(settings.validate().len(), 2);
    }

    #[test]
    fn test_bar_commands_required_when_hiding() {
        let settings = BarSettings {
            hide_on_tabbed: true,
            hide_command: String::new(),
            ..BarSettings::default()
        };
        let issues = settings.validate();
        assert!(issues.iter().any(|i| i.contains("hide_command")));
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [workspaces]
            only = ["1", "2"]

            [opacity]
            inactive = 0.8

            [bar]
            hide_on_tabbed = true
            "#
        )
        .unwrap();

        let config = Config::read(file.path()).unwrap();
        assert_eq!(config.workspaces.only, vec!["1", "2"]);
        assert_eq!(config.opacity.inactive, 0.8);
        assert_eq!(config.opacity.focused, 1.0);
        assert!(config.bar.hide_on_tabbed);
        assert_eq!(config.bar.show_command, "polybar-msg cmd show");
    }
}
