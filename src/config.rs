//! User settings and where they are stored

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Colour themes the form can be drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    #[default]
    Plain,
    Winter,
    SnowyNight,
    Vintage,
    Vampire,
    Bubblegum,
    GreenTea,
    Wood,
    Beach,
}

impl ThemeName {
    pub const ALL: [ThemeName; 9] = [
        Self::Plain,
        Self::Winter,
        Self::SnowyNight,
        Self::Vintage,
        Self::Vampire,
        Self::Bubblegum,
        Self::GreenTea,
        Self::Wood,
        Self::Beach,
    ];

    /// Stable identifier used in the settings file
    pub fn key(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Winter => "winter",
            Self::SnowyNight => "snowy-night",
            Self::Vintage => "vintage",
            Self::Vampire => "vampire",
            Self::Bubblegum => "bubblegum",
            Self::GreenTea => "green-tea",
            Self::Wood => "wood",
            Self::Beach => "beach",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Plain => "Plain",
            Self::Winter => "Winter",
            Self::SnowyNight => "Snowy Night",
            Self::Vintage => "Vintage",
            Self::Vampire => "Vampire",
            Self::Bubblegum => "Bubblegum",
            Self::GreenTea => "Green Tea",
            Self::Wood => "Wood",
            Self::Beach => "Beach",
        }
    }

    /// Next theme in display order, wrapping around
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| format!("unknown theme '{s}'"))
    }
}

/// Persisted user settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    /// Theme key; unknown values fall back to the default theme
    pub theme: Option<String>,
}

impl Settings {
    pub fn theme(&self) -> ThemeName {
        self.theme
            .as_deref()
            .and_then(|t| t.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_theme(&mut self, theme: ThemeName) {
        self.theme = Some(theme.key().to_string());
    }
}

/// Source of user settings, loaded at startup and saved on change
#[cfg_attr(test, mockall::automock)]
pub trait SettingsProvider {
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// Settings stored as JSON on disk
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: Option<PathBuf>,
}

impl FileSettings {
    /// Settings in the platform config directory
    pub fn default_location() -> Self {
        Self {
            path: ProjectDirs::from("dev", "survey", "survey-tui")
                .map(|dirs| dirs.config_dir().join("settings.json")),
        }
    }

    /// Settings at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl SettingsProvider for FileSettings {
    fn load(&self) -> Result<Settings> {
        if let Some(path) = &self.path {
            if path.exists() {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("reading settings from {}", path.display()))?;
                let settings: Settings = serde_json::from_str(&content)
                    .with_context(|| format!("parsing settings in {}", path.display()))?;
                return Ok(settings);
            }
        }

        Ok(Settings::default())
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("creating settings directory {}", parent.display())
                })?;
            }
            let content = serde_json::to_string_pretty(settings)?;
            fs::write(path, content)
                .with_context(|| format!("writing settings to {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod theme_name {
        use super::*;

        #[test]
        fn test_default_is_plain() {
            assert_eq!(ThemeName::default(), ThemeName::Plain);
        }

        #[test]
        fn test_next_cycles_through_all() {
            let mut theme = ThemeName::Plain;
            for _ in 0..ThemeName::ALL.len() {
                theme = theme.next();
            }
            assert_eq!(theme, ThemeName::Plain);
            assert_eq!(ThemeName::Wood.next(), ThemeName::Beach);
            assert_eq!(ThemeName::Beach.next(), ThemeName::Plain);
        }

        #[test]
        fn test_parse_round_trips_keys() {
            for theme in ThemeName::ALL {
                assert_eq!(theme.key().parse::<ThemeName>(), Ok(theme));
            }
        }

        #[test]
        fn test_parse_unknown_fails() {
            assert!("neon".parse::<ThemeName>().is_err());
        }

        #[test]
        fn test_labels() {
            assert_eq!(ThemeName::SnowyNight.label(), "Snowy Night");
            assert_eq!(ThemeName::GreenTea.to_string(), "green-tea");
        }
    }

    mod settings {
        use super::*;

        #[test]
        fn test_default_settings() {
            let settings = Settings::default();
            assert!(settings.theme.is_none());
            assert_eq!(settings.theme(), ThemeName::Plain);
        }

        #[test]
        fn test_unknown_theme_falls_back() {
            let settings: Settings = serde_json::from_str(r#"{"theme": "neon"}"#).unwrap();
            assert_eq!(settings.theme(), ThemeName::Plain);
        }

        #[test]
        fn test_set_theme_stores_key() {
            let mut settings = Settings::default();
            settings.set_theme(ThemeName::Vampire);
            assert_eq!(settings.theme.as_deref(), Some("vampire"));
            assert_eq!(settings.theme(), ThemeName::Vampire);
        }

        #[test]
        fn test_deserialize_with_extra_fields() {
            let json = r#"{"theme": "wood", "unknown_field": "value"}"#;
            let parsed: Settings = serde_json::from_str(json).unwrap();
            assert_eq!(parsed.theme(), ThemeName::Wood);
        }

        #[test]
        fn test_deserialize_from_empty_json() {
            let parsed: Settings = serde_json::from_str("{}").unwrap();
            assert!(parsed.theme.is_none());
        }
    }

    mod file_settings {
        use super::*;

        #[test]
        fn test_load_missing_file_returns_default() {
            let dir = tempfile::tempdir().unwrap();
            let provider = FileSettings::at(dir.path().join("settings.json"));
            assert_eq!(provider.load().unwrap(), Settings::default());
        }

        #[test]
        fn test_save_then_load() {
            let dir = tempfile::tempdir().unwrap();
            let provider = FileSettings::at(dir.path().join("nested/settings.json"));

            let mut settings = Settings::default();
            settings.set_theme(ThemeName::Beach);
            provider.save(&settings).unwrap();

            assert_eq!(provider.load().unwrap().theme(), ThemeName::Beach);
        }

        #[test]
        fn test_load_corrupt_file_errors() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("settings.json");
            fs::write(&path, "not json").unwrap();

            let err = FileSettings::at(&path).load().unwrap_err();
            assert!(format!("{err:#}").contains("parsing settings"));
        }

        #[test]
        fn test_save_error_names_directory() {
            let dir = tempfile::tempdir().unwrap();
            let blocker = dir.path().join("blocker");
            fs::write(&blocker, "").unwrap();

            let err = FileSettings::at(blocker.join("settings.json"))
                .save(&Settings::default())
                .unwrap_err();
            let message = format!("{err:#}");
            assert!(message.contains("creating settings directory"), "{message}");
            assert!(message.contains("blocker"), "{message}");
        }

        #[test]
        fn test_without_path_is_noop() {
            let provider = FileSettings { path: None };
            assert!(provider.save(&Settings::default()).is_ok());
            assert_eq!(provider.load().unwrap(), Settings::default());
        }

        #[test]
        fn test_default_location_uses_settings_json() {
            if let Some(path) = FileSettings::default_location().path() {
                assert!(path.ends_with("settings.json"));
            }
        }
    }
}
