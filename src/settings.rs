use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::scoring::{ColorModel, FallbackPolicy};

static SETTINGS: OnceLock<Settings> = OnceLock::new();

pub const DEFAULT_SETTINGS_PATH: &str = "settings.default.ron";
pub const OVERRIDE_SETTINGS_PATH: &str = "settings.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub classification: Classification,
    pub activity: Activity,
    pub stats: Stats,
    pub analysis: Analysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub fallback: FallbackPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub color_model: ColorModel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub frequency_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub low_energy_max: f64,
    pub purple_recommendation_min: usize,
    pub low_energy_recommendation_min: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            classification: Classification {
                fallback: FallbackPolicy::Negative,
            },
            activity: Activity {
                color_model: ColorModel::SumBased,
            },
            stats: Stats {
                frequency_limit: 10,
            },
            analysis: Analysis {
                low_energy_max: 2.0,
                purple_recommendation_min: 2,
                low_energy_recommendation_min: 3,
            },
        }
    }
}

impl Settings {
    pub fn load() -> &'static Settings {
        SETTINGS.get_or_init(|| {
            Self::load_from_files(Path::new(DEFAULT_SETTINGS_PATH), Path::new(OVERRIDE_SETTINGS_PATH))
        })
    }

    /// Reads `default_path`, then lets `override_path` replace it wholesale.
    /// Unreadable or malformed files are skipped with a warning.
    pub fn load_from_files(default_path: &Path, override_path: &Path) -> Settings {
        let mut settings = read_settings(default_path).unwrap_or_default();
        if let Some(overrides) = read_settings(override_path) {
            settings = overrides;
        }
        settings
    }
}

fn read_settings(path: &Path) -> Option<Settings> {
    if !path.exists() {
        return None;
    }
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read settings");
            return None;
        }
    };
    match ron::from_str::<Settings>(&content) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed settings");
            None
        }
    }
}

pub fn settings() -> &'static Settings {
    Settings::load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = temp_dir().join(format!("cbt-journal-{}-{name}", std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_files_use_defaults() {
        let settings = Settings::load_from_files(
            Path::new("/nonexistent/settings.default.ron"),
            Path::new("/nonexistent/settings.ron"),
        );
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_override_replaces_default() {
        let default_path = write_temp("default.ron", &ron::to_string(&Settings::default()).unwrap());
        let mut custom = Settings::default();
        custom.activity.color_model = ColorModel::Pairwise;
        custom.classification.fallback = FallbackPolicy::Neutral;
        let override_path = write_temp("override.ron", &ron::to_string(&custom).unwrap());

        let loaded = Settings::load_from_files(&default_path, &override_path);
        assert_eq!(loaded, custom);

        fs::remove_file(default_path).ok();
        fs::remove_file(override_path).ok();
    }

    #[test]
    fn test_malformed_override_ignored() {
        let override_path = write_temp("broken.ron", "(classification: ");
        let loaded = Settings::load_from_files(Path::new("/nonexistent.ron"), &override_path);
        assert_eq!(loaded, Settings::default());
        fs::remove_file(override_path).ok();
    }

    #[test]
    fn test_shipped_defaults_parse() {
        let content = include_str!("../settings.default.ron");
        let parsed: Settings = ron::from_str(content).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
