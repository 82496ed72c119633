use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Allowed poll periods, in seconds.
pub const REFRESH_CHOICES: [u64; 6] = [1, 3, 5, 10, 30, 60];
/// Allowed non-system RAM limit values, in percent.
pub const LIMIT_CHOICES: [u8; 3] = [75, 85, 90];

pub const DEFAULT_REFRESH_SECS: u64 = 10;
pub const DEFAULT_LIMIT_PERCENT: u8 = 75;

/// The two durable preferences. Anything outside the enumerated sets resolves
/// to the default on both read and write; there is no migration or
/// versioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub refresh_interval_secs: u64,
    pub non_system_limit_percent: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            non_system_limit_percent: DEFAULT_LIMIT_PERCENT,
        }
    }
}

impl Settings {
    fn normalized(self) -> Self {
        Settings {
            refresh_interval_secs: normalize_refresh(self.refresh_interval_secs),
            non_system_limit_percent: normalize_limit(self.non_system_limit_percent),
        }
    }
}

pub fn normalize_refresh(secs: u64) -> u64 {
    if REFRESH_CHOICES.contains(&secs) {
        secs
    } else {
        DEFAULT_REFRESH_SECS
    }
}

pub fn normalize_limit(percent: u8) -> u8 {
    if LIMIT_CHOICES.contains(&percent) {
        percent
    } else {
        DEFAULT_LIMIT_PERCENT
    }
}

pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("rambar").join("settings.toml"))
}

/// Validated, immediately-durable preference store. Write failures are
/// swallowed after a warning; the in-memory value still applies for the
/// session.
pub struct SettingsStore {
    path: Option<PathBuf>,
    settings: Settings,
}

impl SettingsStore {
    pub fn load() -> Self {
        match settings_path() {
            Some(path) => Self::load_from_path(&path),
            None => SettingsStore {
                path: None,
                settings: Settings::default(),
            },
        }
    }

    pub fn load_from_path(path: &Path) -> Self {
        let settings = match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str::<Settings>(&contents)
                .unwrap_or_default()
                .normalized(),
            Err(_) => Settings::default(),
        };
        SettingsStore {
            path: Some(path.to_path_buf()),
            settings,
        }
    }

    pub fn refresh_interval_secs(&self) -> u64 {
        self.settings.refresh_interval_secs
    }

    pub fn non_system_limit_percent(&self) -> u8 {
        self.settings.non_system_limit_percent
    }

    /// Stores the interval, coercing out-of-set values to the default, and
    /// returns what was applied.
    pub fn set_refresh_interval(&mut self, secs: u64) -> u64 {
        self.settings.refresh_interval_secs = normalize_refresh(secs);
        self.persist();
        self.settings.refresh_interval_secs
    }

    pub fn set_non_system_limit(&mut self, percent: u8) -> u8 {
        self.settings.non_system_limit_percent = normalize_limit(percent);
        self.persist();
        self.settings.non_system_limit_percent
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let Ok(contents) = toml::to_string(&self.settings) else {
            return;
        };
        if let Some(parent) = path.parent()
            && let Err(err) = std::fs::create_dir_all(parent)
        {
            tracing::warn!(?path, %err, "could not create settings directory");
            return;
        }
        if let Err(err) = std::fs::write(path, contents) {
            tracing::warn!(?path, %err, "could not persist settings");
        }
    }
}
