use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "presenter.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub deck_path: Option<PathBuf>,
    pub initial_link: Option<String>,
    pub reduced_motion: bool,
    pub export_dir: PathBuf,
    pub log_filter: String,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            deck_path: None,
            initial_link: None,
            reduced_motion: false,
            export_dir: PathBuf::from("."),
            log_filter: "info".into(),
            window_width: 1280.0,
            window_height: 800.0,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    deck_path: Option<PathBuf>,
    initial_link: Option<String>,
    reduced_motion: Option<bool>,
    export_dir: Option<PathBuf>,
    log_filter: Option<String>,
    window_width: Option<f32>,
    window_height: Option<f32>,
}

/// Command-line values that take precedence over file and environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub deck_path: Option<PathBuf>,
    pub initial_link: Option<String>,
    pub reduced_motion: bool,
}

/// Settings plus the problems met while loading them. Loading happens
/// before logging is initialised, so warnings are handed back to be
/// logged by the caller.
#[derive(Debug, Default)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub warnings: Vec<String>,
}

pub fn load_settings(config_path: Option<&Path>) -> LoadedSettings {
    load_settings_with(config_path, |name| std::env::var(name).ok())
}

pub fn load_settings_with(
    config_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> LoadedSettings {
    let mut loaded = LoadedSettings::default();

    let explicit = config_path.is_some();
    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    match read_file_settings(path) {
        Ok(Some(file_cfg)) => loaded.settings.apply_file(file_cfg),
        Ok(None) if explicit => loaded
            .warnings
            .push(format!("config file '{}' not found; using defaults", path.display())),
        Ok(None) => {}
        Err(err) => loaded
            .warnings
            .push(format!("{err:#}; falling back to defaults")),
    }

    apply_env(&mut loaded, env);
    loaded
}

fn read_file_settings(path: &Path) -> anyhow::Result<Option<FileSettings>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };
    let parsed = toml::from_str::<FileSettings>(&raw)
        .with_context(|| format!("invalid config file '{}'", path.display()))?;
    Ok(Some(parsed))
}

fn apply_env(loaded: &mut LoadedSettings, env: impl Fn(&str) -> Option<String>) {
    let settings = &mut loaded.settings;
    if let Some((_, v)) = read_env(&env, ["PRESENTER_DECK", "APP__DECK_PATH"]) {
        settings.deck_path = Some(PathBuf::from(v));
    }
    if let Some((_, v)) = read_env(&env, ["PRESENTER_LINK", "APP__INITIAL_LINK"]) {
        settings.initial_link = Some(v);
    }
    if let Some((_, v)) = read_env(&env, ["PRESENTER_EXPORT_DIR", "APP__EXPORT_DIR"]) {
        settings.export_dir = PathBuf::from(v);
    }
    if let Some((_, v)) = read_env(&env, ["PRESENTER_LOG", "APP__LOG_FILTER"]) {
        settings.log_filter = v;
    }
    if let Some((name, v)) = read_env(&env, ["PRESENTER_REDUCED_MOTION", "APP__REDUCED_MOTION"]) {
        match parse_flag(&v) {
            Some(flag) => settings.reduced_motion = flag,
            None => loaded
                .warnings
                .push(format!("ignoring {name}='{v}': expected true/false")),
        }
    }
}

/// Last non-empty value among `names`, so `APP__*` aliases win.
fn read_env(
    env: &impl Fn(&str) -> Option<String>,
    names: [&'static str; 2],
) -> Option<(&'static str, String)> {
    names
        .into_iter()
        .filter_map(|name| env(name).map(|value| (name, value)))
        .filter(|(_, value)| !value.trim().is_empty())
        .last()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Settings {
    fn apply_file(&mut self, file_cfg: FileSettings) {
        if let Some(v) = file_cfg.deck_path {
            self.deck_path = Some(v);
        }
        if let Some(v) = file_cfg.initial_link {
            self.initial_link = Some(v);
        }
        if let Some(v) = file_cfg.reduced_motion {
            self.reduced_motion = v;
        }
        if let Some(v) = file_cfg.export_dir {
            self.export_dir = v;
        }
        if let Some(v) = file_cfg.log_filter {
            self.log_filter = v;
        }
        if let Some(v) = file_cfg.window_width.filter(|w| *w >= 640.0) {
            self.window_width = v;
        }
        if let Some(v) = file_cfg.window_height.filter(|h| *h >= 480.0) {
            self.window_height = v;
        }
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(v) = overrides.deck_path {
            self.deck_path = Some(v);
        }
        if let Some(v) = overrides.initial_link {
            self.initial_link = Some(v);
        }
        if overrides.reduced_motion {
            self.reduced_motion = true;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
