use std::{fs, io, path::Path};

use anyhow::Context;
use catalog_client::CatalogEndpoint;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub path: String,
    pub locale: String,
    pub screen_width_px: u32,
    pub density: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let endpoint = CatalogEndpoint::default();
        Self {
            base_url: endpoint.base_url,
            path: endpoint.path,
            locale: endpoint.locale,
            screen_width_px: 1080,
            density: 2.625,
        }
    }
}

impl Settings {
    pub fn endpoint(&self) -> CatalogEndpoint {
        CatalogEndpoint {
            base_url: self.base_url.clone(),
            path: self.path.clone(),
            locale: self.locale.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    base_url: Option<String>,
    path: Option<String>,
    locale: Option<String>,
    screen_width_px: Option<u32>,
    density: Option<f32>,
}

pub fn load_settings(config_file: &Path) -> anyhow::Result<Settings> {
    load_settings_with(config_file, |key| std::env::var(key).ok())
}

/// Defaults, then `config_file` if it exists, then environment overrides.
pub(crate) fn load_settings_with(
    config_file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    match fs::read_to_string(config_file) {
        Ok(raw) => {
            let file_cfg: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("invalid config file '{}'", config_file.display()))?;
            if let Some(v) = file_cfg.base_url {
                settings.base_url = v;
            }
            if let Some(v) = file_cfg.path {
                settings.path = v;
            }
            if let Some(v) = file_cfg.locale {
                settings.locale = v;
            }
            if let Some(v) = file_cfg.screen_width_px {
                settings.screen_width_px = v;
            }
            if let Some(v) = file_cfg.density {
                settings.density = v;
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", config_file.display()))
        }
    }

    if let Some(v) = env("CATALOG_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = env("APP__BASE_URL") {
        settings.base_url = v;
    }

    if let Some(v) = env("CATALOG_PATH") {
        settings.path = v;
    }

    if let Some(v) = env("CATALOG_LOCALE") {
        settings.locale = v;
    }
    if let Some(v) = env("APP__LOCALE") {
        settings.locale = v;
    }

    if let Some(v) = env("APP__DENSITY") {
        if let Ok(parsed) = v.parse::<f32>() {
            settings.density = parsed;
        }
    }

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
