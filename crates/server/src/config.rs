use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use server_api::{SiteConfig, DEFAULT_WHATSAPP_NUMBER};
use tracing::warn;

pub const SETTINGS_FILE: &str = "site.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub whatsapp_number: String,
    pub seed_mock_data: bool,
    pub login_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.into(),
            seed_mock_data: true,
            login_delay_ms: 800,
        }
    }
}

impl Settings {
    pub fn site_config(&self) -> SiteConfig {
        SiteConfig {
            whatsapp_number: self.whatsapp_number.clone(),
            login_delay: Duration::from_millis(self.login_delay_ms),
            ..SiteConfig::default()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    whatsapp_number: Option<String>,
    seed_mock_data: Option<bool>,
    login_delay_ms: Option<u64>,
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    if Path::new(SETTINGS_FILE).exists() {
        match fs::read_to_string(SETTINGS_FILE) {
            Ok(raw) => apply_file(&mut settings, &raw),
            Err(error) => warn!(%error, file = SETTINGS_FILE, "could not read settings file"),
        }
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

/// Overlays values from a `site.toml` document. A document that does not
/// parse is ignored as a whole.
pub fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<FileSettings>(raw) {
        Ok(cfg) => cfg,
        Err(error) => {
            warn!(%error, "ignoring malformed settings file");
            return;
        }
    };
    if let Some(v) = file_cfg.bind_addr {
        settings.server_bind = v;
    }
    if let Some(v) = file_cfg.whatsapp_number {
        settings.whatsapp_number = v;
    }
    if let Some(v) = file_cfg.seed_mock_data {
        settings.seed_mock_data = v;
    }
    if let Some(v) = file_cfg.login_delay_ms {
        settings.login_delay_ms = v;
    }
}

/// Overlays environment variables. `APP__*` wins over the legacy
/// `SERVER_BIND`; values that do not parse are skipped.
pub fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }
    if let Some(v) = var("APP__WHATSAPP_NUMBER") {
        settings.whatsapp_number = v;
    }
    if let Some(v) = var("APP__SEED_MOCK_DATA") {
        if let Ok(parsed) = v.parse::<bool>() {
            settings.seed_mock_data = parsed;
        }
    }
    if let Some(v) = var("APP__LOGIN_DELAY_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.login_delay_ms = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
