//! Application configuration

use std::path::PathBuf;

use thiserror::Error;

use crate::kernel::dispatch::DialogueConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a valid port number, got '{0}'")]
    InvalidPort(String),
    #[error("DOMAIN must be an http(s) URL, got '{0}'")]
    InvalidBaseUrl(String),
}

/// Configuration loaded from environment
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,
    /// Expected `applicationId`; unset disables the check
    pub extension_id: Option<String>,
    /// Template table document
    pub templates_path: PathBuf,
    /// Static assets (audio files)
    pub public_dir: PathBuf,
    pub dialogue: DialogueConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = DialogueConfig::default();

        let port: u16 = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => 8000,
        };

        let base_audio_url = match get("DOMAIN") {
            Some(raw) => {
                let url = raw.trim().trim_end_matches('/').to_string();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidBaseUrl(raw));
                }
                url
            }
            None => defaults.base_audio_url,
        };

        let terminal_intents = match get("TERMINAL_INTENTS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.terminal_intents,
        };

        Ok(Self {
            port,
            extension_id: get("EXTENSION_ID"),
            templates_path: get("TEMPLATES_PATH")
                .unwrap_or_else(|| "templates/responses.json".to_string())
                .into(),
            public_dir: get("PUBLIC_DIR").unwrap_or_else(|| "public".to_string()).into(),
            dialogue: DialogueConfig {
                lang: get("SPEECH_LANG").unwrap_or(defaults.lang),
                base_audio_url,
                terminal_intents,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.extension_id, None);
        assert_eq!(cfg.templates_path, PathBuf::from("templates/responses.json"));
        assert_eq!(cfg.public_dir, PathBuf::from("public"));
        assert_eq!(cfg.dialogue.lang, "ja");
        assert!(cfg.dialogue.terminal_intents.contains("Clova.CancelIntent"));
    }

    #[test]
    fn reads_overrides() {
        let cfg = Config::from_lookup(lookup(&[
            ("PORT", "9001"),
            ("DOMAIN", "https://dice.example.com/"),
            ("EXTENSION_ID", "com.example.dice"),
            ("TERMINAL_INTENTS", "StopIntent, Clova.CancelIntent,"),
            ("SPEECH_LANG", "en"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 9001);
        assert_eq!(cfg.dialogue.base_audio_url, "https://dice.example.com");
        assert_eq!(cfg.extension_id.as_deref(), Some("com.example.dice"));
        assert_eq!(
            cfg.dialogue.terminal_intents,
            HashSet::from(["StopIntent".to_string(), "Clova.CancelIntent".to_string()])
        );
        assert_eq!(cfg.dialogue.lang, "en");
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err(),
            ConfigError::InvalidPort("eighty".into())
        );
        assert_eq!(
            Config::from_lookup(lookup(&[("DOMAIN", "dice.example.com")])).unwrap_err(),
            ConfigError::InvalidBaseUrl("dice.example.com".into())
        );
    }

    #[test]
    fn blank_values_count_as_unset() {
        let cfg = Config::from_lookup(lookup(&[("EXTENSION_ID", "  "), ("PORT", "")])).unwrap();
        assert_eq!(cfg.extension_id, None);
        assert_eq!(cfg.port, 8000);
    }
}
