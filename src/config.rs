use anyhow::{Context as _, Result};
use std::{path::PathBuf, time::Duration};

const APP_NAME: &str = "Alsa Volume Notifier";
const APP_CACHE_NAME: &str = "avnotify";
const MIXER_PROGRAM: &str = "amixer";
const CACHE_TIMEOUT_MS: u64 = 10_000;
const CALL_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) app_name: String,
    pub(crate) mixer_program: String,
    /// Directory holding this app's cache entries, `<cache-root>/avnotify`.
    pub(crate) cache_dir: PathBuf,
    /// Maximum age of a cached notification id.
    pub(crate) cache_timeout: Duration,
    /// Upper bound for each external call (mixer command, D-Bus notify).
    pub(crate) call_timeout: Duration,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        let cache_root = dirs::cache_dir().context("failed to locate user cache directory")?;

        Self::build(cache_root, |key| std::env::var(key).ok())
    }

    fn build(cache_root: PathBuf, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mixer_program = var("AVNOTIFY_MIXER").unwrap_or_else(|| MIXER_PROGRAM.to_string());
        let cache_timeout_ms = millis(&var, "AVNOTIFY_CACHE_TIMEOUT_MS", CACHE_TIMEOUT_MS)?;
        let call_timeout_ms = millis(&var, "AVNOTIFY_CALL_TIMEOUT_MS", CALL_TIMEOUT_MS)?;

        Ok(Self {
            app_name: APP_NAME.to_string(),
            mixer_program,
            cache_dir: cache_root.join(APP_CACHE_NAME),
            cache_timeout: Duration::from_millis(cache_timeout_ms),
            call_timeout: Duration::from_millis(call_timeout_ms),
        })
    }
}

fn millis(var: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<u64> {
    match var(key) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{key} is not a number of milliseconds: {value:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn build(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::build(PathBuf::from("/tmp/cache"), |key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = build(&[]).unwrap();
        assert_eq!(config.app_name, "Alsa Volume Notifier");
        assert_eq!(config.mixer_program, "amixer");
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/cache/avnotify"));
        assert_eq!(config.cache_timeout, Duration::from_secs(10));
        assert_eq!(config.call_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_env_overrides() {
        let config = build(&[
            ("AVNOTIFY_MIXER", "/usr/local/bin/amixer"),
            ("AVNOTIFY_CACHE_TIMEOUT_MS", "2500"),
            ("AVNOTIFY_CALL_TIMEOUT_MS", " 100 "),
        ])
        .unwrap();
        assert_eq!(config.mixer_program, "/usr/local/bin/amixer");
        assert_eq!(config.cache_timeout, Duration::from_millis(2500));
        assert_eq!(config.call_timeout, Duration::from_millis(100));
    }

    #[test]
    fn test_invalid_timeout_is_fatal() {
        let err = build(&[("AVNOTIFY_CACHE_TIMEOUT_MS", "10s")]).unwrap_err();
        assert!(err.to_string().contains("AVNOTIFY_CACHE_TIMEOUT_MS"));
    }
}
