use crate::chat::DEFAULT_REPLY_DELAY;
use std::{env, time::Duration};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub reply_delay: Duration,
    pub sample_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            reply_delay: DEFAULT_REPLY_DELAY,
            sample_data: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unparsable values keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = parse_or("PORT", lookup("PORT"), defaults.port);
        let reply_delay = parse_or(
            "MENTOR_REPLY_DELAY_MS",
            lookup("MENTOR_REPLY_DELAY_MS"),
            defaults.reply_delay.as_millis() as u64,
        );
        let sample_data = match lookup("DASHBOARD_SAMPLE_DATA") {
            Some(value) => !matches!(value.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"),
            None => defaults.sample_data,
        };

        Self {
            port,
            reply_delay: Duration::from_millis(reply_delay),
            sample_data,
        }
    }
}

fn parse_or<T: std::str::FromStr + Copy>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {key}={raw}");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(Config::from_lookup(|_| None), Config::default());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "3000"),
            ("MENTOR_REPLY_DELAY_MS", " 250 "),
            ("DASHBOARD_SAMPLE_DATA", "off"),
        ]));
        assert_eq!(config.port, 3000);
        assert_eq!(config.reply_delay, Duration::from_millis(250));
        assert!(!config.sample_data);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "eighty"),
            ("MENTOR_REPLY_DELAY_MS", "-1"),
            ("DASHBOARD_SAMPLE_DATA", "yes"),
        ]));
        assert_eq!(config, Config::default());
    }
}
