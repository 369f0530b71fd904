//! Runtime configuration read from the environment

pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";
pub const API_URL_VAR: &str = "API_URL";
pub const LOG_FILTER_VAR: &str = "POKEDEX_LOG";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup(API_URL_VAR)
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { api_url }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}
