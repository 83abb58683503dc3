use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    pub dexscreener_base_url: String,
    pub github_base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WardConfig {
    pub api: ApiConfig,
    pub providers: ProviderConfig,
}

impl WardConfig {
    /// Load base config from `config/default.(toml|yaml|json)` relative to
    /// the working directory, then override with `WARD__...` environment
    /// variables.
    pub fn from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("api.bind_addr", "0.0.0.0:8787")?
            .set_default("providers.dexscreener_base_url", "https://api.dexscreener.com")?
            .set_default("providers.github_base_url", "https://api.github.com")?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::with_prefix("WARD").separator("__"))
            .build()?;

        settings.try_deserialize().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load_without_config_file() {
        let config = WardConfig::from_env().expect("default config");
        assert!(!config.api.bind_addr.is_empty());
        assert!(config
            .providers
            .dexscreener_base_url
            .starts_with("https://"));
    }
}
