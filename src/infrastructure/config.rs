use serde::Deserialize;

const ENV_PREFIX: &str = "PRICE_HISTORY";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpSettings {
    /// Per-attempt deadline. There is no deadline over the whole fallback chain.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProvidersConfig {
    #[serde(default = "default_quote_currency")]
    pub quote_currency: String,
    #[serde(default = "ProviderSettings::coingecko")]
    pub coingecko: ProviderSettings,
    #[serde(default = "ProviderSettings::cryptocompare")]
    pub cryptocompare: ProviderSettings,
    #[serde(default = "ProviderSettings::coinpaprika")]
    pub coinpaprika: ProviderSettings,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            quote_currency: default_quote_currency(),
            coingecko: ProviderSettings::coingecko(),
            cryptocompare: ProviderSettings::cryptocompare(),
            coinpaprika: ProviderSettings::coinpaprika(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl ProviderSettings {
    fn coingecko() -> Self {
        Self::with_base("https://api.coingecko.com/api/v3")
    }

    fn cryptocompare() -> Self {
        Self::with_base("https://min-api.cryptocompare.com")
    }

    fn coinpaprika() -> Self {
        Self::with_base("https://api.coinpaprika.com/v1")
    }

    fn with_base(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: None,
        }
    }

    /// Configured key, ignoring blank values left behind by env templates.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_quote_currency() -> String {
    "usd".to_string()
}

/// Load `config/providers.toml` (optional) overlaid with `PRICE_HISTORY__*` env vars.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/providers").required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    #[test]
    fn test_defaults_without_any_source() {
        let cfg: AppConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.server.bind, "0.0.0.0:8080");
        assert_eq!(cfg.http.request_timeout_secs, 10);
        assert_eq!(cfg.providers.quote_currency, "usd");
        assert_eq!(
            cfg.providers.coingecko.base_url,
            "https://api.coingecko.com/api/v3"
        );
        assert!(cfg.providers.cryptocompare.api_key().is_none());
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
            [http]
            request_timeout_secs = 3

            [providers]
            quote_currency = "eur"

            [providers.cryptocompare]
            base_url = "http://localhost:9000"
            api_key = "secret"

            [providers.coinpaprika]
            base_url = "http://localhost:9001"
            api_key = "   "
        "#;
        let cfg: AppConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.http.request_timeout_secs, 3);
        assert_eq!(cfg.providers.quote_currency, "eur");
        assert_eq!(cfg.providers.cryptocompare.base_url, "http://localhost:9000");
        assert_eq!(cfg.providers.cryptocompare.api_key(), Some("secret"));
        assert_eq!(cfg.providers.coinpaprika.api_key(), None);
        // untouched provider keeps its default
        assert_eq!(
            cfg.providers.coingecko.base_url,
            "https://api.coingecko.com/api/v3"
        );
    }
}
