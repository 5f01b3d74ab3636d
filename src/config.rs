use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the remote recommendation/catalog API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of catalog games returned per page when the client does not ask for a limit
    #[serde(default = "default_catalog_page_size")]
    pub catalog_page_size: usize,
}

fn default_api_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_catalog_page_size() -> usize {
    12
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.catalog_page_size == 0 {
            anyhow::bail!("CATALOG_PAGE_SIZE must be greater than zero");
        }

        Ok(config)
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.catalog_page_size, 12);
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = Config::from_vars(vars(&[
            ("API_BASE_URL", "http://recs.internal:8080"),
            ("PORT", "8081"),
            ("CATALOG_PAGE_SIZE", "24"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "http://recs.internal:8080");
        assert_eq!(config.port, 8081);
        assert_eq!(config.catalog_page_size, 24);
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let result = Config::from_vars(vars(&[("CATALOG_PAGE_SIZE", "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_invalid_port() {
        let result = Config::from_vars(vars(&[("PORT", "not-a-port")]));
        assert!(result.is_err());
    }
}
