use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the hair classification service
    #[serde(default = "default_classifier_url")]
    pub classifier_url: String,

    /// Connect/read timeout for classifier calls, in seconds
    #[serde(default = "default_classifier_timeout_secs")]
    pub classifier_timeout_secs: u64,

    /// PostgreSQL connection URL for scan history.
    /// When unset, history is kept in memory for the life of the process.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_classifier_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_classifier_timeout_secs() -> u64 {
    30
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_env() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.classifier_url, "http://localhost:8000");
        assert_eq!(config.classifier_timeout_secs, 30);
        assert!(config.database_url.is_none());
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_overrides() {
        let vars = vec![
            ("CLASSIFIER_URL".to_string(), "https://classify.example".to_string()),
            ("CLASSIFIER_TIMEOUT_SECS".to_string(), "5".to_string()),
            ("DATABASE_URL".to_string(), "postgres://db/scans".to_string()),
            ("PORT".to_string(), "8080".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.classifier_url, "https://classify.example");
        assert_eq!(config.classifier_timeout_secs, 5);
        assert_eq!(config.database_url.as_deref(), Some("postgres://db/scans"));
        assert_eq!(config.port, 8080);
    }
}
