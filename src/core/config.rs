use crate::core::kernel::signer::HashAlgorithm;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/";

/// Immutable client configuration.
///
/// A value type: the consuming `with_*` methods return a new configured
/// value, so nothing is ever mutated behind a live client and a config
/// can be shared across tasks freely.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    api_url: String,
    secret: Secret<String>,
    hashing_algorithm: HashAlgorithm,
    channel_prefix: String,
    timeout_seconds: u64,
    user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            secret: Secret::new(String::new()),
            hashing_algorithm: HashAlgorithm::default(),
            channel_prefix: String::new(),
            timeout_seconds: 30,
            user_agent: concat!("rustcent/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

// Never expose the secret in serialization.
impl Serialize for ClientConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ClientConfig", 4)?;
        state.serialize_field("api_url", &self.api_url)?;
        state.serialize_field("secret", "[REDACTED]")?;
        state.serialize_field("hashing_algorithm", self.hashing_algorithm.as_str())?;
        state.serialize_field("channel_prefix", &self.channel_prefix)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for ClientConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ClientConfigHelper {
            #[serde(default = "default_api_url")]
            api_url: String,
            #[serde(default)]
            secret: String,
            #[serde(default)]
            hashing_algorithm: Option<String>,
            #[serde(default)]
            channel_prefix: String,
        }

        fn default_api_url() -> String {
            DEFAULT_API_URL.to_string()
        }

        let helper = ClientConfigHelper::deserialize(deserializer)?;
        let hashing_algorithm = match helper.hashing_algorithm {
            Some(name) => name.parse().map_err(serde::de::Error::custom)?,
            None => HashAlgorithm::default(),
        };

        Ok(Self {
            api_url: helper.api_url,
            secret: Secret::new(helper.secret),
            hashing_algorithm,
            channel_prefix: helper.channel_prefix,
            ..Self::default()
        })
    }
}

impl ClientConfig {
    /// Create a configuration with the server API secret; everything else
    /// keeps its default.
    pub fn new(secret: String) -> Self {
        Self {
            secret: Secret::new(secret),
            ..Self::default()
        }
    }

    /// Read configuration from environment variables.
    ///
    /// Recognized variables:
    /// - `CENTRIFUGO_SECRET` (required)
    /// - `CENTRIFUGO_API_URL` (optional)
    /// - `CENTRIFUGO_HASH_ALGORITHM` (optional, `sha256` or `sha512`)
    /// - `CENTRIFUGO_CHANNEL_PREFIX` (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var("CENTRIFUGO_SECRET")
            .map_err(|_| ConfigError::MissingEnvironmentVariable("CENTRIFUGO_SECRET".to_string()))?;

        let hashing_algorithm = match env::var("CENTRIFUGO_HASH_ALGORITHM") {
            Ok(name) => name.parse()?,
            Err(_) => HashAlgorithm::default(),
        };

        Ok(Self {
            api_url: env::var("CENTRIFUGO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            secret: Secret::new(secret),
            hashing_algorithm,
            channel_prefix: env::var("CENTRIFUGO_CHANNEL_PREFIX").unwrap_or_default(),
            ..Self::default()
        })
    }

    /// Load a `.env` file (if present) before reading the environment.
    ///
    /// **Security warning**: never commit `.env` files to version control.
    #[cfg(feature = "env-file")]
    pub fn from_env_file(env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // Missing file falls through to the process environment.
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env()
    }

    /// Set the API endpoint URL.
    pub fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = api_url;
        self
    }

    /// Set the server API secret.
    pub fn with_secret(mut self, secret: String) -> Self {
        self.secret = Secret::new(secret);
        self
    }

    /// Set the hashing algorithm. Must match the server's configuration.
    pub const fn with_hashing_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.hashing_algorithm = algorithm;
        self
    }

    /// Set the prefix prepended to every channel argument.
    pub fn with_channel_prefix(mut self, channel_prefix: String) -> Self {
        self.channel_prefix = channel_prefix;
        self
    }

    /// Set the HTTP request timeout.
    pub const fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string sent with every request.
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Whether a non-empty secret is configured. Signing operations fail
    /// with a configuration error when this is false.
    pub fn has_secret(&self) -> bool {
        !self.secret.expose_secret().is_empty()
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Get the secret (use carefully - exposes the secret value).
    pub fn secret(&self) -> &str {
        self.secret.expose_secret()
    }

    pub fn hashing_algorithm(&self) -> HashAlgorithm {
        self.hashing_algorithm
    }

    pub fn channel_prefix(&self) -> &str {
        &self.channel_prefix
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unsupported hashing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url(), "http://localhost:8000/api/");
        assert_eq!(config.hashing_algorithm(), HashAlgorithm::Sha256);
        assert_eq!(config.channel_prefix(), "");
        assert!(!config.has_secret());
    }

    #[test]
    fn builder_chain() {
        let config = ClientConfig::new("key".to_string())
            .with_api_url("https://example.com/api/".to_string())
            .with_channel_prefix("ns:".to_string())
            .with_hashing_algorithm(HashAlgorithm::Sha512)
            .with_timeout(5);
        assert!(config.has_secret());
        assert_eq!(config.api_url(), "https://example.com/api/");
        assert_eq!(config.channel_prefix(), "ns:");
        assert_eq!(config.hashing_algorithm(), HashAlgorithm::Sha512);
        assert_eq!(config.timeout_seconds(), 5);
    }

    #[test]
    fn secret_is_redacted_in_serialization() {
        let config = ClientConfig::new("super_secret".to_string());
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("[REDACTED]"));
        assert!(!json.contains("super_secret"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"secret": "key", "hashing_algorithm": "sha512"}"#).unwrap();
        assert_eq!(config.api_url(), "http://localhost:8000/api/");
        assert_eq!(config.hashing_algorithm(), HashAlgorithm::Sha512);
        assert!(config.has_secret());
    }
}
