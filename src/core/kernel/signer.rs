use crate::core::config::ConfigError;
use crate::core::errors::ClientError;
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::{Sha256, Sha512};
use std::borrow::Cow;
use std::str::FromStr;

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// Keyed-hash algorithm used for request signing and token generation.
///
/// Must match the algorithm the Centrifugo server is configured with,
/// otherwise every signature check on the server side fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            other => Err(ConfigError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Signing capability for the Centrifugo authentication scheme.
///
/// Three signature kinds share the same keyed-hash construction: API
/// request signing, connection-token generation and private-channel
/// subscription signing. All of them are pure functions of
/// (secret, algorithm, inputs), with no clock and no randomness, so the
/// server can recompute them byte for byte.
pub trait Signer: Send + Sync {
    /// Sign the serialized request envelope. Returns the lowercase hex
    /// digest the server expects in the `sign` form field.
    fn sign_api_request(&self, secret: &str, encoded_data: &[u8]) -> Result<String, ClientError>;

    /// Generate a connection token for a front-end client handshake.
    ///
    /// The digest is computed incrementally over `user`, `timestamp` and
    /// the info document, in that order. `info` is JSON-serialized when
    /// present and non-empty, otherwise the literal two bytes `{}` are
    /// hashed in its place.
    fn generate_connection_token(
        &self,
        secret: &str,
        user: &str,
        timestamp: &str,
        info: Option<&Value>,
    ) -> Result<String, ClientError>;

    /// Sign a private-channel subscription request for a connected client.
    /// Same construction as connection tokens, over `client`, `channel`
    /// and the info document.
    fn generate_channel_sign(
        &self,
        secret: &str,
        client: &str,
        channel: &str,
        info: Option<&Value>,
    ) -> Result<String, ClientError>;

    /// The configured hash algorithm.
    fn algorithm(&self) -> HashAlgorithm;
}

/// HMAC implementation of [`Signer`] with selectable SHA-256/SHA-512.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSigner {
    algorithm: HashAlgorithm,
}

impl HmacSigner {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    fn digest(&self, secret: &str, parts: &[&[u8]]) -> Result<String, ClientError> {
        if secret.is_empty() {
            return Err(ClientError::ConfigurationError(
                "signing secret is not set".to_string(),
            ));
        }

        let digest = match self.algorithm {
            HashAlgorithm::Sha256 => {
                let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| {
                    ClientError::ConfigurationError("invalid secret key".to_string())
                })?;
                for part in parts {
                    mac.update(part);
                }
                hex::encode(mac.finalize().into_bytes())
            }
            HashAlgorithm::Sha512 => {
                let mut mac = HmacSha512::new_from_slice(secret.as_bytes()).map_err(|_| {
                    ClientError::ConfigurationError("invalid secret key".to_string())
                })?;
                for part in parts {
                    mac.update(part);
                }
                hex::encode(mac.finalize().into_bytes())
            }
        };

        Ok(digest)
    }
}

impl Signer for HmacSigner {
    fn sign_api_request(&self, secret: &str, encoded_data: &[u8]) -> Result<String, ClientError> {
        self.digest(secret, &[encoded_data])
    }

    fn generate_connection_token(
        &self,
        secret: &str,
        user: &str,
        timestamp: &str,
        info: Option<&Value>,
    ) -> Result<String, ClientError> {
        if user.is_empty() {
            return Err(ClientError::ConfigurationError(
                "user id must not be empty".to_string(),
            ));
        }
        let info = encoded_info(info)?;
        self.digest(
            secret,
            &[user.as_bytes(), timestamp.as_bytes(), info.as_bytes()],
        )
    }

    fn generate_channel_sign(
        &self,
        secret: &str,
        client: &str,
        channel: &str,
        info: Option<&Value>,
    ) -> Result<String, ClientError> {
        if client.is_empty() {
            return Err(ClientError::ConfigurationError(
                "client id must not be empty".to_string(),
            ));
        }
        let info = encoded_info(info)?;
        self.digest(
            secret,
            &[client.as_bytes(), channel.as_bytes(), info.as_bytes()],
        )
    }

    fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

/// An absent or empty info document hashes as the literal `{}`, so a
/// caller passing nothing and a caller passing an explicit empty object
/// produce identical tokens.
fn encoded_info(info: Option<&Value>) -> Result<Cow<'static, str>, ClientError> {
    match info {
        None => Ok(Cow::Borrowed("{}")),
        Some(value) if info_is_empty(value) => Ok(Cow::Borrowed("{}")),
        Some(value) => Ok(Cow::Owned(serde_json::to_string(value)?)),
    }
}

fn info_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
