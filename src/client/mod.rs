use crate::core::config::ClientConfig;
use crate::core::errors::ClientError;
use crate::core::kernel::signer::{HashAlgorithm, HmacSigner, Signer};
use crate::core::kernel::transport::{FormTransport, ReqwestTransport};
use crate::core::traits::ServerApi;
use crate::core::types::{ApiCommand, ApiResult};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, trace};

/// Client for the Centrifugo HTTP API.
///
/// Each operation serializes a command envelope, signs the encoded bytes
/// with the configured secret and POSTs `sign`/`data` form fields to the
/// API endpoint in a single exchange. The client holds only immutable
/// configuration and is safe to share across tasks.
///
/// # Example
///
/// ```rust,no_run
/// use rustcent::{ApiClient, ClientConfig, ServerApi};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), rustcent::ClientError> {
/// let config = ClientConfig::new("my_secret_key".to_string())
///     .with_api_url("http://localhost:8000/api/".to_string());
/// let client = ApiClient::new(config)?;
///
/// let result = client.publish("updates", json!({"input": "hello"})).await?;
/// if !result.is_ok() {
///     eprintln!("publish rejected: {:?}", result.error());
/// }
/// # Ok(())
/// # }
/// ```
pub struct ApiClient<T: FormTransport = ReqwestTransport> {
    config: ClientConfig,
    signer: HmacSigner,
    transport: T,
}

impl ApiClient<ReqwestTransport> {
    /// Create a client with the default reqwest-backed transport.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(config.timeout_seconds(), config.user_agent())?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: FormTransport> ApiClient<T> {
    /// Create a client on top of a custom transport implementation.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let signer = HmacSigner::new(config.hashing_algorithm());
        Self {
            config,
            signer,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.signer.algorithm()
    }

    /// Send one signed command and unwrap the result object.
    ///
    /// The server answers a batch of commands with a parallel array of
    /// results; this client always sends a single command, so the body
    /// must decode to an array with at least one element. Anything else
    /// is a protocol violation and fails the call.
    #[instrument(skip(self, command), fields(method = command.method(), url = %self.config.api_url()))]
    pub async fn request(&self, command: &ApiCommand) -> Result<ApiResult, ClientError> {
        let secret = self.secret()?;
        let data = serde_json::to_string(command)?;
        let sign = self.signer.sign_api_request(secret, data.as_bytes())?;

        let body = self
            .transport
            .post_form(self.config.api_url(), &[("sign", &sign), ("data", &data)])
            .await?;

        trace!(body_len = body.len(), "received response body");
        Self::unwrap_response(&body)
    }

    /// Generate a connection token for a front-end client, using the
    /// configured secret and algorithm. No network call.
    pub fn generate_connection_token(
        &self,
        user: &str,
        timestamp: &str,
        info: Option<&Value>,
    ) -> Result<String, ClientError> {
        self.signer
            .generate_connection_token(self.secret()?, user, timestamp, info)
    }

    /// Sign a private-channel subscription for a connected client. The
    /// channel is passed through verbatim: subscription requests carry
    /// the channel name the client asked for, prefix included.
    pub fn generate_channel_sign(
        &self,
        client: &str,
        channel: &str,
        info: Option<&Value>,
    ) -> Result<String, ClientError> {
        self.signer
            .generate_channel_sign(self.secret()?, client, channel, info)
    }

    /// Sign pre-encoded request data with the configured secret.
    pub fn generate_api_sign(&self, encoded_data: &[u8]) -> Result<String, ClientError> {
        self.signer.sign_api_request(self.secret()?, encoded_data)
    }

    fn secret(&self) -> Result<&str, ClientError> {
        if self.config.has_secret() {
            Ok(self.config.secret())
        } else {
            Err(ClientError::ConfigurationError(
                "secret is not configured".to_string(),
            ))
        }
    }

    // Applied exactly once per call, in the operation method itself.
    fn prefixed_channel(&self, channel: &str) -> String {
        format!("{}{}", self.config.channel_prefix(), channel)
    }

    fn unwrap_response(body: &[u8]) -> Result<ApiResult, ClientError> {
        let decoded: Value = serde_json::from_slice(body)?;
        let mut results = match decoded {
            Value::Array(items) if !items.is_empty() => items,
            other => {
                debug!(response = %other, "response is not a non-empty array");
                return Err(ClientError::BadResponse("Invalid response format".to_string()));
            }
        };

        let first = results.swap_remove(0);
        Ok(serde_json::from_value(first)?)
    }
}

#[async_trait]
impl<T: FormTransport> ServerApi for ApiClient<T> {
    async fn publish(&self, channel: &str, data: Value) -> Result<ApiResult, ClientError> {
        let command = ApiCommand::Publish {
            channel: self.prefixed_channel(channel),
            data,
            client: None,
        };
        self.request(&command).await
    }

    async fn publish_as(
        &self,
        channel: &str,
        data: Value,
        client: &str,
    ) -> Result<ApiResult, ClientError> {
        let command = ApiCommand::Publish {
            channel: self.prefixed_channel(channel),
            data,
            client: Some(client.to_string()),
        };
        self.request(&command).await
    }

    async fn unsubscribe(&self, channel: &str, user: &str) -> Result<ApiResult, ClientError> {
        let command = ApiCommand::Unsubscribe {
            channel: self.prefixed_channel(channel),
            user: user.to_string(),
        };
        self.request(&command).await
    }

    async fn disconnect(&self, user: &str) -> Result<ApiResult, ClientError> {
        let command = ApiCommand::Disconnect {
            user: user.to_string(),
        };
        self.request(&command).await
    }

    async fn presence(&self, channel: &str) -> Result<ApiResult, ClientError> {
        let command = ApiCommand::Presence {
            channel: self.prefixed_channel(channel),
        };
        self.request(&command).await
    }

    async fn history(&self, channel: &str) -> Result<ApiResult, ClientError> {
        let command = ApiCommand::History {
            channel: self.prefixed_channel(channel),
        };
        self.request(&command).await
    }

    async fn channels(&self) -> Result<ApiResult, ClientError> {
        self.request(&ApiCommand::Channels {}).await
    }

    async fn stats(&self) -> Result<ApiResult, ClientError> {
        self.request(&ApiCommand::Stats {}).await
    }
}
