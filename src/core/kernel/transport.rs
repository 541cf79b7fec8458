use crate::core::errors::ClientError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Minimal HTTP capability the signed-request protocol needs: POST a set
/// of form fields, hand back the raw response body.
///
/// No cookies, no sessions, no retries. Transport-level failures are
/// propagated to the caller unchanged.
#[async_trait]
pub trait FormTransport: Send + Sync {
    async fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<Vec<u8>, ClientError>;
}

/// [`FormTransport`] implementation backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout_seconds: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                ClientError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FormTransport for ReqwestTransport {
    async fn post_form(
        &self,
        url: &str,
        fields: &[(&str, &str)],
    ) -> Result<Vec<u8>, ClientError> {
        let response = self
            .client
            .post(url)
            .form(fields)
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
