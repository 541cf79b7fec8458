use crate::core::errors::ClientError;
use crate::core::types::ApiResult;
use async_trait::async_trait;
use serde_json::Value;

/// The server API operations surface.
///
/// Every operation performs exactly one signed request/response exchange
/// and returns the unwrapped result object. Application-level failures
/// are reported inside [`ApiResult::error`], not as `Err`; check
/// [`ApiResult::is_ok`] on every call.
#[async_trait]
pub trait ServerApi {
    /// Send a message into a channel.
    async fn publish(&self, channel: &str, data: Value) -> Result<ApiResult, ClientError>;

    /// Send a message into a channel on behalf of a connected client,
    /// excluding that client from delivery.
    async fn publish_as(
        &self,
        channel: &str,
        data: Value,
        client: &str,
    ) -> Result<ApiResult, ClientError>;

    /// Unsubscribe a user from a channel.
    async fn unsubscribe(&self, channel: &str, user: &str) -> Result<ApiResult, ClientError>;

    /// Disconnect a user by ID.
    async fn disconnect(&self, user: &str) -> Result<ApiResult, ClientError>;

    /// Get channel presence information (all clients currently
    /// subscribed on the channel).
    async fn presence(&self, channel: &str) -> Result<ApiResult, ClientError>;

    /// Get channel history (last messages sent into the channel).
    async fn history(&self, channel: &str) -> Result<ApiResult, ClientError>;

    /// List active channels (with one or more subscribers).
    async fn channels(&self) -> Result<ApiResult, ClientError>;

    /// Get statistics about running server nodes.
    async fn stats(&self) -> Result<ApiResult, ClientError>;
}
