//! Generate credentials for a front-end client without touching the
//! network: a connection token for the handshake and a private-channel
//! subscription sign.

use rustcent::{ApiClient, ClientConfig};
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() -> anyhow::Result<()> {
    let client = ApiClient::new(ClientConfig::new("my_secret_key".to_string()))?;

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)?
        .as_secs()
        .to_string();

    let token =
        client.generate_connection_token("42", &timestamp, Some(&json!({"role": "admin"})))?;
    println!("connection token for user 42: {token}");

    let sign = client.generate_channel_sign("client-uuid", "$private:updates", None)?;
    println!("subscription sign: {sign}");

    Ok(())
}
