use rustcent::{ApiClient, ClientConfig, ServerApi};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Replace with your actual server API secret.
    let config = ClientConfig::new("my_secret_key".to_string())
        .with_api_url("http://localhost:8000/api/".to_string());
    let client = ApiClient::new(config)?;

    let result = client.publish("updates", json!({"input": "hello"})).await?;
    if result.is_ok() {
        println!("published");
    } else {
        println!("publish rejected: {:?}", result.error());
    }

    let stats = client.stats().await?;
    println!("stats: {:?}", stats.body);

    Ok(())
}
