use rustcent::{ApiClient, ClientConfig, ClientError, HashAlgorithm, HmacSigner, Signer};
use serde_json::json;

const SECRET: &str = "my_secret_key";

fn client() -> ApiClient {
    ApiClient::new(ClientConfig::new(SECRET.to_string())).unwrap()
}

#[test]
fn api_sign_passthrough_matches_the_signer() {
    let client = client();
    let encoded = br#"{"method":"stats","params":{}}"#;

    let via_client = client.generate_api_sign(encoded).unwrap();
    let direct = HmacSigner::default()
        .sign_api_request(SECRET, encoded)
        .unwrap();

    assert_eq!(via_client, direct);
    assert_eq!(
        via_client,
        "0e447876a57e005d76a420215c2b5402e801c8e642fa18209926ca32e0fec880"
    );
}

#[test]
fn connection_token_defaults_info_to_empty_object() {
    let client = client();

    let implicit = client
        .generate_connection_token("42", "1465632974", None)
        .unwrap();
    let explicit = client
        .generate_connection_token("42", "1465632974", Some(&json!({})))
        .unwrap();

    assert_eq!(implicit, explicit);
    assert_eq!(
        implicit,
        "a02948e0c33a632c297c93b8baafa4b7d33a5a97c596713b74fd2a6baba8390c"
    );
}

#[test]
fn channel_sign_passthrough() {
    let client = client();

    let sign = client
        .generate_channel_sign("57cd5bd6-4f6d-4a54-97b4-6f1a78cc3a45", "room1", None)
        .unwrap();

    assert_eq!(
        sign,
        "2cf991d8842e46c70df371bc59bf734faa5d23593a8125975107e813a6121798"
    );
}

#[test]
fn configured_algorithm_is_introspectable() {
    let config =
        ClientConfig::new(SECRET.to_string()).with_hashing_algorithm(HashAlgorithm::Sha512);
    let client = ApiClient::new(config).unwrap();

    assert_eq!(client.algorithm(), HashAlgorithm::Sha512);
    assert_eq!(client.algorithm().as_str(), "sha512");
}

#[test]
fn token_generation_requires_a_secret() {
    let client = ApiClient::new(ClientConfig::default()).unwrap();

    let err = client
        .generate_connection_token("42", "1465632974", None)
        .unwrap_err();
    assert!(matches!(err, ClientError::ConfigurationError(_)));
}
