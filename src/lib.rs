pub mod client;
pub mod core;

pub use client::ApiClient;
pub use core::config::ClientConfig;
pub use core::errors::ClientError;
pub use core::kernel::{FormTransport, HashAlgorithm, HmacSigner, ReqwestTransport, Signer};
pub use core::traits::ServerApi;
pub use core::types::{ApiCommand, ApiResult};
