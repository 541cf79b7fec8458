/// Transport and signing kernel.
///
/// The kernel holds the two capability abstractions everything else is
/// built on, with no Centrifugo operation semantics of its own:
///
/// - [`Signer`]: keyed-hash signing of API requests, connection tokens
///   and private-channel subscriptions. [`HmacSigner`] implements it
///   with selectable SHA-256/SHA-512.
/// - [`FormTransport`]: one form-encoded POST returning raw body bytes.
///   [`ReqwestTransport`] is the production implementation; tests swap
///   in a mock.
///
/// Both are trait-based so alternate signing backends or transports can
/// be substituted without touching operation call sites.
pub mod signer;
pub mod transport;

pub use signer::{HashAlgorithm, HmacSigner, Signer};
pub use transport::{FormTransport, ReqwestTransport};
