pub use crate::{public_key_bytes::PublicKeyBytes, signature_bytes::SignatureBytes};

pub type AggregateSignatureBytes = SignatureBytes;

mod public_key_bytes;
mod signature_bytes;
