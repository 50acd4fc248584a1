//! # Encryption Gateway Module
//!
//! Capability trait for the external FHE collaborator. The engine stores
//! ciphertext handles and public keys but never interprets them; decryption
//! happens only when a plaintext amount is needed for accrual math.
//! Gateway failures surface as `EngineError::EncryptionGateway` and are
//! never retried here - retry policy belongs to the caller.

use crate::error::EngineResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to an encrypted amount. Stored, compared, and passed
/// back to the gateway; never inspected by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CiphertextHandle(Vec<u8>);

impl CiphertextHandle {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for CiphertextHandle {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for CiphertextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// A participant's registered FHE public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKey(String);

impl PublicKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The external encryption capability consumed by the engine.
///
/// Implementations must be deterministic enough that
/// `decrypt(encrypt(x)) == x`; beyond that the engine makes no assumptions.
/// Test suites substitute an in-process fake implementing this same trait.
pub trait EncryptionGateway: Send + Sync {
    fn encrypt(&self, amount: u64) -> EngineResult<CiphertextHandle>;
    fn decrypt(&self, handle: &CiphertextHandle) -> EngineResult<u64>;
}
