//! Shared helpers for the engine integration suites.
#![allow(dead_code)]

use paystream_core::{Address, CiphertextHandle, EncryptionGateway, EngineError, EngineResult};

pub fn addr(n: u64) -> Address {
    Address::parse(&format!("0x{n:040x}")).unwrap()
}

/// Deterministic stand-in for the external FHE gateway: a keyed byte mask
/// over the little-endian encoding. Satisfies `decrypt(encrypt(x)) == x`,
/// which is all the engine assumes.
pub struct FakeGateway {
    key: u8,
}

impl FakeGateway {
    pub fn new(key: u8) -> Self {
        Self { key }
    }
}

impl EncryptionGateway for FakeGateway {
    fn encrypt(&self, amount: u64) -> EngineResult<CiphertextHandle> {
        let bytes = amount.to_le_bytes().iter().map(|b| b ^ self.key).collect();
        Ok(CiphertextHandle::new(bytes))
    }

    fn decrypt(&self, handle: &CiphertextHandle) -> EngineResult<u64> {
        let bytes: Vec<u8> = handle.as_bytes().iter().map(|b| b ^ self.key).collect();
        let bytes: [u8; 8] = bytes
            .try_into()
            .map_err(|_| EngineError::EncryptionGateway("malformed handle".to_string()))?;
        Ok(u64::from_le_bytes(bytes))
    }
}

/// Gateway that always fails, for propagation tests.
pub struct BrokenGateway;

impl EncryptionGateway for BrokenGateway {
    fn encrypt(&self, _amount: u64) -> EngineResult<CiphertextHandle> {
        Err(EngineError::EncryptionGateway("relayer unreachable".to_string()))
    }

    fn decrypt(&self, _handle: &CiphertextHandle) -> EngineResult<u64> {
        Err(EngineError::EncryptionGateway("relayer unreachable".to_string()))
    }
}
