//! Shared helpers for the Paystream demo scenarios.

use paystream_core::{Address, CiphertextHandle, EncryptionGateway, EngineError, EngineResult};

/// Participant address derived from a small integer, for readable demos.
pub fn participant(n: u64) -> Address {
    Address::parse(&format!("0x{n:040x}")).expect("derived address is well-formed")
}

/// Demo-grade stand-in for the external FHE gateway. Masks the
/// little-endian encoding with a fixed key; real deployments substitute
/// the production SDK behind the same trait.
pub struct DemoGateway {
    key: u8,
}

impl DemoGateway {
    pub fn new() -> Self {
        Self { key: 0xd7 }
    }
}

impl Default for DemoGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl EncryptionGateway for DemoGateway {
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
