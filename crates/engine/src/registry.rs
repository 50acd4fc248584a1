//! # Key Registry Module
//!
//! FHE public key bookkeeping per participant. Re-registration replaces
//! the previous key; keys are required by the orchestration layer before
//! encrypted amounts can be produced for a participant.

use paystream_core::{Address, PublicKey};
use std::collections::HashMap;
use std::sync::RwLock;

pub struct KeyRegistry {
    keys: RwLock<HashMap<Address, PublicKey>>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self {
            keys: RwLock::new(HashMap::new()),
        }
    }

    /// Register or replace a participant's public key. Returns the key it
    /// replaced, if any.
    pub fn register(&self, participant: Address, key: PublicKey) -> Option<PublicKey> {
        self.keys.write().unwrap().insert(participant, key)
    }

    pub fn is_registered(&self, participant: &Address) -> bool {
        self.keys.read().unwrap().contains_key(participant)
    }

    pub fn public_key_of(&self, participant: &Address) -> Option<PublicKey> {
        self.keys.read().unwrap().get(participant).cloned()
    }

    pub fn registered_count(&self) -> usize {
        self.keys.read().unwrap().len()
    }
}

impl Default for KeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u64) -> Address {
        Address::parse(&format!("0x{n:040x}")).unwrap()
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = KeyRegistry::new();
        assert!(!registry.is_registered(&addr(1)));

        let replaced = registry.register(addr(1), PublicKey::new("0xaaaa"));
        assert!(replaced.is_none());
        assert!(registry.is_registered(&addr(1)));
        assert_eq!(registry.public_key_of(&addr(1)), Some(PublicKey::new("0xaaaa")));
        assert_eq!(registry.registered_count(), 1);
    }

    #[test]
    fn test_reregistration_replaces_key() {
        let registry = KeyRegistry::new();
        registry.register(addr(1), PublicKey::new("0xaaaa"));

        let replaced = registry.register(addr(1), PublicKey::new("0xbbbb"));
        assert_eq!(replaced, Some(PublicKey::new("0xaaaa")));
        assert_eq!(registry.public_key_of(&addr(1)), Some(PublicKey::new("0xbbbb")));
        assert_eq!(registry.registered_count(), 1);
    }
}
