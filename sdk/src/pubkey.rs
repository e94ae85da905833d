//! Persistent account addresses.

use {
    serde_derive::{Deserialize, Serialize},
    std::{
        fmt,
        sync::atomic::{AtomicU64, Ordering},
    },
};

/// Number of bytes in a pubkey
pub const PUBKEY_BYTES: usize = 32;

/// The address of an account
#[derive(
    Clone, Copy, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct Pubkey([u8; PUBKEY_BYTES]);

impl Pubkey {
    pub const fn new_from_array(pubkey_array: [u8; PUBKEY_BYTES]) -> Self {
        Self(pubkey_array)
    }

    /// Unique pubkey for tests and benchmarks.
    pub fn new_unique() -> Self {
        static I: AtomicU64 = AtomicU64::new(1);
        let mut b = [0u8; PUBKEY_BYTES];
        let i = I.fetch_add(1, Ordering::Relaxed);
        // Use big endian representation to ensure that recent unique pubkeys
        // are always greater than less recent unique pubkeys.
        b[0..8].copy_from_slice(&i.to_be_bytes());
        Self::new_from_array(b)
    }

    pub fn to_bytes(self) -> [u8; PUBKEY_BYTES] {
        self.0
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", bs58::encode(self.0).into_string())
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", bs58::encode(self.0).into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_unique() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        assert_ne!(a, b);
        assert!(a < b);
    }

    #[test]
    fn test_display() {
        let key = Pubkey::new_from_array([0u8; PUBKEY_BYTES]);
        assert_eq!(
            key.to_string(),
            "11111111111111111111111111111111"
        );
    }
}
