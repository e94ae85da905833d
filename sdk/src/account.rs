//! The runtime's representation of an account: a balance, a byte buffer and
//! the program that owns it.

use crate::pubkey::Pubkey;

/// An account loaded for transaction processing, shared between the runtime
/// and instruction processors via `TransactionContext`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountSharedData {
    /// Lamports in the account
    lamports: u64,
    /// Data held in this account
    data: Vec<u8>,
    /// The program that owns this account
    owner: Pubkey,
}

impl AccountSharedData {
    pub fn new(lamports: u64, space: usize, owner: &Pubkey) -> Self {
        Self {
            lamports,
            data: vec![0u8; space],
            owner: *owner,
        }
    }

    pub fn lamports(&self) -> u64 {
        self.lamports
    }

    pub fn set_lamports(&mut self, lamports: u64) {
        self.lamports = lamports;
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn set_data_from_slice(&mut self, new_data: &[u8]) {
        self.data.clear();
        self.data.extend_from_slice(new_data);
    }

    /// Resizes the data, zero-filling any extension.
    pub fn resize(&mut self, new_len: usize) {
        self.data.resize(new_len, 0);
    }

    pub fn owner(&self) -> &Pubkey {
        &self.owner
    }
}
