//! The v4 built-in loader program: its id and the state it embeds at the
//! start of every program account it owns.

use crate::{
    instruction::InstructionError,
    pubkey::{Pubkey, PUBKEY_BYTES},
};

/// Address of the loader program
/// (base58 `LoaderV411111111111111111111111111111111111`).
pub const ID: Pubkey = Pubkey::new_from_array([
    5, 18, 180, 17, 81, 81, 227, 122, 173, 10, 139, 197, 211, 136, 46, 123, 127, 218, 76, 243,
    210, 192, 40, 200, 207, 131, 54, 24, 0, 0, 0, 0,
]);

pub fn id() -> Pubkey {
    ID
}

pub fn check_id(id: &Pubkey) -> bool {
    id == &ID
}

/// Cooldown before a program can be un-/re-deployed again
pub const DEPLOYMENT_COOLDOWN_IN_SLOTS: u64 = 750;

/// Deployment status of a program account.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum LoaderV4Status {
    /// Program is in maintenance
    Retracted = 0,
    /// Program is ready to be executed
    Deployed = 1,
    /// Same as `Deployed`, but can not be retracted anymore
    Finalized = 2,
}

/// LoaderV4 account state, stored at the front of the account data, directly
/// followed by the program's bytecode.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct LoaderV4State {
    /// Address of signer which can send program management instructions.
    pub authority_address: Pubkey,
    /// Slot in which the program was last initialized or deployed.
    pub slot: u64,
    /// Deployment status.
    pub status: LoaderV4Status,
}

impl LoaderV4State {
    /// Offset of the program bytecode in a program account's data; the bytes
    /// before it hold the encoded state.
    /// Layout: authority address (32) | slot (8, little endian) | status (1).
    pub const fn program_data_offset() -> usize {
        PUBKEY_BYTES + 8 + 1
    }

    /// Decodes the state from the front of a program account's data.
    ///
    /// The account must be at least `program_data_offset()` bytes long before
    /// any field is read.
    pub fn unpack(data: &[u8]) -> Result<Self, InstructionError> {
        if data.len() < Self::program_data_offset() {
            return Err(InstructionError::AccountDataTooSmall);
        }
        let mut authority = [0u8; PUBKEY_BYTES];
        authority.copy_from_slice(&data[..PUBKEY_BYTES]);
        let mut slot = [0u8; 8];
        slot.copy_from_slice(&data[PUBKEY_BYTES..PUBKEY_BYTES + 8]);
        let status = match data[PUBKEY_BYTES + 8] {
            0 => LoaderV4Status::Retracted,
            1 => LoaderV4Status::Deployed,
            2 => LoaderV4Status::Finalized,
            _ => return Err(InstructionError::InvalidAccountData),
        };
        Ok(Self {
            authority_address: Pubkey::new_from_array(authority),
            slot: u64::from_le_bytes(slot),
            status,
        })
    }

    /// Encodes the state into the front of a program account's data.
    pub fn pack_into(&self, data: &mut [u8]) -> Result<(), InstructionError> {
        if data.len() < Self::program_data_offset() {
            return Err(InstructionError::AccountDataTooSmall);
        }
        data[..PUBKEY_BYTES].copy_from_slice(self.authority_address.as_ref());
        data[PUBKEY_BYTES..PUBKEY_BYTES + 8].copy_from_slice(&self.slot.to_le_bytes());
        data[PUBKEY_BYTES + 8] = self.status as u8;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let authority_address = Pubkey::new_unique();
        let state = LoaderV4State {
            authority_address,
            slot: 0x0102_0304_0506_0708,
            status: LoaderV4Status::Deployed,
        };
        let mut data = vec![0xffu8; LoaderV4State::program_data_offset() + 3];
        state.pack_into(&mut data).unwrap();
        assert_eq!(&data[..32], authority_address.as_ref());
        assert_eq!(&data[32..40], &[8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(data[40], 1);
        // Bytecode bytes after the header are untouched
        assert_eq!(&data[41..], &[0xff, 0xff, 0xff]);
        assert_eq!(LoaderV4State::unpack(&data).unwrap(), state);
    }

    #[test]
    fn test_unpack_rejects_short_data() {
        let data = vec![0u8; LoaderV4State::program_data_offset() - 1];
        assert_eq!(
            LoaderV4State::unpack(&data),
            Err(InstructionError::AccountDataTooSmall),
        );
    }

    #[test]
    fn test_unpack_rejects_unknown_status() {
        let mut data = vec![0u8; LoaderV4State::program_data_offset()];
        data[40] = 3;
        assert_eq!(
            LoaderV4State::unpack(&data),
            Err(InstructionError::InvalidAccountData),
        );
    }

    #[test]
    fn test_pack_rejects_short_data() {
        let state = LoaderV4State {
            authority_address: Pubkey::new_unique(),
            slot: 0,
            status: LoaderV4Status::Retracted,
        };
        let mut data = vec![0u8; 40];
        assert_eq!(
            state.pack_into(&mut data),
            Err(InstructionError::AccountDataTooSmall),
        );
    }
}
