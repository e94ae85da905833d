//! Data types shared between the loader-v4 runtime and the programs it
//! manages: account storage, the loader's program account state, the wire
//! instruction, and the rent and clock sysvar values.

pub mod account;
pub mod clock;
pub mod instruction;
pub mod loader_v4;
pub mod loader_v4_instruction;
pub mod program_utils;
pub mod pubkey;
pub mod rent;
pub mod transaction_context;
