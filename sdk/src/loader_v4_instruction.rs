//! Instructions of the v4 built-in loader program.

use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub enum LoaderV4Instruction {
    /// Write bytecode at the given offset of a retracted program.
    ///
    /// # Account references
    ///   0. `[writable]` The program account to write to.
    ///   1. `[signer]` The authority of the program.
    Write {
        /// Offset at which to write the given bytes, relative to the start of
        /// the bytecode (not the start of the account data).
        offset: u32,
        /// Serialized program data
        bytes: Vec<u8>,
    },

    /// Changes the size of a retracted program account, or initializes a
    /// fresh one.
    ///
    /// A program account is automatically initialized when its size is first
    /// increased from below the state header size; in this initial truncate
    /// the program account itself needs to sign as well, and the authority is
    /// taken from the second instruction account. Decreasing to size zero
    /// closes the program account and resets it into an uninitialized state.
    /// Superfluous lamports are transferred to the recipient account.
    ///
    /// # Account references
    ///   0. `[writable]` The program account to change the size of.
    ///   1. `[signer]` The authority of the program.
    ///   2. `[writable]` Optional, the recipient account.
    Truncate {
        /// The new size after the operation, in bytes of bytecode.
        new_size: u32,
    },

    /// Verify the bytecode of a retracted program and mark it deployed.
    ///
    /// If a source program is present, its bytecode replaces the target's,
    /// the source account is closed and the lamports the target needs to stay
    /// rent-exempt move from the source to the target.
    ///
    /// # Account references
    ///   0. `[writable]` The program account to deploy.
    ///   1. `[signer]` The authority of the program.
    ///   2. `[writable]` Optional, an undeployed source program account to
    ///      take data and lamports from.
    Deploy,

    /// Undo the deployment of a program account, making it writable again.
    ///
    /// # Account references
    ///   0. `[writable]` The program account to retract.
    ///   1. `[signer]` The authority of the program.
    Retract,

    /// Transfers the authority over a program account, or, when no new
    /// authority is given, finalizes a deployed program irreversibly.
    ///
    /// # Account references
    ///   0. `[writable]` The program account to change the authority of.
    ///   1. `[signer]` The current authority of the program.
    ///   2. `[signer]` Optional, the new authority of the program.
    TransferAuthority,
}
