//! Errors surfaced by instruction processors.

use thiserror::Error;

/// Reasons an instruction might fail.  Every validation failure maps to one
/// specific variant; a failure aborts only the current instruction and the
/// transaction boundary decides whether the whole transaction is discarded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstructionError {
    #[error("generic instruction error")]
    GenericError,

    #[error("invalid program argument")]
    InvalidArgument,

    #[error("invalid instruction data")]
    InvalidInstructionData,

    #[error("invalid account data for instruction")]
    InvalidAccountData,

    #[error("account data too small for instruction")]
    AccountDataTooSmall,

    #[error("insufficient funds for instruction")]
    InsufficientFunds,

    #[error("incorrect program id for instruction")]
    IncorrectProgramId,

    #[error("missing required signature for instruction")]
    MissingRequiredSignature,

    #[error("insufficient account keys for instruction")]
    NotEnoughAccountKeys,

    #[error("Failed to borrow a reference to account data, already borrowed")]
    AccountBorrowFailed,

    #[error("An account required by the instruction is missing")]
    MissingAccount,

    #[error("Program arithmetic overflowed")]
    ArithmeticOverflow,

    #[error("Unsupported sysvar")]
    UnsupportedSysvar,

    #[error("Unsupported program id")]
    UnsupportedProgramId,

    #[error("Account is immutable")]
    Immutable,

    #[error("Incorrect authority provided")]
    IncorrectAuthority,

    #[error("Invalid account owner")]
    InvalidAccountOwner,
}
