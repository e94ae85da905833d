//! The environment native program instruction processors execute in:
//! transaction accounts, sysvar values, program logs and the seam to the
//! bytecode verifier.

pub mod invoke_context;
pub mod loaded_programs;
pub mod log_collector;
pub mod sysvar_cache;
