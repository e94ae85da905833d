/// Verifies program bytecode before it is marked executable.
///
/// Deployment calls `load` with the program data that follows the state
/// header. An `Err` aborts the deployment and leaves the program account
/// unchanged.
pub trait ProgramLoader {
    fn load(&self, programdata: &[u8]) -> Result<(), Box<dyn std::error::Error>>;
}

/// Accepts any bytecode. Useful for callers which only manage the
/// program lifecycle and defer verification to execution time.
#[derive(Debug, Default)]
pub struct NoopLoader {}

impl ProgramLoader for NoopLoader {
    fn load(&self, _programdata: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}
