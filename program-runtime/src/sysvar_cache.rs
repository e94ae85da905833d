use loader_v4_sdk::{clock::Clock, instruction::InstructionError, rent::Rent};

/// Cache of the sysvar values an instruction processor may read during
/// a transaction batch. Populated once per batch by the caller.
#[derive(Default, Clone, Debug)]
pub struct SysvarCache {
    clock: Option<Clock>,
    rent: Option<Rent>,
}

impl SysvarCache {
    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = Some(clock);
    }

    pub fn set_rent(&mut self, rent: Rent) {
        self.rent = Some(rent);
    }

    pub fn get_clock(&self) -> Result<&Clock, InstructionError> {
        self.clock
            .as_ref()
            .ok_or(InstructionError::UnsupportedSysvar)
    }

    pub fn get_rent(&self) -> Result<&Rent, InstructionError> {
        self.rent
            .as_ref()
            .ok_or(InstructionError::UnsupportedSysvar)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
