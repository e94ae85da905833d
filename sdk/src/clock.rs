//! Information about the network's clock: slots, epochs and wall-clock time.

use serde_derive::{Deserialize, Serialize};

/// The unit of time given to a leader for encoding a block, measured from
/// genesis.
pub type Slot = u64;

/// The unit of time a given leader schedule is honored.
pub type Epoch = u64;

/// An approximate measure of real-world time, expressed as Unix time.
pub type UnixTimestamp = i64;

/// A representation of network time, available to programs as the clock
/// sysvar.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    /// The current slot.
    pub slot: Slot,
    /// The timestamp of the first slot in this epoch.
    pub epoch_start_timestamp: UnixTimestamp,
    /// The current epoch.
    pub epoch: Epoch,
    /// The future epoch for which the leader schedule has most recently been
    /// calculated.
    pub leader_schedule_epoch: Epoch,
    /// The estimated real-world time of the current slot.
    pub unix_timestamp: UnixTimestamp,
}
