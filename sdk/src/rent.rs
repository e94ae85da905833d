//! Configuration of network rent, available to programs as the rent sysvar.

use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, PartialEq, Copy, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Rent {
    /// Rental rate in lamports/byte-year.
    pub lamports_per_byte_year: u64,

    /// Amount of time (in years) a balance must include rent for the account
    /// to be rent exempt.
    pub exemption_threshold: f64,

    /// The percentage of collected rent that is burned.
    pub burn_percent: u8,
}

/// Default rental rate in lamports/byte-year, based on:
/// - 10^9 lamports per SOL
/// - $1 per SOL
/// - $0.01 per megabyte day
/// - $3.65 per megabyte year
pub const DEFAULT_LAMPORTS_PER_BYTE_YEAR: u64 = 1_000_000_000 / 100 * 365 / (1024 * 1024);

/// Default amount of time (in years) the balance has to include rent for the
/// account to be rent exempt.
pub const DEFAULT_EXEMPTION_THRESHOLD: f64 = 2.0;

/// Default percentage of collected rent that is burned.
pub const DEFAULT_BURN_PERCENT: u8 = 50;

/// Account storage overhead for calculation of base rent.
///
/// This is the number of bytes required to store an account with no data. It
/// is added to an account's data length when calculating rent.
pub const ACCOUNT_STORAGE_OVERHEAD: u64 = 128;

impl Default for Rent {
    fn default() -> Self {
        Self {
            lamports_per_byte_year: DEFAULT_LAMPORTS_PER_BYTE_YEAR,
            exemption_threshold: DEFAULT_EXEMPTION_THRESHOLD,
            burn_percent: DEFAULT_BURN_PERCENT,
        }
    }
}

impl Rent {
    /// Minimum balance due for rent-exemption of a given account data size.
    ///
    /// Consensus critical: the arithmetic order (integer widen and multiply,
    /// then float multiply, final cast truncating toward zero) must be
    /// reproduced bit-for-bit by every validator.
    pub fn minimum_balance(&self, data_len: usize) -> u64 {
        let bytes = data_len as u64;
        (((ACCOUNT_STORAGE_OVERHEAD + bytes) * self.lamports_per_byte_year) as f64
            * self.exemption_threshold) as u64
    }

    /// Whether a given balance and data length would be exempt.
    pub fn is_exempt(&self, balance: u64, data_len: usize) -> bool {
        balance >= self.minimum_balance(data_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_balance_defaults() {
        let rent = Rent::default();
        assert_eq!(rent.lamports_per_byte_year, 3_480);
        assert_eq!(rent.minimum_balance(0), 890_880);
        assert_eq!(rent.minimum_balance(10), 960_480);
        assert!(rent.is_exempt(890_880, 0));
        assert!(!rent.is_exempt(890_879, 0));
    }

    #[test]
    fn test_minimum_balance_truncates() {
        let rent = Rent {
            lamports_per_byte_year: 1,
            exemption_threshold: 0.3,
            burn_percent: 0,
        };
        // (128 + 2) * 1 * 0.3 = 39.0, (128 + 3) * 1 * 0.3 = 39.3
        assert_eq!(rent.minimum_balance(2), 39);
        assert_eq!(rent.minimum_balance(3), 39);
    }
}
