//! The record written at ledger initialization.

use crate::tle::Tle;

/// Ledger key of the genesis record
pub const GENESIS_KEY: &str = "TLE0";

pub const GENESIS_SATELLITE_NAME: &str = "GENESIS";
pub const GENESIS_LINE1: &str = "Genesis Block OrbitalChain";
pub const GENESIS_LINE2: &str = "Blockchain pour satellites";
pub const GENESIS_TIMESTAMP: &str = "2024-11-28";

pub fn genesis_tle() -> Tle {
    Tle {
        satellite_name: GENESIS_SATELLITE_NAME.to_owned(),
        line1: GENESIS_LINE1.to_owned(),
        line2: GENESIS_LINE2.to_owned(),
        timestamp: GENESIS_TIMESTAMP.to_owned(),
    }
}
