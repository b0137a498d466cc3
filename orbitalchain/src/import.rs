//! Bulk creation of records from a TLE set file.

use tleproto::{parse_tle_set, TleSetError};
use tracing::info;

use crate::{contract::SmartContract, error::ContractError, state::ChaincodeStub};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ImportOptions {
    /// Keys are `{key_prefix}{n}`
    pub key_prefix: String,
    /// First `n`
    pub start_index: usize,
    /// Timestamp given to every imported record
    pub timestamp: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Parse(#[from] TleSetError),

    #[error("Failed to create TLE '{key}'. {source}")]
    Create {
        key: String,
        #[source]
        source: ContractError,
    },
}

/// Create one record per entry of `tle_set`, in file order.
///
/// The whole file is parsed before anything is written. A failed create stops the
/// import and earlier entries stay written. Returns the keys written.
pub fn import_tle_set<S: ChaincodeStub>(
    contract: &SmartContract,
    stub: &mut S,
    tle_set: &str,
    opts: &ImportOptions,
) -> Result<Vec<String>, ImportError> {
    let entries = parse_tle_set(tle_set)?;

    let mut keys = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        let key = format!("{}{}", opts.key_prefix, opts.start_index + idx);
        contract
            .create_tle(
                stub,
                &key,
                &entry.satellite_name,
                &entry.line1,
                &entry.line2,
                &opts.timestamp,
            )
            .map_err(|source| ImportError::Create {
                key: key.clone(),
                source,
            })?;
        keys.push(key);
    }

    info!(records = keys.len(), prefix = %opts.key_prefix, "Imported TLE set");
    Ok(keys)
}
