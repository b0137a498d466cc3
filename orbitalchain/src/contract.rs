//! The TLE record store.
//!
//! Records are JSON objects stored directly under caller chosen keys. The
//! contract never checks record content. `create_tle` on an existing key
//! replaces the stored record without error, there is no versioning. Bulk
//! queries return records in whatever order the host's range scan yields.

use tleproto::{decode_record, encode_record};
use tletypes::prelude::*;
use tracing::debug;

use crate::{
    error::ContractError,
    state::{ChaincodeStub, ScopedIterator},
};

#[derive(Copy, Clone, Debug, Default)]
pub struct SmartContract;

impl SmartContract {
    pub fn new() -> Self {
        SmartContract
    }

    /// Write the genesis record at [`GENESIS_KEY`]. Repeating this rewrites the same value.
    pub fn init_ledger<S: ChaincodeStub>(&self, stub: &mut S) -> Result<(), ContractError> {
        debug!(key = GENESIS_KEY, "InitLedger");
        self.put_tle(stub, GENESIS_KEY, &genesis_tle())
    }

    pub fn create_tle<S: ChaincodeStub>(
        &self,
        stub: &mut S,
        id: &str,
        satellite_name: &str,
        line1: &str,
        line2: &str,
        timestamp: &str,
    ) -> Result<(), ContractError> {
        debug!(key = id, satellite_name, "CreateTLE");
        let tle = Tle::new(satellite_name, line1, line2, timestamp);
        self.put_tle(stub, id, &tle)
    }

    pub fn query_tle<S: ChaincodeStub>(&self, stub: &S, id: &str) -> Result<Tle, ContractError> {
        debug!(key = id, "QueryTLE");
        let bytes = stub
            .get_state(id)
            .map_err(ContractError::HostRead)?
            .ok_or_else(|| ContractError::NotFound(id.to_owned()))?;
        decode_record(&bytes).map_err(|source| ContractError::Decode {
            key: id.to_owned(),
            source,
        })
    }

    pub fn query_all_tle<S: ChaincodeStub>(&self, stub: &S) -> Result<Vec<Tle>, ContractError> {
        debug!("QueryAllTLE");
        Ok(scan_all(stub)?.into_iter().map(|e| e.record).collect())
    }

    /// Same scan as [`SmartContract::query_all_tle`], keeping each record's key
    pub fn query_all_tle_entries<S: ChaincodeStub>(
        &self,
        stub: &S,
    ) -> Result<Vec<TleEntry>, ContractError> {
        debug!("QueryAllTLEEntries");
        scan_all(stub)
    }

    fn put_tle<S: ChaincodeStub>(
        &self,
        stub: &mut S,
        id: &str,
        tle: &Tle,
    ) -> Result<(), ContractError> {
        let bytes = encode_record(tle).map_err(ContractError::Encode)?;
        stub.put_state(id, bytes).map_err(ContractError::HostWrite)
    }
}

/// Full key space scan. The first undecodable value aborts the scan.
fn scan_all<S: ChaincodeStub>(stub: &S) -> Result<Vec<TleEntry>, ContractError> {
    let mut iter = ScopedIterator::new(
        stub.get_state_by_range("", "").map_err(ContractError::HostRead)?,
    );

    let mut entries = Vec::new();
    for item in iter.by_ref() {
        let kv = item.map_err(ContractError::HostRead)?;
        let record = decode_record(&kv.value).map_err(|source| ContractError::Decode {
            key: kv.key.clone(),
            source,
        })?;
        entries.push(TleEntry {
            key: kv.key,
            record,
        });
    }
    iter.close().map_err(ContractError::HostRead)?;

    Ok(entries)
}
