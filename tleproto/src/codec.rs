//! JSON encoding of ledger records and query responses

use serde::Serialize;
use tletypes::prelude::*;

/// Encode a record into the bytes stored at its ledger key
pub fn encode_record(tle: &Tle) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(tle)
}

/// Decode the bytes stored at a ledger key
pub fn decode_record(bytes: &[u8]) -> serde_json::Result<Tle> {
    serde_json::from_slice(bytes)
}

/// Encode a query response payload
pub fn encode_payload<T: Serialize + ?Sized>(
    value: &T,
    pretty: bool,
) -> serde_json::Result<Vec<u8>> {
    if pretty {
        serde_json::to_vec_pretty(value)
    } else {
        serde_json::to_vec(value)
    }
}
