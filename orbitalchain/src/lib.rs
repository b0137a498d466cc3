//! OrbitalChain: a ledger contract storing satellite TLE records.
//!
//! The contract is stateless. Every operation is handed a [`state::ChaincodeStub`],
//! the key-value capability provided by the ledger host, and performs at most one
//! mutation through it.

pub mod config;
pub mod contract;
pub mod error;
pub mod import;
pub mod invoke;
pub mod snapshot;
pub mod state;

pub use contract::SmartContract;
pub use error::ContractError;
pub use invoke::{Chaincode, Function};
pub use state::{ChaincodeStub, KeyValue, MemoryStub, StateError, StateQueryIterator};
