//! Name-based dispatch of host invocations onto the contract.
//!
//! The host calls into a contract with a function name and a list of string
//! arguments. The response payload is JSON for queries and empty otherwise.

use std::{fmt, str::FromStr};

use tleproto::encode_payload;
use tracing::debug;

use crate::{contract::SmartContract, error::ContractError, state::ChaincodeStub};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Function {
    InitLedger,
    CreateTle,
    QueryTle,
    QueryAllTle,
    QueryAllTleEntries,
}

impl Function {
    pub const ALL: [Function; 5] = [
        Function::InitLedger,
        Function::CreateTle,
        Function::QueryTle,
        Function::QueryAllTle,
        Function::QueryAllTleEntries,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Function::InitLedger => "InitLedger",
            Function::CreateTle => "CreateTLE",
            Function::QueryTle => "QueryTLE",
            Function::QueryAllTle => "QueryAllTLE",
            Function::QueryAllTleEntries => "QueryAllTLEEntries",
        }
    }

    /// Whether the function writes to the world state
    pub fn is_mutating(&self) -> bool {
        matches!(self, Function::InitLedger | Function::CreateTle)
    }

    pub fn arity(&self) -> usize {
        match self {
            Function::CreateTle => 5,
            Function::QueryTle => 1,
            Function::InitLedger | Function::QueryAllTle | Function::QueryAllTleEntries => 0,
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Function {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Function::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| ContractError::UnknownFunction(s.to_owned()))
    }
}

pub trait Chaincode {
    /// Run `function` against `stub`, returning the response payload
    fn invoke<S: ChaincodeStub>(
        &self,
        stub: &mut S,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, ContractError>;
}

impl Chaincode for SmartContract {
    fn invoke<S: ChaincodeStub>(
        &self,
        stub: &mut S,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, ContractError> {
        let f: Function = function.parse()?;
        debug!(function = f.name(), args = args.len(), "Invoke");

        match f {
            Function::InitLedger => {
                let [] = expect_args::<0>(f, args)?;
                self.init_ledger(stub)?;
                Ok(Vec::new())
            }
            Function::CreateTle => {
                let [id, satellite_name, line1, line2, timestamp] = expect_args::<5>(f, args)?;
                self.create_tle(stub, id, satellite_name, line1, line2, timestamp)?;
                Ok(Vec::new())
            }
            Function::QueryTle => {
                let [id] = expect_args::<1>(f, args)?;
                let tle = self.query_tle(stub, id)?;
                encode_payload(&tle, false).map_err(ContractError::Encode)
            }
            Function::QueryAllTle => {
                let [] = expect_args::<0>(f, args)?;
                let tles = self.query_all_tle(stub)?;
                encode_payload(&tles, false).map_err(ContractError::Encode)
            }
            Function::QueryAllTleEntries => {
                let [] = expect_args::<0>(f, args)?;
                let entries = self.query_all_tle_entries(stub)?;
                encode_payload(&entries, false).map_err(ContractError::Encode)
            }
        }
    }
}

fn expect_args<const N: usize>(
    f: Function,
    args: &[String],
) -> Result<&[String; N], ContractError> {
    args.try_into().map_err(|_| ContractError::IncorrectArgCount {
        function: f.name().to_owned(),
        expected: f.arity(),
        actual: args.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStub;
    use tletypes::prelude::*;

    fn args(a: &[&str]) -> Vec<String> {
        a.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn function_names() {
        for f in Function::ALL {
            assert_eq!(f.name().parse::<Function>().unwrap(), f);
        }
        assert!(matches!(
            "queryTLE".parse::<Function>(),
            Err(ContractError::UnknownFunction(n)) if n == "queryTLE"
        ));
    }

    #[test]
    fn only_init_and_create_mutate() {
        let mutating: Vec<Function> = Function::ALL
            .into_iter()
            .filter(Function::is_mutating)
            .collect();
        assert_eq!(mutating, vec![Function::InitLedger, Function::CreateTle]);
    }

    #[test]
    fn create_and_query_payloads() {
        let mut stub = MemoryStub::new();
        let c = SmartContract::new();

        let out = c
            .invoke(&mut stub, "CreateTLE", &args(&["S1", "SAT", "1 a", "2 b", "t"]))
            .unwrap();
        assert!(out.is_empty());

        let out = c.invoke(&mut stub, "QueryTLE", &args(&["S1"])).unwrap();
        let tle: Tle = serde_json::from_slice(&out).unwrap();
        assert_eq!(tle, Tle::new("SAT", "1 a", "2 b", "t"));

        let out = c.invoke(&mut stub, "QueryAllTLEEntries", &[]).unwrap();
        let entries: Vec<TleEntry> = serde_json::from_slice(&out).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "S1");
    }

    #[test]
    fn empty_store_query_all_is_empty_array() {
        let mut stub = MemoryStub::new();
        let out = SmartContract::new()
            .invoke(&mut stub, "QueryAllTLE", &[])
            .unwrap();
        assert_eq!(out, b"[]");
    }

    #[test]
    fn wrong_arg_count() {
        let mut stub = MemoryStub::new();
        let c = SmartContract::new();
        let err = c
            .invoke(&mut stub, "CreateTLE", &args(&["S1", "SAT"]))
            .unwrap_err();
        match err {
            ContractError::IncorrectArgCount {
                function,
                expected,
                actual,
            } => {
                assert_eq!(function, "CreateTLE");
                assert_eq!(expected, 5);
                assert_eq!(actual, 2);
            }
            e => panic!("unexpected error {e:?}"),
        }
        assert!(c.invoke(&mut stub, "InitLedger", &args(&["x"])).is_err());
        assert!(stub.is_empty());
    }

    #[test]
    fn query_missing_key() {
        let mut stub = MemoryStub::new();
        let err = SmartContract::new()
            .invoke(&mut stub, "QueryTLE", &args(&["nope"]))
            .unwrap_err();
        assert_eq!(err.to_string(), "TLE does not exist: nope");
    }
}
