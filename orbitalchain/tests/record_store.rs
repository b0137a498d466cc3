//! Record store behavior against the in-memory host

use orbitalchain_lib::*;
use tletypes::prelude::*;

fn create(c: &SmartContract, stub: &mut MemoryStub, id: &str, name: &str) {
    c.create_tle(stub, id, name, &format!("1 {name}"), &format!("2 {name}"), "2024-11-28")
        .unwrap();
}

#[test]
fn query_missing_key_is_not_found() {
    let c = SmartContract::new();
    let mut stub = MemoryStub::new();
    c.init_ledger(&mut stub).unwrap();

    match c.query_tle(&stub, "TLE42") {
        Err(ContractError::NotFound(id)) => assert_eq!(id, "TLE42"),
        r => panic!("expected NotFound, got {r:?}"),
    }
}

#[test]
fn read_failure_is_distinct_from_not_found() {
    let c = SmartContract::new();
    let mut stub = MemoryStub::new();
    stub.faults.fail_reads = true;
    assert!(matches!(
        c.query_tle(&stub, "TLE0"),
        Err(ContractError::HostRead(StateError::Unavailable(_)))
    ));
}

#[test]
fn write_failure() {
    let c = SmartContract::new();
    let mut stub = MemoryStub::new();
    stub.faults.fail_writes = true;
    assert!(matches!(
        c.init_ledger(&mut stub),
        Err(ContractError::HostWrite(_))
    ));
    assert!(matches!(
        c.create_tle(&mut stub, "A", "A", "1", "2", "t"),
        Err(ContractError::HostWrite(_))
    ));
    assert!(stub.is_empty());
}

#[test]
fn create_overwrites() {
    let c = SmartContract::new();
    let mut stub = MemoryStub::new();
    c.create_tle(&mut stub, "A", "FIRST", "1 x", "2 x", "2024-01-01").unwrap();
    c.create_tle(&mut stub, "A", "SECOND", "1 y", "2 y", "2024-01-02").unwrap();

    assert_eq!(
        c.query_tle(&stub, "A").unwrap(),
        Tle::new("SECOND", "1 y", "2 y", "2024-01-02")
    );
    assert_eq!(c.query_all_tle(&stub).unwrap().len(), 1);
}

#[test]
fn query_all_returns_every_record_once() {
    let c = SmartContract::new();
    let mut stub = MemoryStub::new();
    c.init_ledger(&mut stub).unwrap();
    for k in ["C", "A", "B"] {
        create(&c, &mut stub, k, &format!("SAT-{k}"));
    }

    let all = c.query_all_tle(&stub).unwrap();
    let names: Vec<&str> = all.iter().map(|t| t.satellite_name.as_str()).collect();
    // The in-memory host scans in key order
    assert_eq!(names, vec!["SAT-A", "SAT-B", "SAT-C", "GENESIS"]);
    assert_eq!(all[0], Tle::new("SAT-A", "1 SAT-A", "2 SAT-A", "2024-11-28"));
    assert_eq!(all[3], genesis_tle());

    let entries = c.query_all_tle_entries(&stub).unwrap();
    let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["A", "B", "C", "TLE0"]);
    assert_eq!(stub.open_iterators(), 0);
}

#[test]
fn query_all_empty_store() {
    let c = SmartContract::new();
    let stub = MemoryStub::new();
    assert!(c.query_all_tle(&stub).unwrap().is_empty());
    assert!(c.query_all_tle_entries(&stub).unwrap().is_empty());
    assert_eq!(stub.open_iterators(), 0);
}

#[test]
fn malformed_stored_value_is_reported() {
    let c = SmartContract::new();
    let mut stub = MemoryStub::new();
    create(&c, &mut stub, "A", "GOOD");
    stub.put_state("B", b"{\"satelliteName\": 7}".to_vec()).unwrap();
    create(&c, &mut stub, "C", "ALSO-GOOD");

    match c.query_tle(&stub, "B") {
        Err(ContractError::Decode { key, .. }) => assert_eq!(key, "B"),
        r => panic!("expected Decode, got {r:?}"),
    }
    match c.query_all_tle(&stub) {
        Err(ContractError::Decode { key, .. }) => assert_eq!(key, "B"),
        r => panic!("expected Decode, got {r:?}"),
    }
    assert_eq!(stub.open_iterators(), 0);

    // Other records are still individually readable
    assert_eq!(c.query_tle(&stub, "C").unwrap().satellite_name, "ALSO-GOOD");
}

#[test]
fn invoke_matches_direct_calls() {
    let c = SmartContract::new();
    let mut stub = MemoryStub::new();
    let args = |a: &[&str]| a.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    c.invoke(&mut stub, "InitLedger", &[]).unwrap();
    c.invoke(
        &mut stub,
        "CreateTLE",
        &args(&["TLE1", "GEO1", "1 37481U", "2 37481", "2023-07-09"]),
    )
    .unwrap();

    let payload = c.invoke(&mut stub, "QueryAllTLE", &[]).unwrap();
    let via_invoke: Vec<Tle> = serde_json::from_slice(&payload).unwrap();
    assert_eq!(via_invoke, c.query_all_tle(&stub).unwrap());

    let payload = c.invoke(&mut stub, "QueryTLE", &args(&["TLE0"])).unwrap();
    let genesis: Tle = serde_json::from_slice(&payload).unwrap();
    assert_eq!(genesis.satellite_name, "GENESIS");

    assert!(matches!(
        c.invoke(&mut stub, "DeleteTLE", &args(&["TLE0"])),
        Err(ContractError::UnknownFunction(_))
    ));
}
