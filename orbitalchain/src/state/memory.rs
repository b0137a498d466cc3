//! In-process world state, used by the CLI host and in tests.

use std::cell::Cell;
use std::collections::btree_map::{self, BTreeMap};
use std::ops::Bound;

use super::{ChaincodeStub, KeyValue, StateError, StateQueryIterator};

/// Failures to inject into the next calls made against a [`MemoryStub`]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Faults {
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub fail_range: bool,
    /// Iteration yields an error after this many items
    pub fail_iteration_after: Option<usize>,
    pub fail_close: bool,
}

/// `BTreeMap` backed world state. Range scans iterate in ascending key order.
#[derive(Debug, Default)]
pub struct MemoryStub {
    state: BTreeMap<String, Vec<u8>>,
    open_iterators: Cell<usize>,
    pub faults: Faults,
}

impl MemoryStub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: BTreeMap<String, Vec<u8>>) -> Self {
        Self {
            state,
            ..Default::default()
        }
    }

    pub fn state(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.state
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Number of range-scan iterators handed out and not yet closed
    pub fn open_iterators(&self) -> usize {
        self.open_iterators.get()
    }

    fn check_key(key: &str) -> Result<(), StateError> {
        if key.is_empty() {
            Err(StateError::InvalidKey(key.to_owned()))
        } else {
            Ok(())
        }
    }
}

impl ChaincodeStub for MemoryStub {
    type Iter<'a> = MemoryIter<'a>;

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        Self::check_key(key)?;
        if self.faults.fail_reads {
            return Err(StateError::Unavailable("injected read failure".to_owned()));
        }
        Ok(self.state.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StateError> {
        Self::check_key(key)?;
        if self.faults.fail_writes {
            return Err(StateError::Unavailable("injected write failure".to_owned()));
        }
        self.state.insert(key.to_owned(), value);
        Ok(())
    }

    fn get_state_by_range<'a>(
        &'a self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Self::Iter<'a>, StateError> {
        if self.faults.fail_range {
            return Err(StateError::Unavailable("injected range failure".to_owned()));
        }

        let start = if start_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start_key)
        };
        let end = if end_key.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end_key)
        };

        // BTreeMap::range panics on an inverted range, the host just returns nothing
        let inverted = !start_key.is_empty() && !end_key.is_empty() && start_key > end_key;
        let range = if inverted {
            None
        } else {
            Some(self.state.range::<str, _>((start, end)))
        };

        self.open_iterators.set(self.open_iterators.get() + 1);
        Ok(MemoryIter {
            range,
            yielded: 0,
            fail_after: self.faults.fail_iteration_after,
            fail_close: self.faults.fail_close,
            closed: false,
            open_iterators: &self.open_iterators,
        })
    }
}

#[derive(Debug)]
pub struct MemoryIter<'a> {
    range: Option<btree_map::Range<'a, String, Vec<u8>>>,
    yielded: usize,
    fail_after: Option<usize>,
    fail_close: bool,
    closed: bool,
    open_iterators: &'a Cell<usize>,
}

impl<'a> Iterator for MemoryIter<'a> {
    type Item = Result<KeyValue, StateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            return None;
        }
        if self.fail_after == Some(self.yielded) {
            return Some(Err(StateError::Iterator(
                "injected iteration failure".to_owned(),
            )));
        }
        let (key, value) = self.range.as_mut()?.next()?;
        self.yielded += 1;
        Some(Ok(KeyValue {
            key: key.clone(),
            value: value.clone(),
        }))
    }
}

impl<'a> StateQueryIterator for MemoryIter<'a> {
    fn close(&mut self) -> Result<(), StateError> {
        if !self.closed {
            self.closed = true;
            self.open_iterators.set(self.open_iterators.get() - 1);
        }
        if self.fail_close {
            Err(StateError::Iterator("injected close failure".to_owned()))
        } else {
            Ok(())
        }
    }
}
