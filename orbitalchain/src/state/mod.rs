//! The key-value capability a ledger host hands to the contract.

use tracing::warn;

pub mod memory;

pub use memory::MemoryStub;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("State store unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid key '{0}'")]
    InvalidKey(String),
    #[error("State iterator error: {0}")]
    Iterator(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// Host world-state access for a single invocation.
pub trait ChaincodeStub {
    type Iter<'a>: StateQueryIterator
    where
        Self: 'a;

    /// Returns `Ok(None)` when nothing is stored at `key`.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StateError>;

    /// Upsert, an existing value is replaced.
    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StateError>;

    /// Scan `[start_key, end_key)`. An empty key leaves that side of the range
    /// unbounded, so `("", "")` covers the whole key space.
    ///
    /// Iteration order is defined by the host. The returned iterator holds
    /// host-side resources until it is closed.
    fn get_state_by_range<'a>(
        &'a self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Self::Iter<'a>, StateError>;
}

/// A host range-scan cursor. `None` from `next` means exhausted.
pub trait StateQueryIterator: Iterator<Item = Result<KeyValue, StateError>> {
    fn close(&mut self) -> Result<(), StateError>;
}

/// Closes the wrapped cursor when dropped unless [`ScopedIterator::close`] was
/// already called.
#[derive(Debug)]
pub struct ScopedIterator<I: StateQueryIterator> {
    inner: I,
    closed: bool,
}

impl<I: StateQueryIterator> ScopedIterator<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            closed: false,
        }
    }

    pub fn close(mut self) -> Result<(), StateError> {
        self.closed = true;
        self.inner.close()
    }
}

impl<I: StateQueryIterator> Iterator for ScopedIterator<I> {
    type Item = Result<KeyValue, StateError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            None
        } else {
            self.inner.next()
        }
    }
}

impl<I: StateQueryIterator> Drop for ScopedIterator<I> {
    fn drop(&mut self) {
        if !self.closed {
            self.closed = true;
            if let Err(e) = self.inner.close() {
                warn!(error = %e, "Failed to close state iterator");
            }
        }
    }
}
