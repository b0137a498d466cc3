use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Unstructured TLE, as read from a TLE set file
/// https://en.wikipedia.org/wiki/Two-line_element_set
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display)]
#[display(fmt = "{}\n{}\n{}", "satellite_name", "line1", "line2")]
pub struct UnstructuredTle {
    pub satellite_name: String,
    pub line1: String,
    pub line2: String,
}

impl UnstructuredTle {
    /// Attach a timestamp, producing the ledger record shape
    pub fn into_tle<T: Into<String>>(self, timestamp: T) -> Tle {
        Tle {
            satellite_name: self.satellite_name,
            line1: self.line1,
            line2: self.line2,
            timestamp: timestamp.into(),
        }
    }
}

/// The ledger record.
///
/// Every field is opaque text. Nothing here checks that `line1`/`line2` are
/// well-formed element lines or that `timestamp` is a date. The ledger key is
/// not part of the record.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Serialize, Deserialize)]
#[display(fmt = "{}\n{}\n{}", "satellite_name", "line1", "line2")]
#[serde(rename_all = "camelCase")]
pub struct Tle {
    pub satellite_name: String,
    pub line1: String,
    pub line2: String,
    pub timestamp: String,
}

impl Tle {
    pub fn new<N, L1, L2, T>(satellite_name: N, line1: L1, line2: L2, timestamp: T) -> Self
    where
        N: Into<String>,
        L1: Into<String>,
        L2: Into<String>,
        T: Into<String>,
    {
        Self {
            satellite_name: satellite_name.into(),
            line1: line1.into(),
            line2: line2.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// A record paired with the key it is stored at
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct TleEntry {
    pub key: String,
    pub record: Tle,
}
