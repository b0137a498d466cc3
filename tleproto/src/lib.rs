pub use crate::codec::{decode_record, encode_payload, encode_record};
pub use crate::parser::{parse_tle_set, parse_unstructured_tle_set, ParseError, TleSetError};

pub mod codec;
pub mod parser;

/// Date format used when a record timestamp is generated rather than supplied
pub const TIMESTAMP_DATE_FORMAT: &str = "%Y-%m-%d";
