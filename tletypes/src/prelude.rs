pub use crate::genesis::{genesis_tle, GENESIS_KEY};
pub use crate::tle::{Tle, TleEntry, UnstructuredTle};
