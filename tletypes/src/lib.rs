pub mod genesis;
pub mod prelude;
pub mod tle;
