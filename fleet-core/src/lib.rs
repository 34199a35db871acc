#![deny(rust_2018_idioms)]

mod domain;
mod error;
mod ports;

#[cfg(feature = "test")]
pub mod test_helper;

pub use domain::*;
pub use error::*;
pub use ports::*;
