#![deny(rust_2018_idioms)]

pub mod confirm;
pub mod error;
pub mod export;
pub mod facets;
pub mod format;
pub mod forms;
pub mod history;
pub mod ledgers;
pub mod pages;
pub mod selection;
pub mod settings;
pub mod startup;
pub mod status;

pub use confirm::Confirm;
pub use error::{Error, Result};
pub use status::ViewStatus;
