#![deny(rust_2018_idioms)]

mod attachments;
mod client;
mod envelope;
mod error;
mod ledger;
mod registry;
mod settings;
mod tracks;
mod vessels;
mod voyages;

pub use client::FleetApiClient;
pub use settings::ApiSettings;
