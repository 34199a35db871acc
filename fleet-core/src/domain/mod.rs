mod attachment;
mod group_tags;
mod ledger;
mod serde_helpers;
mod statistics;
mod track;
mod vessel;
mod voyage;

pub use attachment::*;
pub use group_tags::*;
pub use ledger::*;
pub use serde_helpers::{format_timestamp, parse_timestamp};
pub use statistics::*;
pub use track::*;
pub use vessel::*;
pub use voyage::*;

/// Value of an optional text filter. Blank input and the `all` option of the facet dropdowns both
/// mean "no constraint".
pub(crate) fn filter_value(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ALL_OPTION)
}

pub const ALL_OPTION: &str = "all";
