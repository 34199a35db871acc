//! Response bodies of the api, every payload is wrapped in one of these.

use serde::Deserialize;

/// `{ "data": [..], "total": n }`. A listing without matches may omit `data`.
#[derive(Debug, Deserialize)]
pub(crate) struct DataList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// `{ "data": .. }`, optionally with a `message` on writes.
#[derive(Debug, Deserialize)]
pub(crate) struct Data<T> {
    pub data: T,
    pub message: Option<String>,
}

/// `{ "message": ".." }`, the body of a delete.
#[derive(Debug, Deserialize)]
pub(crate) struct Message {
    pub message: String,
}
