#![deny(rust_2018_idioms)]

mod client;
mod error;
mod request;
mod response;

pub use reqwest::multipart::{Form, Part};

pub use client::{HttpClient, HttpClientBuilder};
pub use error::{Error, Result};
pub use request::RequestBuilder;
pub use response::Response;
