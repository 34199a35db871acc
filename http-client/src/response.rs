use serde::de::DeserializeOwned;
use snafu::ResultExt;

use crate::{Result, error::DecodeSnafu};

#[derive(Debug)]
pub struct Response(pub(crate) reqwest::Response);

impl Response {
    /// Decodes the body as json, a body that does not match `T` yields [`crate::Error::Decode`].
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let url = self.0.url().to_string();
        let bytes = self.0.bytes().await?;
        serde_json::from_slice(&bytes).context(DecodeSnafu { url })
    }
}
