use serde::Serialize;

use crate::{Response, Result, error::FailedRequestSnafu};

#[derive(Debug)]
pub struct RequestBuilder(pub(crate) reqwest_middleware::RequestBuilder);

impl RequestBuilder {
    pub fn json(self, json: &impl Serialize) -> Self {
        Self(self.0.json(json))
    }

    pub fn query(self, query: &impl Serialize) -> Self {
        Self(self.0.query(query))
    }

    /// Non-2xx responses are returned as [`crate::Error::FailedRequest`] with the body read.
    pub async fn send(self) -> Result<Response> {
        let response = self.0.send().await?;

        let status = response.status();
        if !status.is_success() {
            let url = response.url().to_string();
            return FailedRequestSnafu {
                url,
                status,
                body: response.text().await?,
            }
            .fail();
        }

        Ok(Response(response))
    }
}
