use std::time::Duration;

use reqwest::{Client, IntoUrl, multipart::Form};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use snafu::ResultExt;

use crate::{RequestBuilder, Result, error::BuildSnafu};

/// Reads go through `reads`, which retries transient failures. Everything that mutates server
/// state goes through `writes`, which never replays a request.
#[derive(Debug, Clone)]
pub struct HttpClient {
    reads: ClientWithMiddleware,
    writes: ClientWithMiddleware,
}

#[derive(Default, Debug)]
pub struct HttpClientBuilder {
    client: reqwest::ClientBuilder,
    max_retries: u32,
}

impl HttpClient {
    fn new_with(inner: Client, max_retries: u32) -> Self {
        let mut reads = ClientBuilder::new(inner.clone()).with(TracingMiddleware::default());
        if max_retries > 0 {
            reads = reads.with(RetryTransientMiddleware::new_with_policy(
                ExponentialBackoff::builder().build_with_max_retries(max_retries),
            ));
        }

        let writes = ClientBuilder::new(inner)
            .with(TracingMiddleware::default())
            .build();

        Self {
            reads: reads.build(),
            writes,
        }
    }

    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    pub fn get(&self, url: impl IntoUrl) -> RequestBuilder {
        RequestBuilder(self.reads.get(url))
    }

    pub fn post(&self, url: impl IntoUrl) -> RequestBuilder {
        RequestBuilder(self.writes.post(url))
    }

    pub fn put(&self, url: impl IntoUrl) -> RequestBuilder {
        RequestBuilder(self.writes.put(url))
    }

    pub fn delete(&self, url: impl IntoUrl) -> RequestBuilder {
        RequestBuilder(self.writes.delete(url))
    }

    pub fn post_multipart(&self, url: impl IntoUrl, form: Form) -> RequestBuilder {
        RequestBuilder(self.writes.post(url).multipart(form))
    }
}

impl HttpClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.timeout(timeout);
        self
    }

    pub fn gzip(mut self, enable: bool) -> Self {
        self.client = self.client.gzip(enable);
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let inner = self.client.build().context(BuildSnafu)?;
        Ok(HttpClient::new_with(inner, self.max_retries))
    }
}
