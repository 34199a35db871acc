use fleet_core::Result;
use http_client::{Form, HttpClient, Part};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    ApiSettings,
    envelope::{Data, DataList, Message},
    error::{IntoCoreError, to_core},
};

/// Typed client of the dashboard REST api, implements every outbound port of `fleet-core`.
#[derive(Debug, Clone)]
pub struct FleetApiClient {
    client: HttpClient,
    base_url: String,
}

impl FleetApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(settings.timeout)
            .gzip(true)
            .max_retries(settings.max_retries)
            .build()
            .map_err(to_core)?;

        Ok(Self::with_client(client, &settings.base_url))
    }

    pub fn with_client(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.client
            .get(self.url(path))
            .send()
            .await
            .into_core()?
            .json()
            .await
            .into_core()
    }

    pub(crate) async fn get_with<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        self.client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .into_core()?
            .json()
            .await
            .into_core()
    }

    pub(crate) async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        Ok(self.get::<DataList<T>>(path).await?.data)
    }

    pub(crate) async fn list_with<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Vec<T>> {
        Ok(self.get_with::<DataList<T>, _>(path, query).await?.data)
    }

    pub(crate) async fn data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        Ok(self.get::<Data<T>>(path).await?.data)
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let response: Data<T> = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .into_core()?
            .json()
            .await
            .into_core()?;

        log_message(path, response.message.as_deref());
        Ok(response.data)
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let response: Data<T> = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .into_core()?
            .json()
            .await
            .into_core()?;

        log_message(path, response.message.as_deref());
        Ok(response.data)
    }

    /// POST without a body, parameters are sent in the query string.
    pub(crate) async fn post_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        self.client
            .post(self.url(path))
            .query(query)
            .send()
            .await
            .into_core()?
            .json()
            .await
            .into_core()
    }

    /// PUT without a body whose response only carries a message.
    pub(crate) async fn put_empty(&self, path: &str) -> Result<()> {
        let response: Message = self
            .client
            .put(self.url(path))
            .send()
            .await
            .into_core()?
            .json()
            .await
            .into_core()?;

        log_message(path, Some(&response.message));
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let response: Message = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .into_core()?
            .json()
            .await
            .into_core()?;

        log_message(path, Some(&response.message));
        Ok(())
    }

    pub(crate) async fn post_multipart<T, Q>(&self, path: &str, query: &Q, form: Form) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        self.client
            .post_multipart(self.url(path), form)
            .query(query)
            .send()
            .await
            .into_core()?
            .json()
            .await
            .into_core()
    }
}

pub(crate) fn file_part(upload: &fleet_core::Upload) -> Result<Part> {
    Part::bytes(upload.bytes.clone())
        .file_name(upload.file_name.clone())
        .mime_str(&upload.mime_type)
        .map_err(fleet_core::Error::network)
}

fn log_message(path: &str, message: Option<&str>) {
    if let Some(message) = message {
        debug!(path, response = message, "api responded");
    }
}
