use crate::error::{QaError, QaResult};
use bytes::Bytes;
use std::time::Duration;

/// Raw upstream body plus the content-type it was served with.
#[derive(Debug, Clone)]
pub struct FetchedBody {
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Pulls the raw message list from the upstream message source.
#[derive(Debug, Clone)]
pub struct MessageFetcher {
    client: reqwest::Client,
    url: String,
}

impl MessageFetcher {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> QaResult<FetchedBody> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(QaError::transport)?;
        let resp = resp.error_for_status().map_err(QaError::transport)?;
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.bytes().await.map_err(QaError::transport)?;
        log::debug!("Fetched {} bytes from {}", body.len(), self.url);
        Ok(FetchedBody { content_type, body })
    }
}
