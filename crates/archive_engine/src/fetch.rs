use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::decode::{decode_html, DecodedHtml};
use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; BlogDownloader/1.0)";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Request, err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::Request, err.to_string()))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let bytes = response.bytes().await.map_err(map_reqwest_error)?.to_vec();

        let metadata = FetchMetadata {
            url: url.to_string(),
            final_url,
            content_type,
            byte_len: bytes.len() as u64,
        };

        Ok(FetchOutput { bytes, metadata })
    }
}

/// Fetch a page and decode it to text.
pub async fn fetch_page(fetcher: &dyn Fetcher, url: &str) -> Result<DecodedHtml, FetchError> {
    let output = fetcher.fetch(url).await?;
    Ok(decode_html(
        &output.bytes,
        output.metadata.content_type.as_deref(),
    ))
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() || err.is_connect() || err.is_body() || err.is_decode() {
        return FetchError::new(FailureKind::Network, err.to_string());
    }
    FetchError::new(FailureKind::Request, err.to_string())
}
