use crate::endpoint::ApiEndpoint;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use trendtracker_core::{
    ApiError, ApiErrorBody, ApiMessage, CoreError, FilterState, PlatformConfig,
    PlatformTestRequest, ScrapeOutcome, ScrapeRequest, Trend,
};
use url::Url;

const USER_AGENT: &str = concat!("trendtracker/", env!("CARGO_PKG_VERSION"));

/// Typed client for the TrendTracker backend.
///
/// No request timeout is configured; a hung backend keeps the caller waiting.
#[derive(Debug, Clone)]
pub struct TrendsClient {
    http_client: Client,
    base_url: Url,
}

impl TrendsClient {
    pub fn new(endpoint: ApiEndpoint) -> Result<Self, CoreError> {
        Self::with_base_url(endpoint.base_url())
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, CoreError> {
        let base_url = Url::parse(base_url).map_err(|e| CoreError::InvalidInput {
            message: format!("invalid base URL '{}': {}", base_url, e),
        })?;

        let http_client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `{base}{path}` with `query` attached when non-empty.
    pub fn endpoint_url(&self, path: &str, query: &str) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(path).map_err(|e| ApiError::Network {
            details: format!("invalid endpoint {}: {}", path, e),
        })?;
        if !query.is_empty() {
            url.set_query(Some(query));
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&impl serde::Serialize>,
    ) -> Result<Response, ApiError> {
        let start_time = Instant::now();
        let path = url.path().to_string();

        let mut request_builder: RequestBuilder = self.http_client.request(method.clone(), url);
        if let Some(body) = body {
            request_builder = request_builder.json(body);
        }

        debug!("Sending backend request: {} {}", method, path);
        let response = request_builder.send().await.map_err(|e| {
            error!("Network error for {} {}: {}", method, path, e);
            ApiError::Network {
                details: e.to_string(),
            }
        })?;

        let status = response.status();
        info!(
            "Backend responded {} for {} {} in {:?}",
            status.as_u16(),
            method,
            path,
            start_time.elapsed()
        );

        if status.is_success() {
            return Ok(response);
        }

        // The backend explains most failures in an `{"error": ...}` body.
        let server_message = match response.text().await {
            Ok(text) => serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .map(|body| body.error),
            Err(e) => {
                warn!("Could not read error body for {} {}: {}", method, path, e);
                None
            }
        };

        Err(ApiError::Http {
            status: status.as_u16(),
            server_message,
        })
    }

    async fn read_json<T: DeserializeOwned>(
        response: Response,
        what: &str,
    ) -> Result<T, ApiError> {
        let text = response.text().await.map_err(ApiError::from)?;
        serde_json::from_str(&text).map_err(|e| {
            error!("Failed to parse {}: {}", what, e);
            ApiError::Parse {
                details: format!("Failed to parse {}: {}", what, e),
            }
        })
    }

    /// `GET /api/trends` with the filter serialized into the query string.
    pub async fn fetch_trends(&self, filters: &FilterState) -> Result<Vec<Trend>, ApiError> {
        let url = self.endpoint_url("/api/trends", &filters.to_query_string())?;
        let response = self.send(Method::GET, url, None::<&()>).await?;
        let trends: Vec<Trend> = Self::read_json(response, "trends").await?;

        info!("Retrieved {} trends", trends.len());
        Ok(trends)
    }

    pub async fn fetch_config(&self) -> Result<PlatformConfig, ApiError> {
        let url = self.endpoint_url("/api/config", "")?;
        let response = self.send(Method::GET, url, None::<&()>).await?;
        let config: PlatformConfig = Self::read_json(response, "platform configuration").await?;

        debug!("Retrieved configuration for {} platforms", config.platforms.len());
        Ok(config)
    }

    pub async fn trigger_scrape(
        &self,
        request: &ScrapeRequest,
    ) -> Result<ScrapeOutcome, ApiError> {
        let url = self.endpoint_url("/api/scrape", "")?;
        info!(
            "Requesting scrape of {:?} ({} per platform)",
            request.platforms, request.limit_per_platform
        );
        let response = self.send(Method::POST, url, Some(request)).await?;
        Self::read_json(response, "scrape result").await
    }

    /// Reads the platform configuration and scrapes every enabled platform.
    pub async fn scrape_enabled_platforms(&self) -> Result<ScrapeOutcome, ApiError> {
        let config = self.fetch_config().await?;
        let request = ScrapeRequest::for_platforms(config.enabled_platforms());
        self.trigger_scrape(&request).await
    }

    /// `POST /api/config/test`; a 2xx answer carries a `message`, anything
    /// else comes back as `ApiError::Http` with the server's `error` text.
    pub async fn test_platform(&self, platform: &str) -> Result<ApiMessage, ApiError> {
        let url = self.endpoint_url("/api/config/test", "")?;
        let body = PlatformTestRequest {
            platform: platform.to_string(),
        };
        let response = self.send(Method::POST, url, Some(&body)).await?;
        Self::read_json(response, "connection test result").await
    }

    /// Downloads raw thumbnail bytes from an absolute URL.
    pub async fn fetch_thumbnail(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let url = Url::parse(url).map_err(|e| ApiError::Network {
            details: format!("invalid thumbnail URL '{}': {}", url, e),
        })?;
        let response = self.send(Method::GET, url, None::<&()>).await?;
        let bytes = response.bytes().await.map_err(ApiError::from)?;
        Ok(bytes.to_vec())
    }
}
