//! Search API HTTP client.
//!
//! Provides async methods for the three calls a flight search needs:
//! location lookup, session creation and session polling. Handles
//! authentication, concurrency limiting, and conversion to domain types.

use std::sync::Arc;

use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;

use crate::domain::{FlightQuery, PlaceCandidate, SearchSnapshot, SessionToken};
use crate::search::FlightApi;

use super::convert::{QueryContext, convert_places, convert_search_response, query_to_dto};
use super::error::ApiError;
use super::types::{AutosuggestResponse, SearchResponse};

/// Default base URL for the search API.
const DEFAULT_BASE_URL: &str = "https://skyscanner-api.p.rapidapi.com";

/// Default RapidAPI host header value.
const DEFAULT_API_HOST: &str = "skyscanner-api.p.rapidapi.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Longest body excerpt kept in JSON errors.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the search API client.
#[derive(Debug, Clone)]
pub struct SkyscannerConfig {
    /// API key sent as `X-RapidAPI-Key`
    pub api_key: String,
    /// Host sent as `X-RapidAPI-Host`
    pub api_host: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Market for search queries (e.g., "UK")
    pub market: String,
    /// Locale for search queries (e.g., "en-GB")
    pub locale: String,
    /// Currency for prices (e.g., "USD")
    pub currency: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SkyscannerConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_host: DEFAULT_API_HOST.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            market: "UK".to_string(),
            locale: "en-GB".to_string(),
            currency: "USD".to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the RapidAPI host header.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    /// Set market, locale and currency for queries.
    pub fn with_market(
        mut self,
        market: impl Into<String>,
        locale: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        self.market = market.into();
        self.locale = locale.into();
        self.currency = currency.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Search API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct SkyscannerClient {
    http: reqwest::Client,
    base_url: Url,
    market: String,
    locale: String,
    currency: String,
    semaphore: Arc<Semaphore>,
}

impl SkyscannerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SkyscannerConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| ApiError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("x-rapidapi-key"), api_key);

        let api_host = HeaderValue::from_str(&config.api_host).map_err(|_| ApiError::Api {
            status: 0,
            message: "Invalid API host format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("x-rapidapi-host"), api_host);

        let base_url = Url::parse(&config.base_url).map_err(|e| ApiError::Api {
            status: 0,
            message: format!("Invalid base URL {}: {}", config.base_url, e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Api {
                status: 0,
                message: format!("Base URL cannot have paths: {}", config.base_url),
            });
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            market: config.market,
            locale: config.locale,
            currency: config.currency,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Look up places matching free text.
    ///
    /// Returns candidates best-first. An empty list means nothing matched.
    pub async fn autosuggest(&self, query: &str) -> Result<Vec<PlaceCandidate>, ApiError> {
        let _permit = self.acquire().await?;

        let url = self.endpoint(&["v3", "autosuggest", "flights"]);
        let response = self.http.get(url).query(&[("query", query)]).send().await?;

        let body: AutosuggestResponse = read_json(response).await?;
        Ok(convert_places(&body))
    }

    /// Start a search session for a query.
    ///
    /// The returned snapshot carries the session token, if the API sent one.
    pub async fn create_search(&self, query: &FlightQuery) -> Result<SearchSnapshot, ApiError> {
        let _permit = self.acquire().await?;

        let body = query_to_dto(
            query,
            QueryContext {
                market: &self.market,
                locale: &self.locale,
                currency: &self.currency,
            },
        );

        let url = self.endpoint(&["v3", "flights", "live", "search", "create"]);
        let response = self.http.post(url).json(&body).send().await?;

        let body: SearchResponse = read_json(response).await?;
        Ok(convert_search_response(&body))
    }

    /// Fetch the current state of a search session.
    pub async fn poll_search(&self, token: &SessionToken) -> Result<SearchSnapshot, ApiError> {
        let _permit = self.acquire().await?;

        let url = self.endpoint(&["v3", "flights", "live", "search", "poll", token.as_str()]);
        let response = self.http.get(url).send().await?;

        let body: SearchResponse = read_json(response).await?;
        Ok(convert_search_response(&body))
    }

    async fn acquire(&self) -> Result<tokio::sync::SemaphorePermit<'_>, ApiError> {
        self.semaphore.acquire().await.map_err(|_| ApiError::Api {
            status: 0,
            message: "Semaphore closed".to_string(),
        })
    }

    /// Build an endpoint URL, percent-encoding each path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in new(): the base URL can hold path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Map the response status to an error, or decode the JSON body.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(ApiError::Unauthorized);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ApiError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| ApiError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(BODY_EXCERPT_CHARS).collect()),
    })
}

impl FlightApi for SkyscannerClient {
    async fn lookup_places(&self, query: &str) -> Result<Vec<PlaceCandidate>, ApiError> {
        self.autosuggest(query).await
    }

    async fn create_session(&self, query: &FlightQuery) -> Result<SearchSnapshot, ApiError> {
        self.create_search(query).await
    }

    async fn poll_session(&self, token: &SessionToken) -> Result<SearchSnapshot, ApiError> {
        self.poll_search(token).await
    }
}
