use std::time::{Duration, Instant};

use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::timeout;

use crate::api::error::ApiError;
use crate::api::points::MapPoints;
use crate::api::types::{
    Coordinates, LoginRequest, AGGREGATE_PATH, EVENTS_PATH, LOGIN_PATH, MAP_POINTS_PATH,
    MAP_POINT_PATH, RESTAURANTS_PATH,
};
use crate::config::ApiConfig;

/// Client for the letsmeet HTTP API.
///
/// Every request goes to the configured origin only, follows redirects,
/// keeps cookies per origin and never sends a `Referer` header. Failures
/// are returned to the caller as-is; nothing is retried.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    connect_timeout: Duration,
    request_timeout: Option<Duration>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let connect_timeout = Duration::from_secs(config.connect_timeout_seconds as u64);
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .redirect(Policy::limited(config.max_redirects))
            .referer(false)
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Network {
                url: config.base_url.clone(),
                source: e,
            })?;

        let request_timeout = match config.request_timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs as u64)),
        };

        Ok(Self {
            client,
            base_url,
            connect_timeout,
            request_timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /api/map/points`, decoded lazily as delimited text.
    pub async fn map_points(&self) -> Result<MapPoints, ApiError> {
        let url = self.endpoint(MAP_POINTS_PATH, &[])?;
        self.get_text(url).await.map(MapPoints::new)
    }

    /// `GET /api/map/points?filter=<f>`; the service keeps roughly that
    /// share of points. Negative filters are rejected without a request.
    pub async fn map_points_filtered(&self, filter: f32) -> Result<MapPoints, ApiError> {
        if !filter.is_finite() || filter < 0.0 {
            return Err(ApiError::InvalidArgument(format!(
                "filter must be a non-negative number, got {}",
                filter
            )));
        }
        let mut url = self.endpoint(MAP_POINTS_PATH, &[])?;
        url.query_pairs_mut()
            .append_pair("filter", &filter.to_string());
        self.get_text(url).await.map(MapPoints::new)
    }

    /// `GET /api/map/point/{id}`; the decoded JSON is passed through unchanged.
    pub async fn retrieve_point(&self, id: &str) -> Result<Value, ApiError> {
        if id.is_empty() {
            return Err(ApiError::InvalidArgument("point id must not be empty".to_string()));
        }
        let url = self.endpoint(MAP_POINT_PATH, &[id])?;
        self.get_json(url).await
    }

    /// `POST /api/login` with a `{username, password}` JSON body.
    pub async fn login(&self, username: &str, password: &str) -> Result<Value, ApiError> {
        let url = self.endpoint(LOGIN_PATH, &[])?;
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let bytes = serde_json::to_vec(&body).map_err(|e| ApiError::Json {
            url: url.to_string(),
            source: e,
        })?;

        let builder = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(CACHE_CONTROL, "no-cache")
            .body(bytes);

        let text = self.execute(&url, builder).await?;
        decode_json(&url, &text)
    }

    /// `GET /api/aggregate/all/{id}`: weather, events, restaurants and
    /// country data for one location in a single document.
    pub async fn aggregate(&self, id: &str) -> Result<Value, ApiError> {
        if id.is_empty() {
            return Err(ApiError::InvalidArgument("location id must not be empty".to_string()));
        }
        let url = self.endpoint(AGGREGATE_PATH, &[id])?;
        self.get_json(url).await
    }

    /// `GET /api/source/restaurants/location?lat=..&lng=..`
    pub async fn restaurants(&self, at: Coordinates) -> Result<Value, ApiError> {
        let url = self.located(RESTAURANTS_PATH, at)?;
        self.get_json(url).await
    }

    /// `GET /api/source/events/location?lat=..&lng=..`
    pub async fn events(&self, at: Coordinates) -> Result<Value, ApiError> {
        let url = self.located(EVENTS_PATH, at)?;
        self.get_json(url).await
    }

    fn located(&self, path: &[&str], at: Coordinates) -> Result<Url, ApiError> {
        let mut url = self.endpoint(path, &[])?;
        url.query_pairs_mut()
            .append_pair("lat", &at.lat.to_string())
            .append_pair("lng", &at.lng.to_string());
        Ok(url)
    }

    /// Join path segments onto the base URL. Segments are percent-encoded.
    fn endpoint(&self, path: &[&str], params: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                ApiError::InvalidUrl(format!("{} cannot be a base URL", self.base_url))
            })?;
            segments.pop_if_empty();
            segments.extend(path.iter().chain(params.iter()));
        }
        Ok(url)
    }

    async fn get_text(&self, url: Url) -> Result<String, ApiError> {
        let builder = self.client.get(url.clone());
        self.execute(&url, builder).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let builder = self.client.get(url.clone());
        let text = self.execute(&url, builder).await?;
        decode_json(&url, &text)
    }

    /// Send the request and read the whole body. The request timeout covers
    /// both, so a response that stalls mid-body still fails.
    async fn execute(&self, url: &Url, builder: RequestBuilder) -> Result<String, ApiError> {
        let started = Instant::now();
        tracing::debug!(%url, "sending request");

        let exchange = self.exchange(url, builder);
        let result = match self.request_timeout {
            Some(limit) => timeout(limit, exchange)
                .await
                .unwrap_or_else(|_| {
                    Err(ApiError::Timeout {
                        url: url.to_string(),
                        duration: limit.as_secs(),
                    })
                }),
            None => exchange.await,
        };

        tracing::debug!(
            %url,
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request finished"
        );
        result
    }

    async fn exchange(&self, url: &Url, builder: RequestBuilder) -> Result<String, ApiError> {
        let response = builder.send().await.map_err(|e| self.transport_error(url, e))?;
        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "response received");

        let body = response.text().await;
        if !status.is_success() {
            let body = match body {
                Ok(text) => text,
                Err(e) => format!("<unreadable body: {}>", e),
            };
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        body.map_err(|e| self.transport_error(url, e))
    }

    /// reqwest reports its own connect timeout as an error; keep it a timeout.
    fn transport_error(&self, url: &Url, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            let limit = self.request_timeout.unwrap_or(self.connect_timeout);
            return ApiError::Timeout {
                url: url.to_string(),
                duration: limit.as_secs(),
            };
        }
        ApiError::Network {
            url: url.to_string(),
            source: err,
        }
    }
}

fn decode_json<T: DeserializeOwned>(url: &Url, text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Json {
        url: url.to_string(),
        source: e,
    })
}
