use std::time::Duration;

use reqwest::header::{self, HeaderValue};
use reqwest::{Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use taskdeck_application::SessionContext;
use taskdeck_core::{AccessToken, AppError, AppResult};
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

mod errors;


pub use errors::normalize_error_response;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Settings for the REST client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    base_url: Url,
    timeout: Duration,
}

impl ApiClientConfig {
    /// Parses the API base URL and validates the timeout.
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let base_url = Url::parse(base_url.trim()).map_err(|error| {
            AppError::Validation(format!("invalid API base URL '{base_url}': {error}"))
        })?;

        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(AppError::Validation(format!(
                "API base URL '{base_url}' must be an http(s) URL"
            )));
        }

        if timeout.is_zero() {
            return Err(AppError::Validation(
                "API timeout must be greater than zero".to_owned(),
            ));
        }

        Ok(Self { base_url, timeout })
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// JSON-over-HTTP client shared by every resource service.
///
/// Attaches the session bearer token when one is present and turns
/// non-success responses into [`AppError`] values carrying the server
/// message.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http_client: reqwest::Client,
    base_url: Url,
    session: SessionContext,
}

impl HttpApiClient {
    /// Creates a client bound to a session context.
    pub fn new(config: &ApiClientConfig, session: SessionContext) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

        Ok(Self {
            http_client,
            base_url: config.base_url().clone(),
            session,
        })
    }

    /// Returns the session context the client reads tokens from.
    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Builds an endpoint URL from path segments, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Internal(format!("API base URL '{}' cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Builds an endpoint URL with query parameters.
    pub fn endpoint_with_query(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> AppResult<Url> {
        let mut url = self.endpoint(segments)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value.as_str());
            }
        }
        Ok(url)
    }

    /// Sends `GET` and decodes the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> AppResult<T> {
        let response = self.send(Method::GET, url, None).await?;
        decode(response).await
    }

    /// Sends `POST` with a JSON body and decodes the JSON response.
    pub async fn post_json<B, T>(&self, url: Url, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let response = self.send(Method::POST, url, Some(body)).await?;
        decode(response).await
    }

    /// Sends `PATCH` with a JSON body and decodes the JSON response.
    pub async fn patch_json<B, T>(&self, url: Url, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let response = self.send(Method::PATCH, url, Some(body)).await?;
        decode(response).await
    }

    /// Sends `DELETE`; any 2xx counts as success.
    pub async fn delete(&self, url: Url) -> AppResult<()> {
        self.send(Method::DELETE, url, None).await.map(|_| ())
    }

    /// Sends `GET` with an explicit token instead of the session token.
    pub async fn get_json_as<T: DeserializeOwned>(
        &self,
        url: Url,
        access_token: &AccessToken,
    ) -> AppResult<T> {
        let response = self
            .send_with_token(Method::GET, url, None, Some(access_token.clone()))
            .await?;
        decode(response).await
    }

    async fn send(&self, method: Method, url: Url, body: Option<Value>) -> AppResult<Response> {
        let access_token = self.session.access_token().await;
        self.send_with_token(method, url, body, access_token).await
    }

    async fn send_with_token(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
        access_token: Option<AccessToken>,
    ) -> AppResult<Response> {
        let request_id = Uuid::new_v4().to_string();
        let mut builder = self
            .http_client
            .request(method.clone(), url.clone())
            .header(header::ACCEPT, HeaderValue::from_static("application/json"))
            .header(REQUEST_ID_HEADER, request_id.as_str());

        match access_token {
            Some(token) => {
                builder = builder.header(header::AUTHORIZATION, token.bearer_header());
            }
            None => debug!(method = %method, url = %url, "sending request without session token"),
        }

        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await.map_err(|error| {
            warn!(
                method = %method,
                url = %url,
                request_id = %request_id,
                error = %error,
                "API request failed before a response arrived"
            );
            AppError::Transport(format!("{method} {} failed: {error}", url.path()))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<body unavailable>".to_owned());
        let error = normalize_error_response(status, body.as_str());
        warn!(
            method = %method,
            url = %url,
            request_id = %request_id,
            status = status.as_u16(),
            error = %error,
            "API request rejected"
        );

        Err(error)
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> AppResult<Value> {
    serde_json::to_value(body)
        .map_err(|error| AppError::Internal(format!("failed to encode request body: {error}")))
}

async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let url = response.url().path().to_owned();
    response.json::<T>().await.map_err(|error| {
        AppError::Internal(format!("failed to parse response body from '{url}': {error}"))
    })
}
