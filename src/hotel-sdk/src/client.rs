use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::SdkError;

/// HTTP client for the Hotel SGS API.
///
/// Holds the bearer token returned at login and attaches it to every request.
#[derive(Clone, Debug)]
pub struct HotelClient {
    base_url: Url,
    token: Option<String>,
    http: reqwest::Client,
}

impl HotelClient {
    /// Create a new client pointing at the given base URL (e.g. `https://host/api`)
    pub fn new(base_url: &str) -> Result<Self, SdkError> {
        Self::with_http(base_url, reqwest::Client::new())
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, SdkError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_http(base_url, http)
    }

    /// Create a client on top of a preconfigured `reqwest::Client`
    pub fn with_http(base_url: &str, http: reqwest::Client) -> Result<Self, SdkError> {
        let trimmed = base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed).map_err(|e| SdkError::InvalidUrl(format!("{trimmed}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SdkError::InvalidUrl(trimmed.to_string()));
        }
        Ok(Self {
            base_url,
            token: None,
            http,
        })
    }

    /// Attach a bearer token to all subsequent requests
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Build the URL for a resource path, percent-encoding each segment.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, SdkError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SdkError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, path = url.path(), "hotel api request");
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a GET request and deserialize the response
    pub(crate) async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, SdkError> {
        let resp = self.request(Method::GET, self.url(segments)?).send().await?;
        handle_response(resp).await
    }

    /// Send a JSON body and deserialize the response, if the server sent one
    pub(crate) async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<Option<T>, SdkError> {
        let resp = self
            .request(method, self.url(segments)?)
            .json(body)
            .send()
            .await?;
        handle_optional_response(resp).await
    }

    /// Send a JSON body, discarding whatever comes back
    pub(crate) async fn send<B: Serialize>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<(), SdkError> {
        let resp = self
            .request(method, self.url(segments)?)
            .json(body)
            .send()
            .await?;
        check_status(resp).await.map(|_| ())
    }

    /// Send a request without a body, discarding whatever comes back
    pub(crate) async fn execute(&self, method: Method, url: Url) -> Result<(), SdkError> {
        let resp = self.request(method, url).send().await?;
        check_status(resp).await.map(|_| ())
    }

    /// Send a DELETE request, expecting no response body
    pub(crate) async fn delete(&self, segments: &[&str]) -> Result<(), SdkError> {
        self.execute(Method::DELETE, self.url(segments)?).await
    }
}

async fn check_status(resp: Response) -> Result<Response, SdkError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let path = resp.url().path().to_string();
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<hotel_api::ApiError>(&text)
        .ok()
        .and_then(|e| e.summary().map(str::to_string))
        .unwrap_or(text);
    tracing::warn!(status, path, %message, "hotel api request failed");
    Err(SdkError::Api { status, message })
}

async fn handle_response<T: DeserializeOwned>(resp: Response) -> Result<T, SdkError> {
    let resp = check_status(resp).await?;
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}

async fn handle_optional_response<T: DeserializeOwned>(
    resp: Response,
) -> Result<Option<T>, SdkError> {
    let resp = check_status(resp).await?;
    let body = resp.text().await?;
    if body.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(&body)?))
}
