// voice-admin-client/src/http/reqwest.rs
use super::{HttpClient, HttpError};
use async_trait::async_trait;

#[cfg(feature = "reqwest")]
pub struct ReqwestClient {
    inner: reqwest::Client,
    bearer_token: Option<String>,
}

#[cfg(feature = "reqwest")]
impl ReqwestClient {
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
            bearer_token: None,
        }
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.bearer_token = Some(token);
        self
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn execute(req: reqwest::RequestBuilder) -> Result<Vec<u8>, HttpError> {
        let resp = req.send().await.map_err(|e| HttpError {
            status: None,
            message: e.to_string(),
        })?;

        let status = resp.status();
        let is_success = status.is_success();
        let status_code = status.as_u16();

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| HttpError {
                status: Some(status_code),
                message: e.to_string(),
            })?
            .to_vec();

        if !is_success {
            return Err(HttpError {
                status: Some(status_code),
                message: String::from_utf8_lossy(&bytes).to_string(),
            });
        }

        Ok(bytes)
    }
}

#[cfg(feature = "reqwest")]
impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "reqwest")]
#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        let req = self
            .authorize(self.inner.get(url))
            .header("accept", "application/json");
        Self::execute(req).await
    }

    async fn patch_json(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, HttpError> {
        let req = self
            .authorize(self.inner.patch(url))
            .header("content-type", "application/json")
            .body(body);
        Self::execute(req).await
    }

    async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<Vec<u8>, HttpError> {
        // Token endpoints never get the bearer header.
        let req = self.inner.post(url).form(fields);
        Self::execute(req).await
    }
}
