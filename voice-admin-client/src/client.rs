// voice-admin-client/src/client.rs
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::types::{CallingSettings, CallingSettingsUpdate, VoicemailSettings};
use url::Url;

pub struct AdminClient<C: HttpClient> {
    http: C,
    api_url: Url,
}

impl<C: HttpClient> AdminClient<C> {
    pub fn new(http: C, api_url: &str) -> Result<Self, ApiError> {
        let mut api_url = Url::parse(api_url)?;
        if api_url.cannot_be_a_base() {
            return Err(ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        // Keep a trailing slash off so segment pushes land after the base path
        if api_url.path().ends_with('/') {
            let trimmed = api_url.path().trim_end_matches('/').to_string();
            api_url.set_path(&trimmed);
        }
        Ok(Self { http, api_url })
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_str()
    }

    /// `{api_url}/users/{identity}/{resource}` with the identity escaped as one segment
    fn user_url(&self, identity: &str, resource: &str) -> String {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("users").push(identity).push(resource);
        }
        url.into()
    }

    /// Read the call-forwarding settings of a user
    pub async fn calling_settings(&self, identity: &str) -> Result<CallingSettings, ApiError> {
        let url = self.user_url(identity, "callingSettings");
        let bytes = self.http.get(&url).await.map_err(|e| {
            if e.is_not_found() {
                ApiError::NotFound(format!("user {}", identity))
            } else {
                ApiError::Http(e)
            }
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Read the voicemail settings of a user, `None` when the user has none
    pub async fn voicemail_settings(
        &self,
        identity: &str,
    ) -> Result<Option<VoicemailSettings>, ApiError> {
        let url = self.user_url(identity, "voicemailSettings");
        match self.http.get(&url).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Apply a sparse call-forwarding update
    pub async fn update_calling_settings(
        &self,
        identity: &str,
        update: &CallingSettingsUpdate,
    ) -> Result<(), ApiError> {
        let url = self.user_url(identity, "callingSettings");
        let body = serde_json::to_vec(update)?;
        self.http.patch_json(&url, body).await.map_err(|e| {
            if e.is_not_found() {
                ApiError::NotFound(format!("user {}", identity))
            } else {
                ApiError::Http(e)
            }
        })?;
        Ok(())
    }
}
