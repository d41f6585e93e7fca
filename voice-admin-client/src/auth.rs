// voice-admin-client/src/auth.rs
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::types::TokenResponse;

/// Client-credentials grant against an OAuth2 authority
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub authority: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
}

impl ClientCredentials {
    pub fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority.trim_end_matches('/'),
            self.tenant_id
        )
    }
}

/// Exchange client credentials for a bearer token
pub async fn authenticate<C: HttpClient>(
    http: &C,
    creds: &ClientCredentials,
) -> Result<TokenResponse, ApiError> {
    let fields = [
        ("client_id", creds.client_id.as_str()),
        ("client_secret", creds.client_secret.as_str()),
        ("scope", creds.scope.as_str()),
        ("grant_type", "client_credentials"),
    ];

    let bytes = http
        .post_form(&creds.token_url(), &fields)
        .await
        .map_err(|e| ApiError::Auth(e.to_string()))?;

    let token: TokenResponse = serde_json::from_slice(&bytes)?;
    if token.access_token.is_empty() {
        return Err(ApiError::Auth("token endpoint returned an empty token".to_string()));
    }
    Ok(token)
}
