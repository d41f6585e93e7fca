// callforward-core/src/session.rs
use crate::accessor::SettingsApi;
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;
use voice_admin_client::{
    authenticate, AdminClient, ApiError, CallingSettings, CallingSettingsUpdate, ReqwestClient,
    VoicemailSettings,
};

/// Authenticated connection to the voice administration service.
///
/// Created once at startup and handed to everything that talks to the
/// service; there is no reconnect.
pub struct Session {
    client: AdminClient<ReqwestClient>,
    tenant_id: String,
}

impl Session {
    pub async fn connect(config: &Config) -> Result<Self> {
        let creds = config.credentials()?;
        let api_url = config.api_url()?;

        let token = authenticate(&ReqwestClient::new(), &creds)
            .await
            .with_context(|| format!("Cannot connect to tenant {}", creds.tenant_id))?;

        let http = ReqwestClient::new().with_token(token.access_token);
        let client = AdminClient::new(http, api_url)
            .with_context(|| format!("Invalid api.base_url {}", api_url))?;

        info!("Connected to tenant {} at {}", creds.tenant_id, client.api_url());

        Ok(Self {
            client,
            tenant_id: creds.tenant_id,
        })
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }
}

#[async_trait]
impl SettingsApi for Session {
    async fn calling_settings(&self, identity: &str) -> Result<CallingSettings, ApiError> {
        self.client.calling_settings(identity).await
    }

    async fn voicemail_settings(
        &self,
        identity: &str,
    ) -> Result<Option<VoicemailSettings>, ApiError> {
        self.client.voicemail_settings(identity).await
    }

    async fn update_calling_settings(
        &self,
        identity: &str,
        update: &CallingSettingsUpdate,
    ) -> Result<(), ApiError> {
        self.client.update_calling_settings(identity, update).await
    }
}
