// callforward-core/src/accessor.rs
use async_trait::async_trait;
use std::time::Duration;
use voice_admin_client::{ApiError, CallingSettings, CallingSettingsUpdate, VoicemailSettings};

/// Ring timeout applied by unanswered forwarding
pub const UNANSWERED_DELAY: Duration = Duration::from_secs(10);

/// The remote calls the tool issues per user
#[async_trait]
pub trait SettingsApi: Send + Sync {
    async fn calling_settings(&self, identity: &str) -> Result<CallingSettings, ApiError>;

    /// `Ok(None)` when the user has no voicemail configuration
    async fn voicemail_settings(
        &self,
        identity: &str,
    ) -> Result<Option<VoicemailSettings>, ApiError>;

    async fn update_calling_settings(
        &self,
        identity: &str,
        update: &CallingSettingsUpdate,
    ) -> Result<(), ApiError>;
}

/// Outcome of the optional voicemail read
#[derive(Debug, Clone, PartialEq)]
pub enum VoicemailLookup {
    Found(VoicemailSettings),
    /// The user has no voicemail configuration
    Missing,
    /// The read failed; carries the underlying error text
    Failed(String),
}

impl VoicemailLookup {
    pub fn settings(&self) -> Option<&VoicemailSettings> {
        match self {
            Self::Found(settings) => Some(settings),
            Self::Missing | Self::Failed(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombinedSettings {
    pub calling: CallingSettings,
    pub voicemail: VoicemailLookup,
}

/// Read call forwarding (required) and voicemail (best effort) for one user.
///
/// Only a call-forwarding failure fails the user; a voicemail failure is
/// reported through [`VoicemailLookup::Failed`] and left to the caller.
pub async fn read_combined_settings<A>(api: &A, email: &str) -> Result<CombinedSettings, ApiError>
where
    A: SettingsApi + ?Sized,
{
    let calling = api.calling_settings(email).await?;
    let voicemail = match api.voicemail_settings(email).await {
        Ok(Some(settings)) => VoicemailLookup::Found(settings),
        Ok(None) => VoicemailLookup::Missing,
        Err(e) => VoicemailLookup::Failed(e.to_string()),
    };
    Ok(CombinedSettings { calling, voicemail })
}

/// Enable immediate forwarding to `target`, passed through verbatim
pub async fn apply_immediate_forwarding<A>(api: &A, email: &str, target: &str) -> Result<(), ApiError>
where
    A: SettingsApi + ?Sized,
{
    api.update_calling_settings(email, &CallingSettingsUpdate::immediate(target))
        .await
}

/// Enable unanswered-call forwarding to `target` after [`UNANSWERED_DELAY`]
pub async fn apply_unanswered_forwarding<A>(
    api: &A,
    email: &str,
    target: &str,
) -> Result<(), ApiError>
where
    A: SettingsApi + ?Sized,
{
    api.update_calling_settings(
        email,
        &CallingSettingsUpdate::unanswered(target, UNANSWERED_DELAY),
    )
    .await
}
