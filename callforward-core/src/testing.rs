// In-memory doubles shared by the unit tests
use crate::accessor::SettingsApi;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};
use voice_admin_client::{
    ApiError, CallingSettings, CallingSettingsUpdate, HttpError, VoicemailSettings,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeUser {
    pub calling: CallingSettings,
    pub voicemail: Option<VoicemailSettings>,
    pub voicemail_error: bool,
    pub read_error: bool,
    pub update_error: bool,
    /// Reads start failing once an update has been applied
    pub read_error_after_update: bool,
    pub updated: bool,
}

impl FakeUser {
    pub fn with_voicemail() -> Self {
        Self {
            voicemail: Some(VoicemailSettings {
                voicemail_enabled: Some(true),
                prompt_language: Some("en-US".to_string()),
                transcription_enabled: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn voicemail_fails(mut self) -> Self {
        self.voicemail_error = true;
        self
    }

    pub fn reads_fail(mut self) -> Self {
        self.read_error = true;
        self
    }

    pub fn updates_fail(mut self) -> Self {
        self.update_error = true;
        self
    }

    pub fn reads_fail_after_update(mut self) -> Self {
        self.read_error_after_update = true;
        self
    }
}

fn server_error() -> ApiError {
    ApiError::Http(HttpError {
        status: Some(503),
        message: "service unavailable".to_string(),
    })
}

#[derive(Default)]
pub(crate) struct FakeApi {
    users: Mutex<HashMap<String, FakeUser>>,
    updates: Mutex<Vec<CallingSettingsUpdate>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, email: &str, user: FakeUser) -> Self {
        self.users.lock().unwrap().insert(email.to_string(), user);
        self
    }

    pub fn calling(&self, email: &str) -> CallingSettings {
        self.users.lock().unwrap()[email].calling.clone()
    }

    pub fn updates(&self) -> Vec<CallingSettingsUpdate> {
        self.updates.lock().unwrap().clone()
    }

    fn user(&self, email: &str) -> Result<FakeUser, ApiError> {
        self.users
            .lock()
            .unwrap()
            .get(email)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("user {}", email)))
    }
}

#[async_trait]
impl SettingsApi for FakeApi {
    async fn calling_settings(&self, identity: &str) -> Result<CallingSettings, ApiError> {
        let user = self.user(identity)?;
        if user.read_error || (user.read_error_after_update && user.updated) {
            return Err(server_error());
        }
        Ok(user.calling)
    }

    async fn voicemail_settings(
        &self,
        identity: &str,
    ) -> Result<Option<VoicemailSettings>, ApiError> {
        let user = self.user(identity)?;
        if user.voicemail_error {
            return Err(server_error());
        }
        Ok(user.voicemail)
    }

    async fn update_calling_settings(
        &self,
        identity: &str,
        update: &CallingSettingsUpdate,
    ) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(identity)
            .ok_or_else(|| ApiError::NotFound(format!("user {}", identity)))?;
        if user.update_error {
            return Err(server_error());
        }
        self.updates.lock().unwrap().push(update.clone());

        let calling = &mut user.calling;
        if update.is_forwarding_enabled.is_some() {
            calling.is_forwarding_enabled = update.is_forwarding_enabled;
            calling.forwarding_type = update.forwarding_type.clone();
            calling.forwarding_target_type = update.forwarding_target_type.clone();
            calling.forwarding_target = update.forwarding_target.clone();
        }
        if update.is_unanswered_enabled.is_some() {
            calling.is_unanswered_enabled = update.is_unanswered_enabled;
            calling.unanswered_target_type = update.unanswered_target_type.clone();
            calling.unanswered_target = update.unanswered_target.clone();
            calling.unanswered_delay = update.unanswered_delay;
        }
        user.updated = true;
        Ok(())
    }
}

/// Captures `tracing` output of the current thread
#[derive(Clone, Default)]
pub(crate) struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogCapture {
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .with_max_level(tracing::Level::INFO)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn lines(&self, level: &str) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.trim_start().starts_with(level))
            .map(str::to_string)
            .collect()
    }
}
