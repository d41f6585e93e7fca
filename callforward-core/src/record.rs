// callforward-core/src/record.rs
use crate::accessor::CombinedSettings;
use std::time::Duration;
use voice_admin_client::{timespan, ForwardingType, TargetType, VoicemailSettings};

/// Marker written for voicemail values that could not be retrieved
pub const NOT_AVAILABLE: &str = "N/A";

/// Columns shared by every export
pub const RECORD_COLUMNS: [&str; 21] = [
    "Email",
    "IsForwardingEnabled",
    "ForwardingType",
    "ForwardingTargetType",
    "ForwardingTarget",
    "IsUnansweredEnabled",
    "UnansweredTargetType",
    "UnansweredTarget",
    "UnansweredDelay",
    "VoicemailEnabled",
    "CallAnswerRules",
    "DefaultGreetingPromptOverwrite",
    "DefaultOofGreetingPromptOverwrite",
    "OofGreetingFollowAutomaticRepliesEnabled",
    "OofGreetingFollowCalendarEnabled",
    "PromptLanguage",
    "ShareData",
    "TransferTarget",
    "TranscriptionEnabled",
    "TranscriptionProfanityMaskingEnabled",
    "TranscriptionTranslationEnabled",
];

/// Extra column of post-configuration exports
pub const FORWARDING_NUMBER_COLUMN: &str = "ForwardingNumber";

/// One user's settings as captured by a single operation
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsRecord {
    pub email: String,
    pub immediate_enabled: Option<bool>,
    pub forwarding_type: Option<ForwardingType>,
    pub immediate_target_type: Option<TargetType>,
    pub immediate_target: Option<String>,
    pub unanswered_enabled: Option<bool>,
    pub unanswered_target_type: Option<TargetType>,
    pub unanswered_target: Option<String>,
    pub unanswered_delay: Option<Duration>,
    /// `None` when voicemail could not be read or is not configured
    pub voicemail: Option<VoicemailSettings>,
    pub forwarding_number: Option<String>,
}

impl SettingsRecord {
    pub fn build(email: &str, settings: &CombinedSettings) -> Self {
        let calling = &settings.calling;
        Self {
            email: email.to_string(),
            immediate_enabled: calling.is_forwarding_enabled,
            forwarding_type: calling.forwarding_type.clone(),
            immediate_target_type: calling.forwarding_target_type.clone(),
            immediate_target: calling.forwarding_target.clone(),
            unanswered_enabled: calling.is_unanswered_enabled,
            unanswered_target_type: calling.unanswered_target_type.clone(),
            unanswered_target: calling.unanswered_target.clone(),
            unanswered_delay: calling.unanswered_delay,
            voicemail: settings.voicemail.settings().cloned(),
            forwarding_number: None,
        }
    }

    /// Echo the input number on a post-configuration record
    pub fn with_forwarding_number(mut self, number: &str) -> Self {
        self.forwarding_number = Some(number.to_string());
        self
    }

    /// Cells in [`RECORD_COLUMNS`] order
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.email.clone(),
            bool_cell(self.immediate_enabled),
            display_cell(self.forwarding_type.as_ref()),
            display_cell(self.immediate_target_type.as_ref()),
            self.immediate_target.clone().unwrap_or_default(),
            bool_cell(self.unanswered_enabled),
            display_cell(self.unanswered_target_type.as_ref()),
            self.unanswered_target.clone().unwrap_or_default(),
            self.unanswered_delay.map(timespan::format).unwrap_or_default(),
        ];
        cells.extend(voicemail_cells(self.voicemail.as_ref()));
        cells
    }
}

fn bool_cell(value: Option<bool>) -> String {
    match value {
        Some(true) => "True".to_string(),
        Some(false) => "False".to_string(),
        None => String::new(),
    }
}

fn display_cell<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn voicemail_cells(voicemail: Option<&VoicemailSettings>) -> Vec<String> {
    let Some(vm) = voicemail else {
        return vec![NOT_AVAILABLE.to_string(); 12];
    };

    let flag = |v: Option<bool>| match v {
        None => NOT_AVAILABLE.to_string(),
        some => bool_cell(some),
    };
    let text = |v: &Option<String>| v.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());

    vec![
        flag(vm.voicemail_enabled),
        text(&vm.call_answer_rules),
        text(&vm.default_greeting_prompt_overwrite),
        text(&vm.default_oof_greeting_prompt_overwrite),
        flag(vm.oof_greeting_follow_automatic_replies_enabled),
        flag(vm.oof_greeting_follow_calendar_enabled),
        text(&vm.prompt_language),
        flag(vm.share_data),
        text(&vm.transfer_target),
        flag(vm.transcription_enabled),
        flag(vm.transcription_profanity_masking_enabled),
        flag(vm.transcription_translation_enabled),
    ]
}
