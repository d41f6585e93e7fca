// voice-admin-client/src/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// How forwarded calls ring relative to the user's own endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ForwardingType {
    Immediate,
    Simultaneous,
    /// A value this client does not know, kept verbatim
    Other(String),
}

impl From<String> for ForwardingType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Immediate" => Self::Immediate,
            "Simultaneous" => Self::Simultaneous,
            _ => Self::Other(value),
        }
    }
}

impl From<ForwardingType> for String {
    fn from(value: ForwardingType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ForwardingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => write!(f, "Immediate"),
            Self::Simultaneous => write!(f, "Simultaneous"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// Kind of destination a forwarding rule points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetType {
    SingleTarget,
    Voicemail,
    MyDelegates,
    Group,
    /// A value this client does not know, kept verbatim
    Other(String),
}

impl From<String> for TargetType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SingleTarget" => Self::SingleTarget,
            "Voicemail" => Self::Voicemail,
            "MyDelegates" => Self::MyDelegates,
            "Group" => Self::Group,
            _ => Self::Other(value),
        }
    }
}

impl From<TargetType> for String {
    fn from(value: TargetType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleTarget => write!(f, "SingleTarget"),
            Self::Voicemail => write!(f, "Voicemail"),
            Self::MyDelegates => write!(f, "MyDelegates"),
            Self::Group => write!(f, "Group"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// Call-forwarding state of one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallingSettings {
    #[serde(default)]
    pub is_forwarding_enabled: Option<bool>,
    #[serde(default)]
    pub forwarding_type: Option<ForwardingType>,
    #[serde(default)]
    pub forwarding_target_type: Option<TargetType>,
    #[serde(default)]
    pub forwarding_target: Option<String>,
    #[serde(default)]
    pub is_unanswered_enabled: Option<bool>,
    #[serde(default)]
    pub unanswered_target_type: Option<TargetType>,
    #[serde(default)]
    pub unanswered_target: Option<String>,
    #[serde(default, with = "timespan::option")]
    pub unanswered_delay: Option<Duration>,
}

/// Voicemail state of one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicemailSettings {
    #[serde(default)]
    pub voicemail_enabled: Option<bool>,
    #[serde(default)]
    pub call_answer_rules: Option<String>,
    #[serde(default)]
    pub default_greeting_prompt_overwrite: Option<String>,
    #[serde(default)]
    pub default_oof_greeting_prompt_overwrite: Option<String>,
    #[serde(default)]
    pub oof_greeting_follow_automatic_replies_enabled: Option<bool>,
    #[serde(default)]
    pub oof_greeting_follow_calendar_enabled: Option<bool>,
    #[serde(default)]
    pub prompt_language: Option<String>,
    #[serde(default)]
    pub share_data: Option<bool>,
    #[serde(default)]
    pub transfer_target: Option<String>,
    #[serde(default)]
    pub transcription_enabled: Option<bool>,
    #[serde(default)]
    pub transcription_profanity_masking_enabled: Option<bool>,
    #[serde(default)]
    pub transcription_translation_enabled: Option<bool>,
}

/// Sparse update of call-forwarding state; unset fields are left untouched remotely
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallingSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_forwarding_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarding_type: Option<ForwardingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarding_target_type: Option<TargetType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forwarding_target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_unanswered_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unanswered_target_type: Option<TargetType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unanswered_target: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "timespan::option"
    )]
    pub unanswered_delay: Option<Duration>,
}

impl CallingSettingsUpdate {
    /// Forward every call straight to `target`
    pub fn immediate(target: &str) -> Self {
        Self {
            is_forwarding_enabled: Some(true),
            forwarding_type: Some(ForwardingType::Immediate),
            forwarding_target_type: Some(TargetType::SingleTarget),
            forwarding_target: Some(target.to_string()),
            ..Default::default()
        }
    }

    /// Forward calls to `target` once they ring unanswered for `delay`
    pub fn unanswered(target: &str, delay: Duration) -> Self {
        Self {
            is_unanswered_enabled: Some(true),
            unanswered_target_type: Some(TargetType::SingleTarget),
            unanswered_target: Some(target.to_string()),
            unanswered_delay: Some(delay),
            ..Default::default()
        }
    }
}

/// OAuth2 token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// `HH:MM:SS` durations as used by the admin API
pub mod timespan {
    use std::time::Duration;

    pub fn format(d: Duration) -> String {
        let secs = d.as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
    }

    /// Parses `HH:MM:SS`, `D.HH:MM:SS` and tolerates a fractional seconds part.
    pub fn parse(s: &str) -> Option<Duration> {
        let s = s.trim();
        let (days, clock) = match s.split_once('.') {
            Some((d, rest)) if rest.contains(':') => (d.parse::<u64>().ok()?, rest),
            _ => (0, s),
        };

        let mut parts = clock.split(':');
        let hours: u64 = parts.next()?.parse().ok()?;
        let minutes: u64 = parts.next()?.parse().ok()?;
        let seconds_part = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        let seconds: u64 = seconds_part
            .split('.')
            .next()
            .and_then(|v| v.parse().ok())?;

        if minutes >= 60 || seconds >= 60 {
            return None;
        }

        let total = days
            .checked_mul(86_400)?
            .checked_add(hours.checked_mul(3600)?)?
            .checked_add(minutes * 60 + seconds)?;
        Some(Duration::from_secs(total))
    }

    pub mod option {
        use serde::{de, Deserialize, Deserializer, Serializer};
        use std::time::Duration;

        pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(d) => s.serialize_str(&super::format(*d)),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
            let raw: Option<String> = Option::deserialize(d)?;
            match raw {
                None => Ok(None),
                Some(s) if s.trim().is_empty() => Ok(None),
                Some(s) => super::parse(&s)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid timespan: {}", s))),
            }
        }
    }
}
