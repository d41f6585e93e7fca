// voice-admin-client/src/lib.rs
pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use auth::{authenticate, ClientCredentials};
pub use client::AdminClient;
pub use error::ApiError;
pub use http::{HttpClient, HttpError};
pub use types::{
    timespan, CallingSettings, CallingSettingsUpdate, ForwardingType, TargetType, TokenResponse,
    VoicemailSettings,
};

// Re-export reqwest client when feature is enabled
#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
