// callforward-core/src/lib.rs
pub mod accessor;
pub mod config;
pub mod context;
pub mod export;
pub mod input;
pub mod menu;
pub mod operations;
pub mod pacer;
pub mod record;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use accessor::{
    apply_immediate_forwarding, apply_unanswered_forwarding, read_combined_settings,
    CombinedSettings, SettingsApi, VoicemailLookup, UNANSWERED_DELAY,
};
pub use config::{ApiConfig, AuthConfig, Config, RunConfig};
pub use context::{RunContext, RunStamp};
pub use export::{write_records, ExportKind};
pub use input::{read_inputs, UserInput};
pub use menu::{MenuController, MenuState, Operator, MENU_ENTRIES};
pub use operations::{
    collect_settings, run_backup, run_configure, ForwardingMode, OperationError, OperationReport,
};
pub use pacer::Pacer;
pub use record::{SettingsRecord, NOT_AVAILABLE};
pub use session::Session;
