// callforward-core/src/operations.rs
use crate::accessor::{
    apply_immediate_forwarding, apply_unanswered_forwarding, read_combined_settings, SettingsApi,
    VoicemailLookup,
};
use crate::context::RunContext;
use crate::export::{write_records, ExportKind};
use crate::input::{read_inputs, UserInput};
use crate::pacer::Pacer;
use crate::record::SettingsRecord;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info, warn};
use voice_admin_client::ApiError;

/// Failures that stop a whole operation before or after its user loop
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("Input file not found: {}", path.display())]
    InputMissing { path: PathBuf },
    #[error("Cannot read input file {}: {source}", path.display())]
    InputRead { path: PathBuf, source: csv::Error },
    #[error("Cannot write {}: {source}", path.display())]
    Export { path: PathBuf, source: csv::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardingMode {
    Immediate,
    Unanswered,
}

impl ForwardingMode {
    async fn apply<A>(self, api: &A, email: &str, target: &str) -> Result<(), ApiError>
    where
        A: SettingsApi + ?Sized,
    {
        match self {
            Self::Immediate => apply_immediate_forwarding(api, email, target).await,
            Self::Unanswered => apply_unanswered_forwarding(api, email, target).await,
        }
    }
}

impl fmt::Display for ForwardingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => write!(f, "immediate"),
            Self::Unanswered => write!(f, "unanswered"),
        }
    }
}

/// What an operation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationReport {
    /// Backup file written ahead of a configuration change
    pub backup: Option<PathBuf>,
    pub output: PathBuf,
    pub users: usize,
    pub records: usize,
}

impl OperationReport {
    pub fn failures(&self) -> usize {
        self.users - self.records
    }
}

/// Read-only pass: capture every user's settings into `backup_<stamp>.csv`
pub async fn run_backup<A>(api: &A, ctx: &RunContext) -> Result<OperationReport, OperationError>
where
    A: SettingsApi + ?Sized,
{
    let users = read_inputs(&ctx.input_path())?;
    backup_users(api, ctx, &users).await
}

/// Back up, then point every user's forwarding at their input number
pub async fn run_configure<A>(
    api: &A,
    ctx: &RunContext,
    mode: ForwardingMode,
) -> Result<OperationReport, OperationError>
where
    A: SettingsApi + ?Sized,
{
    let users = read_inputs(&ctx.input_path())?;
    let backup = backup_users(api, ctx, &users).await?;

    info!("Configuring {} forwarding for {} users", mode, users.len());
    let mut records = Vec::with_capacity(users.len());
    for user in &users {
        if let Some(record) = configure_user(api, user, mode).await {
            records.push(record);
        }
        ctx.pacer().pause().await;
    }

    let output = ctx.current_settings_path();
    write_records(&output, &records, ExportKind::Applied)?;
    info!(
        "Wrote current settings for {} of {} users to {}",
        records.len(),
        users.len(),
        output.display()
    );

    Ok(OperationReport {
        backup: Some(backup.output),
        output,
        users: users.len(),
        records: records.len(),
    })
}

async fn backup_users<A>(
    api: &A,
    ctx: &RunContext,
    users: &[UserInput],
) -> Result<OperationReport, OperationError>
where
    A: SettingsApi + ?Sized,
{
    info!("Backing up settings for {} users", users.len());
    let records = collect_settings(api, users, ctx.pacer()).await;

    let output = ctx.backup_path();
    write_records(&output, &records, ExportKind::Backup)?;
    info!(
        "Backed up {} of {} users to {}",
        records.len(),
        users.len(),
        output.display()
    );

    Ok(OperationReport {
        backup: None,
        output,
        users: users.len(),
        records: records.len(),
    })
}

/// One record per readable user, in input order
pub async fn collect_settings<A>(api: &A, users: &[UserInput], pacer: &Pacer) -> Vec<SettingsRecord>
where
    A: SettingsApi + ?Sized,
{
    let mut records = Vec::with_capacity(users.len());
    for user in users {
        match read_record(api, &user.email).await {
            Ok(record) => {
                info!("Retrieved settings for {}", user.email);
                records.push(record);
            }
            Err(e) => error!("Failed to retrieve settings for {}: {}", user.email, e),
        }
        pacer.pause().await;
    }
    records
}

async fn configure_user<A>(api: &A, user: &UserInput, mode: ForwardingMode) -> Option<SettingsRecord>
where
    A: SettingsApi + ?Sized,
{
    if let Err(e) = mode.apply(api, &user.email, &user.forwarding_number).await {
        error!(
            "Failed to set {} forwarding for {}: {}",
            mode, user.email, e
        );
        return None;
    }
    info!(
        "Set {} forwarding for {} to {}",
        mode, user.email, user.forwarding_number
    );

    match read_record(api, &user.email).await {
        Ok(record) => Some(record.with_forwarding_number(&user.forwarding_number)),
        Err(e) => {
            error!(
                "Forwarding set for {} but settings could not be read back: {}",
                user.email, e
            );
            None
        }
    }
}

/// Read and flatten one user's settings, logging voicemail trouble
async fn read_record<A>(api: &A, email: &str) -> Result<SettingsRecord, ApiError>
where
    A: SettingsApi + ?Sized,
{
    let settings = read_combined_settings(api, email).await?;
    match &settings.voicemail {
        VoicemailLookup::Found(_) => {}
        VoicemailLookup::Missing => info!("No voicemail configuration for {}", email),
        VoicemailLookup::Failed(reason) => {
            warn!("Could not retrieve voicemail settings for {}: {}", email, reason)
        }
    }
    Ok(SettingsRecord::build(email, &settings))
}
