// callforward-core/src/config.rs
use anyhow::{anyhow, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use voice_admin_client::ClientCredentials;

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// App registration used for the client-credentials handshake
#[derive(Debug, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    /// Prefer CALLFORWARD_CLIENT_SECRET over storing this on disk
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default = "default_authority")]
    pub authority: String,
    #[serde(default = "default_scope")]
    pub scope: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            tenant_id: None,
            client_id: None,
            client_secret: None,
            authority: default_authority(),
            scope: default_scope(),
        }
    }
}

fn default_authority() -> String {
    "https://login.microsoftonline.com".to_string()
}

fn default_scope() -> String {
    "https://api.interfaces.records.teams.microsoft.com/.default".to_string()
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ApiConfig {
    /// Base URL of the voice administration API
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RunConfig {
    /// Input list, resolved against the run directory
    #[serde(default = "default_input_file")]
    pub input_file: String,
    /// Pause after each user, in milliseconds
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_file: default_input_file(),
            throttle_ms: default_throttle_ms(),
        }
    }
}

fn default_input_file() -> String {
    "users.csv".to_string()
}

fn default_throttle_ms() -> u64 {
    1500
}

impl Config {
    /// Load from the per-user config directory, creating a default file on first use
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;

        if let Some(dir) = config_path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        if !config_path.exists() {
            Self::default().save_to(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load a specific file; environment overrides still apply
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Cannot read config {}: {}", path.display(), e))?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = var("CALLFORWARD_CLIENT_SECRET") {
            self.auth.client_secret = Some(secret);
        }
        if let Some(tenant) = var("CALLFORWARD_TENANT_ID") {
            self.auth.tenant_id = Some(tenant);
        }
        if let Some(client_id) = var("CALLFORWARD_CLIENT_ID") {
            self.auth.client_id = Some(client_id);
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_path()?;
        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)?;
        }
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        // Set permissions to 600 (owner read/write only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("Cannot determine config directory"))?;
        Ok(base_dirs.config_dir().join("callforward").join("config.toml"))
    }

    /// Credentials for the token request; fails naming the first missing value
    pub fn credentials(&self) -> Result<ClientCredentials> {
        let require = |value: &Option<String>, name: &str| -> Result<String> {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
                .ok_or_else(|| anyhow!("{} not set. Run `callforward setup` first", name))
        };

        Ok(ClientCredentials {
            authority: self.auth.authority.clone(),
            tenant_id: require(&self.auth.tenant_id, "auth.tenant_id")?,
            client_id: require(&self.auth.client_id, "auth.client_id")?,
            client_secret: require(&self.auth.client_secret, "auth.client_secret")?,
            scope: self.auth.scope.clone(),
        })
    }

    pub fn api_url(&self) -> Result<&str> {
        self.api
            .base_url
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("api.base_url not set. Run `callforward setup` first"))
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.run.throttle_ms)
    }
}
