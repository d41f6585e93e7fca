// callforward-cli/src/commands/setup.rs
use anyhow::Result;
use callforward_core::{Config, Session};
use dialoguer::{Input, Password};
use std::path::Path;

/// Exit code type
pub type SetupExitCode = i32;

/// Prompt for the app registration, check it by connecting once, then save it
pub async fn run_setup(config_path: Option<&Path>) -> Result<SetupExitCode> {
    println!("Call Forwarding Setup");
    println!();

    let mut config = match config_path {
        Some(path) if path.exists() => Config::load_from(path)?,
        Some(_) => Config::default(),
        None => Config::load()?,
    };

    let tenant_id: String = Input::new()
        .with_prompt("Tenant ID")
        .with_initial_text(config.auth.tenant_id.clone().unwrap_or_default())
        .interact_text()?;
    let client_id: String = Input::new()
        .with_prompt("Application (client) ID")
        .with_initial_text(config.auth.client_id.clone().unwrap_or_default())
        .interact_text()?;
    let client_secret = Password::new()
        .with_prompt("Client secret")
        .interact()?;
    let base_url: String = Input::new()
        .with_prompt("Voice administration API URL")
        .with_initial_text(config.api.base_url.clone().unwrap_or_default())
        .interact_text()?;

    if client_secret.is_empty() {
        eprintln!("Error: client secret cannot be empty");
        return Ok(2);
    }

    config.auth.tenant_id = Some(tenant_id);
    config.auth.client_id = Some(client_id);
    config.auth.client_secret = Some(client_secret);
    config.api.base_url = Some(base_url);

    println!();
    println!("Validating credentials...");

    if let Err(e) = Session::connect(&config).await {
        eprintln!("Error: {:#}", e);
        return Ok(2);
    }

    let saved = match config_path {
        Some(path) => config.save_to(path),
        None => config.save(),
    };
    if let Err(e) = saved {
        eprintln!("Error: Couldn't write config file: {}", e);
        return Ok(2);
    }

    println!("Credentials saved!");
    println!();
    println!("Put users.csv (Email,ForwardingNumber) in a directory and run: callforward");

    Ok(0)
}
