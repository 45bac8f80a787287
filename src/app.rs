//! Top-level command dispatch.
//!
//! Resolves the settings file, builds the client and runs the selected
//! command. Everything here is synchronous; async work is driven by a
//! current-thread runtime.

use std::io::{self, BufRead, Write};

use tokio::runtime::Builder;
use tracing::{debug, info, warn};

use crate::api::{auth, IssuetrakClient};
use crate::cli::{Cli, Command, ConfigCommand};
use crate::config::{self, ApiSettings, ConfigError, SettingsFile};
use crate::error::{AppError, Result};
use crate::menu::{BlockingExecutor, Execute, MenuLoop};
use crate::operations::{OperationRegistry, OperationRunner};
use crate::quick_create;
use crate::render::ResponseRenderer;

/// Printed when `config get` finds no value.
const NOT_FOUND: &str = "Not Found";

/// Run the command selected on the command line.
pub fn run(cli: Cli) -> Result<()> {
    let file = match &cli.config {
        Some(path) => SettingsFile::new(path),
        None => SettingsFile::default_location()?,
    };
    debug!(path = %file.path().display(), "Using settings file");

    let registry = OperationRegistry::new();

    match cli.command_or_default() {
        Command::Menu => run_menu(&file, &registry),
        Command::CreateIssue => run_quick_create(&file),
        Command::List => {
            let stdout = io::stdout();
            print_operations(&registry, &mut stdout.lock())
        }
        Command::Run { operation } => run_single(&file, &registry, operation),
        Command::Config { action } => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            config_command(&file, action, &mut stdin.lock(), &mut stdout.lock())
        }
    }
}

/// Load the API settings, falling back to the keyring for the key.
fn load_settings(file: &SettingsFile) -> Result<ApiSettings> {
    let settings = config::load_api_settings(file, |account| match auth::get_key(account) {
        Ok(key) => {
            debug!("Using API key from the OS keyring");
            Some(key)
        }
        Err(e) => {
            debug!("No API key in the OS keyring: {}", e);
            None
        }
    })?;
    info!(
        base_url = %settings.base_api_url,
        api_version = settings.api_version,
        "Loaded settings"
    );
    Ok(settings)
}

fn build_executor(file: &SettingsFile) -> Result<BlockingExecutor> {
    let settings = load_settings(file)?;
    let client = IssuetrakClient::new(&settings)?;
    let runner = OperationRunner::new(client, ResponseRenderer::new());
    Ok(BlockingExecutor::new(runner)?)
}

fn run_menu(file: &SettingsFile, registry: &OperationRegistry) -> Result<()> {
    let mut executor = build_executor(file)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = MenuLoop::new(registry, stdin.lock(), stdout.lock()).run(&mut executor);

    executor.shutdown();
    let executed = result?;
    info!(executed, "Menu session ended");
    Ok(())
}

fn run_single(file: &SettingsFile, registry: &OperationRegistry, selector: &str) -> Result<()> {
    let operation = registry.resolve(selector).ok_or_else(|| {
        AppError::other(format!(
            "Unknown operation '{}'. Use a number from 1 to {} or a label from 'list'.",
            selector,
            registry.len()
        ))
    })?;

    let mut executor = build_executor(file)?;
    println!("Executing:  {}...", operation.label());
    let result = executor.execute(operation);

    if result.is_ok() {
        // Rendered files are removed on exit, so keep them until the operator is done.
        println!("Press Enter to exit.");
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
    }

    executor.shutdown();
    result
}

fn run_quick_create(file: &SettingsFile) -> Result<()> {
    let settings = load_settings(file)?;
    let username = settings.require_username()?;
    let client = IssuetrakClient::new(&settings)?;

    let runtime = Builder::new_current_thread().enable_all().build()?;
    let stdout = io::stdout();
    runtime.block_on(quick_create::create_issue(
        &client,
        username,
        &mut stdout.lock(),
    ))
}

fn print_operations<W: Write>(registry: &OperationRegistry, output: &mut W) -> Result<()> {
    for line in registry.menu_lines() {
        writeln!(output, "{}", line)?;
    }
    Ok(())
}

/// Execute a `config` subcommand.
fn config_command<R: BufRead, W: Write>(
    file: &SettingsFile,
    action: &ConfigCommand,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    match action {
        ConfigCommand::Show => {
            writeln!(output, "# {}", file.path().display())?;
            for (key, value) in file.entries()? {
                writeln!(output, "{} = {}", key, value)?;
            }
        }
        ConfigCommand::Get { key } => match file.get(key)? {
            Some(value) => writeln!(output, "{}", value)?,
            None => writeln!(output, "{}", NOT_FOUND)?,
        },
        ConfigCommand::Set { key, value } => {
            file.set(key, value)?;
            writeln!(output, "Saved {} to {}", key, file.path().display())?;
        }
        ConfigCommand::StoreKey => {
            let account = file
                .load()?
                .base_api_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty())
                .ok_or(ConfigError::MissingSetting("base_api_url"))?;

            if auth::has_key(&account) {
                warn!(account = %account, "Replacing API key in the OS keyring");
            }

            writeln!(output, "Enter the API key for {}:", account)?;
            output.flush()?;
            let mut key = String::new();
            input.read_line(&mut key)?;

            auth::store_key(&account, key.trim())?;
            writeln!(output, "API key stored in the OS keyring.")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::tempdir;

    use super::*;

    fn run_config(file: &SettingsFile, action: ConfigCommand) -> Result<String> {
        let mut output = Vec::new();
        config_command(file, &action, &mut Cursor::new(Vec::new()), &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_config_set_then_get() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("config.toml"));

        run_config(
            &file,
            ConfigCommand::Set {
                key: "username".to_string(),
                value: "jsmith".to_string(),
            },
        )
        .unwrap();

        let output = run_config(
            &file,
            ConfigCommand::Get {
                key: "username".to_string(),
            },
        )
        .unwrap();
        assert_eq!(output, "jsmith\n");
    }

    #[test]
    fn test_config_get_missing_key_prints_not_found() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("config.toml"));
        file.set("username", "jsmith").unwrap();

        let output = run_config(
            &file,
            ConfigCommand::Get {
                key: "api_key".to_string(),
            },
        )
        .unwrap();
        assert_eq!(output, "Not Found\n");
    }

    #[test]
    fn test_config_show_masks_key() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("config.toml"));
        file.set("api_key", "0123456789abcdef").unwrap();
        file.set("base_api_url", "https://issuetrak.example.com").unwrap();

        let output = run_config(&file, ConfigCommand::Show).unwrap();

        assert!(output.contains("api_key = 0123********\n"));
        assert!(output.contains("base_api_url = https://issuetrak.example.com\n"));
        assert!(!output.contains("0123456789abcdef"));
    }

    #[test]
    fn test_config_show_without_file_fails() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("missing.toml"));

        let result = run_config(&file, ConfigCommand::Show);
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::ReadError(..)))
        ));
    }

    #[test]
    fn test_store_key_requires_base_url() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("config.toml"));
        file.set("username", "jsmith").unwrap();

        let result = run_config(&file, ConfigCommand::StoreKey);
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::MissingSetting("base_api_url")))
        ));
    }

    #[test]
    fn test_print_operations() {
        let mut output = Vec::new();
        print_operations(&OperationRegistry::new(), &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.lines().count(), 64);
        assert!(output.starts_with("  1:  CreateAttachment\n"));
    }

    #[test]
    fn test_missing_settings_file_is_reported() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("missing.toml"));
        assert!(matches!(
            load_settings(&file),
            Err(AppError::Config(ConfigError::ReadError(..)))
        ));
    }
}
