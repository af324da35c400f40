use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::cli::ConfigCommands;
use crate::config::{Config, ConfigSource, PROJECT_CONFIG_FILE};
use crate::utils::{AppError, AppResult, OutputStyle};

pub fn handle_config_command(
    config: &Config,
    source: &ConfigSource,
    command: Option<ConfigCommands>,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) => handle_show_command(config, source),
        Some(ConfigCommands::Init { force }) => {
            let path = init_config(&std::env::current_dir()?, force)?;
            println!("✅ {}", OutputStyle::success(&format!("Wrote {}", path.display())));
            Ok(())
        }
        Some(ConfigCommands::Path) => {
            match source.path() {
                Some(path) => println!("{}", path.display()),
                None => println!("{}", OutputStyle::muted("(built-in defaults)")),
            }
            Ok(())
        }
        None => handle_config_help(),
    }
}

fn handle_show_command(config: &Config, source: &ConfigSource) -> Result<()> {
    OutputStyle::print_header("⚙️  taskrelay configuration");
    let origin = match source {
        ConfigSource::Explicit(path) => format!("{} (--config)", path.display()),
        ConfigSource::Project(path) => path.display().to_string(),
        ConfigSource::User(path) => format!("{} (user)", path.display()),
        ConfigSource::Defaults => "built-in defaults".to_string(),
    };
    OutputStyle::print_field_colored("Source", &origin, OutputStyle::muted);
    println!();
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write the default configuration into `dir`.
pub fn init_config(dir: &Path, force: bool) -> AppResult<PathBuf> {
    let path = dir.join(PROJECT_CONFIG_FILE);
    if path.exists() && !force {
        return Err(AppError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save(&path)?;
    Ok(path)
}

fn handle_config_help() -> Result<()> {
    println!("⚙️  Configuration Management");
    println!("==========================");
    println!("Available configuration commands:");
    println!("  taskrelay config show    - Show the effective configuration");
    println!("  taskrelay config init    - Write defaults to ./{}", PROJECT_CONFIG_FILE);
    println!("  taskrelay config path    - Print the configuration file in use");
    Ok(())
}
