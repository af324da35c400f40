use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use anyhow::Result;
use crate::config::{Config, ConfigSource};
use crate::commands::{clean, configure, data, list, search};
use crate::core::data::Action;
use crate::utils::terminal::ColorChoice;

#[derive(Parser, Debug)]
#[command(name = "taskrelay")]
#[command(about = "Top-level task runner that delegates to collaborator directories")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Keep running the remaining directories after a failure
    #[arg(short = 'k', long, global = true)]
    pub keep_going: bool,

    /// Print the delegations without running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Build tool to run in each directory (overrides config)
    #[arg(long, value_name = "PROGRAM", global = true)]
    pub tool: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Action to run; no subcommand means `all`.
    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::All)
    }

    /// Fold command-line overrides into the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if self.keep_going {
            config.general.keep_going = true;
        }
        if let Some(tool) = &self.tool {
            config.general.build_tool = tool.clone();
        }
    }
}

impl Commands {
    pub async fn execute(self, config: Config, source: &ConfigSource, dry_run: bool) -> Result<()> {
        match self {
            Commands::All => {
                clean::handle_clean_command(&config, Action::All, dry_run).await?;
            }
            Commands::Clean => {
                clean::handle_clean_command(&config, Action::Clean, dry_run).await?;
            }
            Commands::Data => {
                data::handle_data_command(&config, dry_run).await?;
            }
            Commands::Search(args) => {
                search::handle_search_command(&config, &args)?;
            }
            Commands::List => {
                list::handle_list_command(&config)?;
            }
            Commands::Config(args) => {
                configure::handle_config_command(&config, source, args.command)?;
            }
        }
        Ok(())
    }
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Default action, same as clean
    All,

    /// Run the convert target in the data directory
    Data,

    /// Run the clean target in every clean directory
    Clean,

    /// Search Python sources for a pattern, case-insensitively
    Search(SearchArgs),

    /// List actions and the delegations they expand to
    List,

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct SearchArgs {
    /// Pattern to look for; empty matches every line
    #[arg(env = "SEARCH", default_value = "")]
    pub pattern: String,

    /// Treat the pattern as a literal string
    #[arg(short = 'F', long)]
    pub fixed_strings: bool,

    /// Prefix each line with its line number
    #[arg(short = 'n', long)]
    pub line_number: bool,

    /// Directory to search from (overrides config)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// File-name glob (overrides config)
    #[arg(long, value_name = "GLOB")]
    pub glob: Option<String>,

    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    #[arg(long, value_enum, default_value_t = SearchFormat::Plain)]
    pub format: SearchFormat,

    /// Page long output
    #[arg(long)]
    pub pager: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchFormat {
    Plain,
    Json,
}

#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Write the default configuration to ./taskrelay.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print which configuration file is in effect
    Path,
}
