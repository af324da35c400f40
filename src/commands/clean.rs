use anyhow::Result;

use crate::commands::handlers::run_plan;
use crate::config::Config;
use crate::core::data::Action;

/// `clean` and its alias `all`.
pub async fn handle_clean_command(config: &Config, action: Action, dry_run: bool) -> Result<()> {
    debug_assert!(matches!(action, Action::All | Action::Clean));
    run_plan(config, action, dry_run).await?;
    Ok(())
}
