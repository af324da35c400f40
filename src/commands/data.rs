use anyhow::Result;

use crate::commands::handlers::run_plan;
use crate::config::Config;
use crate::core::data::Action;

pub async fn handle_data_command(config: &Config, dry_run: bool) -> Result<()> {
    run_plan(config, Action::Data, dry_run).await?;
    Ok(())
}
