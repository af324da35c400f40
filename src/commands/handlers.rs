use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::core::data::{Action, Plan};
use crate::core::dispatcher::{DispatchReport, Dispatcher};
use crate::core::interrupt::Interrupt;
use crate::core::runner::ProcessRunner;
use crate::utils::OutputStyle;

/// Expand `action` against the configuration and run it through the build
/// tool, printing trace lines to stdout.
pub async fn run_plan(config: &Config, action: Action, dry_run: bool) -> Result<DispatchReport> {
    let plan = Plan::for_action(action, config);
    if plan.is_empty() {
        info!(%action, "nothing to do");
        return Ok(DispatchReport::default());
    }

    // One listener for the whole run, installed before the first child spawns
    let interrupt = Interrupt::listen()?;
    let runner = ProcessRunner::from_config(&config.general).with_interrupt(interrupt.clone());
    let dispatcher = Dispatcher::new(runner)
        .keep_going(config.general.keep_going)
        .dry_run(dry_run)
        .with_interrupt(interrupt);

    let mut stdout = std::io::stdout();
    let report = dispatcher.dispatch(&plan, &mut stdout).await?;

    if !report.skipped.is_empty() {
        eprintln!(
            "taskrelay: {}",
            OutputStyle::muted(&OutputStyle::format_skipped(&report.skipped))
        );
    }

    report.clone().into_result()?;
    Ok(report)
}
