use std::io::Write;
use tracing::{info, warn};

use crate::core::data::{Delegation, Plan};
use crate::core::interrupt::Interrupt;
use crate::core::traits::{Delegate, Outcome};
use crate::utils::error::{AppError, AppResult};

/// A delegation that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub delegation: Delegation,
    pub error: AppError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub completed: Vec<Delegation>,
    pub failures: Vec<Failure>,
    /// Steps never started because an earlier one failed.
    pub skipped: Vec<Delegation>,
    pub dry_run: bool,
}

impl DispatchReport {
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// First failure wins.
    pub fn into_result(self) -> AppResult<()> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(failure.error),
            None => Ok(()),
        }
    }
}

/// Runs the steps of a plan one at a time, in order.
pub struct Dispatcher<D> {
    delegate: D,
    keep_going: bool,
    dry_run: bool,
    interrupt: Interrupt,
}

impl<D: Delegate> Dispatcher<D> {
    pub fn new(delegate: D) -> Self {
        Self {
            delegate,
            keep_going: false,
            dry_run: false,
            interrupt: Interrupt::new(),
        }
    }

    /// Keep running later steps after a failure.
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Print what would run without spawning anything.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// No step starts once this flag is triggered.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// Trace lines go to `out` and are flushed before the step starts, so
    /// they precede any output of the child.
    pub async fn dispatch<W: Write>(&self, plan: &Plan, out: &mut W) -> AppResult<DispatchReport> {
        let mut report = DispatchReport {
            dry_run: self.dry_run,
            ..Default::default()
        };

        info!(action = %plan.action, steps = plan.len(), "dispatching");

        let mut steps = plan.steps().iter();
        for step in steps.by_ref() {
            if self.interrupt.is_triggered() {
                warn!(dir = %step.dir.display(), "interrupted before step");
                return Err(AppError::Interrupted);
            }

            if let Some(trace) = &step.trace {
                writeln!(out, "{}", trace)?;
            }

            if self.dry_run {
                writeln!(out, "{}", self.delegate.describe(step))?;
                out.flush()?;
                continue;
            }
            out.flush()?;

            let error = match self.delegate.run(step).await {
                Ok(Outcome::Success) => {
                    report.completed.push(step.clone());
                    continue;
                }
                Ok(Outcome::Failed(code)) => AppError::Delegation {
                    dir: step.dir.display().to_string(),
                    target: step.target.clone(),
                    code,
                },
                Err(AppError::Interrupted) => return Err(AppError::Interrupted),
                Err(error) => error,
            };

            warn!(dir = %step.dir.display(), target = %step.target, %error, "delegation failed");
            report.failures.push(Failure {
                delegation: step.clone(),
                error,
            });

            if !self.keep_going {
                break;
            }
        }

        report.skipped = steps.cloned().collect();
        if !report.skipped.is_empty() {
            info!(skipped = report.skipped.len(), "stopping after first failure");
        }

        Ok(report)
    }
}
