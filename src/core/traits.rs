use async_trait::async_trait;

use crate::core::data::Delegation;
use crate::utils::error::AppResult;

/// How a delegated child finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Non-zero exit; `None` when the child was killed by a signal.
    Failed(Option<i32>),
}

/// Runs one delegation to completion.
///
/// Implementations return `Err(AppError::Interrupted)` when the run was cut
/// short by the invoker and `Err(AppError::Spawn { .. })` when the child could
/// not be started at all.
#[async_trait]
pub trait Delegate: Send + Sync {
    async fn run(&self, delegation: &Delegation) -> AppResult<Outcome>;

    /// Human-readable command line, used for dry runs and listings.
    fn describe(&self, delegation: &Delegation) -> String;
}
