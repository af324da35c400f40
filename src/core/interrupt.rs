use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

use crate::utils::error::AppResult;

/// Latched Ctrl-C flag shared by the dispatcher and the process runner.
///
/// Once triggered it stays triggered for the rest of the run, so an
/// interrupt that lands between two steps is still seen by the next one.
#[derive(Debug, Clone)]
pub struct Interrupt {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl Default for Interrupt {
    fn default() -> Self {
        Self::new()
    }
}

impl Interrupt {
    /// A flag that only fires through [`Interrupt::trigger`].
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self { tx: Arc::new(tx), rx }
    }

    /// A flag wired to SIGINT. The handler is installed before this returns,
    /// so the process is no longer killed by Ctrl-C afterwards.
    pub fn listen() -> AppResult<Self> {
        let interrupt = Self::new();
        spawn_listener(interrupt.tx.clone())?;
        Ok(interrupt)
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the flag is set.
    pub async fn triggered(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|fired| *fired).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(unix)]
fn spawn_listener(tx: Arc<watch::Sender<bool>>) -> AppResult<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        while sigint.recv().await.is_some() {
            warn!("interrupt received");
            tx.send_replace(true);
        }
    });
    Ok(())
}

#[cfg(not(unix))]
fn spawn_listener(tx: Arc<watch::Sender<bool>>) -> AppResult<()> {
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received");
            tx.send_replace(true);
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_is_latched_across_clones() {
        let interrupt = Interrupt::new();
        let seen_by_runner = interrupt.clone();
        assert!(!seen_by_runner.is_triggered());

        interrupt.trigger();
        assert!(seen_by_runner.is_triggered());

        tokio::time::timeout(Duration::from_secs(1), seen_by_runner.triggered())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_untriggered_flag_stays_pending() {
        let interrupt = Interrupt::new();
        let waited = tokio::time::timeout(Duration::from_millis(50), interrupt.triggered()).await;
        assert!(waited.is_err());
    }
}
