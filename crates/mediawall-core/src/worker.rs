//! Single-worker command queue in front of the [`MediaWall`].
//!
//! Browser automation steps can run for many seconds. Command handlers send
//! requests through a [`WallHandle`] and await the reply, while one tokio task
//! owns the wall and runs commands strictly one at a time.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::controller::{CommandOutcome, MediaWall};
use crate::error::WallError;

/// A request for the wall worker.
#[derive(Debug)]
pub enum WallCommand {
    Show {
        preset: String,
        reply: oneshot::Sender<CommandOutcome>,
    },
    ListPresets {
        reply: oneshot::Sender<Vec<String>>,
    },
    Teardown {
        reply: oneshot::Sender<CommandOutcome>,
    },
    /// Tear down and stop the worker.
    Shutdown {
        reply: oneshot::Sender<CommandOutcome>,
    },
}

/// Owns the wall and drains the command queue.
pub struct WallWorker {
    wall: MediaWall,
    commands: mpsc::Receiver<WallCommand>,
}

impl WallWorker {
    /// Start the worker on the current runtime.
    ///
    /// The pool is torn down when the worker stops, whether by
    /// [`WallHandle::shutdown`] or because every handle was dropped.
    pub fn spawn(wall: MediaWall, queue_depth: usize) -> (WallHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(queue_depth.max(1));
        let worker = Self { wall, commands: rx };
        let task = tokio::spawn(worker.run());
        (WallHandle { commands: tx }, task)
    }

    async fn run(mut self) {
        info!("Wall worker started");

        while let Some(command) = self.commands.recv().await {
            match command {
                WallCommand::Show { preset, reply } => {
                    debug!(preset = %preset, "Show requested");
                    let outcome = self.wall.show(&preset).await;
                    let _ = reply.send(outcome);
                }
                WallCommand::ListPresets { reply } => {
                    let _ = reply.send(self.wall.list_presets());
                }
                WallCommand::Teardown { reply } => {
                    let _ = reply.send(self.wall.teardown().await);
                }
                WallCommand::Shutdown { reply } => {
                    let _ = reply.send(self.wall.teardown().await);
                    break;
                }
            }
        }

        self.wall.teardown().await;
        info!("Wall worker stopped");
    }
}

/// Cloneable sender side of the wall worker.
#[derive(Debug, Clone)]
pub struct WallHandle {
    commands: mpsc::Sender<WallCommand>,
}

impl WallHandle {
    pub async fn show(&self, preset: &str) -> Result<CommandOutcome, WallError> {
        let preset = preset.to_string();
        self.request(|reply| WallCommand::Show { preset, reply }).await
    }

    pub async fn list_presets(&self) -> Result<Vec<String>, WallError> {
        self.request(|reply| WallCommand::ListPresets { reply }).await
    }

    pub async fn teardown(&self) -> Result<CommandOutcome, WallError> {
        self.request(|reply| WallCommand::Teardown { reply }).await
    }

    pub async fn shutdown(&self) -> Result<CommandOutcome, WallError> {
        self.request(|reply| WallCommand::Shutdown { reply }).await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> WallCommand,
    ) -> Result<T, WallError> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(command(tx))
            .await
            .map_err(|_| WallError::WorkerStopped)?;
        rx.await.map_err(|_| WallError::WorkerStopped)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mediawall_config::{SearchAppConfig, TimingConfig};

    use super::*;
    use crate::catalog::PresetCatalog;
    use crate::pool::{PoolSettings, SessionPool};
    use crate::testing::{FakeLauncher, FakePage};

    fn spawn() -> (WallHandle, JoinHandle<()>, FakeLauncher) {
        let launcher = FakeLauncher::new(FakePage::streaming_app(&SearchAppConfig::default()));
        let settings = PoolSettings {
            timing: TimingConfig::immediate(),
            ..PoolSettings::default()
        };
        let pool = SessionPool::new(Arc::new(launcher.clone()), settings);
        let wall = MediaWall::new(PresetCatalog::builtin(), pool);
        let (handle, task) = WallWorker::spawn(wall, 8);
        (handle, task, launcher)
    }

    #[tokio::test]
    async fn test_show_through_queue() {
        let (handle, _task, launcher) = spawn();

        let outcome = handle.show("default").await.unwrap();

        assert!(outcome.success);
        assert_eq!(launcher.launch_count(), 4);
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_pool() {
        let (handle, _task, launcher) = spawn();
        let other = handle.clone();

        let (a, b) = tokio::join!(handle.show("default"), other.show("christmas"));

        assert!(a.unwrap().success);
        assert!(b.unwrap().success);
        assert_eq!(launcher.launch_count(), 4);
        assert_eq!(launcher.live_sessions(), 4);
    }

    #[tokio::test]
    async fn test_list_presets() {
        let (handle, _task, _launcher) = spawn();
        assert_eq!(
            handle.list_presets().await.unwrap(),
            vec!["default", "alternate", "christmas"]
        );
    }

    #[tokio::test]
    async fn test_shutdown_stops_worker() {
        let (handle, task, launcher) = spawn();
        handle.show("default").await.unwrap();

        let outcome = handle.shutdown().await.unwrap();
        task.await.unwrap();

        assert_eq!(outcome.message, "Closed 4 windows");
        assert_eq!(launcher.live_sessions(), 0);
        assert!(matches!(
            handle.show("default").await,
            Err(WallError::WorkerStopped)
        ));
    }

    #[tokio::test]
    async fn test_dropping_handles_tears_down() {
        let (handle, task, launcher) = spawn();
        handle.show("default").await.unwrap();

        drop(handle);
        task.await.unwrap();

        assert_eq!(launcher.live_sessions(), 0);
    }
}
