//! Headless Task Registry on Tokio
//!
//! Desktop has no OS-level headless execution model. This registry keeps the
//! declared playback service factories and lets the host start them on the
//! Tokio runtime when it decides the service should run (e.g. when a window
//! closes but playback continues from the tray).

use bridge_traits::{
    error::{BridgeError, Result},
    headless::{HeadlessTaskRegistry, ServiceFactory},
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Tokio-backed headless registry for desktop.
#[derive(Default)]
pub struct TokioHeadlessRegistry {
    factories: RwLock<HashMap<String, ServiceFactory>>,
    running: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl TokioHeadlessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn factory_for(&self, task_name: &str) -> Option<ServiceFactory> {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(task_name)
            .cloned()
    }

    fn running(&self) -> MutexGuard<'_, HashMap<String, JoinHandle<()>>> {
        self.running.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Names of all declared tasks, sorted.
    pub fn registered_tasks(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Invoke the factory declared under `task_name` on the current runtime.
    ///
    /// Starting a task that is still running is a no-op.
    pub fn start(&self, task_name: &str) -> Result<()> {
        let factory = self.factory_for(task_name).ok_or_else(|| {
            BridgeError::NotAvailable(format!("No headless task registered as '{}'", task_name))
        })?;

        let handle = Handle::try_current().map_err(|_| {
            BridgeError::NotAvailable("Headless tasks require a Tokio runtime".to_string())
        })?;

        let mut running = self.running();
        if running
            .get(task_name)
            .is_some_and(|task| !task.is_finished())
        {
            debug!(task = task_name, "Headless task already running");
            return Ok(());
        }

        info!(task = task_name, "Starting headless task");
        running.insert(task_name.to_string(), handle.spawn(factory()));
        Ok(())
    }

    /// Abort the running instance of `task_name`. Returns `false` if none was running.
    pub fn stop(&self, task_name: &str) -> bool {
        match self.running().remove(task_name) {
            Some(task) => {
                task.abort();
                info!(task = task_name, "Stopped headless task");
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self, task_name: &str) -> bool {
        self.running()
            .get(task_name)
            .is_some_and(|task| !task.is_finished())
    }
}

impl HeadlessTaskRegistry for TokioHeadlessRegistry {
    fn register_headless_task(&self, task_name: &str, factory: ServiceFactory) -> Result<()> {
        if task_name.is_empty() {
            return Err(BridgeError::OperationFailed(
                "Headless task name cannot be empty".to_string(),
            ));
        }

        let replaced = self
            .factories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(task_name.to_string(), factory)
            .is_some();

        debug!(task = task_name, replaced, "Registered headless task");
        Ok(())
    }
}

impl Drop for TokioHeadlessRegistry {
    fn drop(&mut self) {
        for (_, task) in self.running().drain() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::oneshot;

    fn counting_factory(count: Arc<AtomicUsize>) -> ServiceFactory {
        Arc::new(move || {
            let count = Arc::clone(&count);
            async move {
                count.fetch_add(1, Ordering::SeqCst);
                futures::future::pending::<()>().await;
            }
            .boxed()
        })
    }

    #[test]
    fn test_register_does_not_invoke_factory() {
        let registry = TokioHeadlessRegistry::new();
        let count = Arc::new(AtomicUsize::new(0));

        registry
            .register_headless_task("TrackPlayer", counting_factory(Arc::clone(&count)))
            .unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(registry.registered_tasks(), vec!["TrackPlayer".to_string()]);
    }

    #[test]
    fn test_register_rejects_empty_name() {
        let registry = TokioHeadlessRegistry::new();
        let result = registry.register_headless_task("", counting_factory(Arc::default()));
        assert!(matches!(result, Err(BridgeError::OperationFailed(_))));
    }

    #[test]
    fn test_start_requires_runtime() {
        let registry = TokioHeadlessRegistry::new();
        registry
            .register_headless_task("TrackPlayer", counting_factory(Arc::default()))
            .unwrap();

        assert!(matches!(
            registry.start("TrackPlayer"),
            Err(BridgeError::NotAvailable(_))
        ));
    }

    #[tokio::test]
    async fn test_start_unknown_task() {
        let registry = TokioHeadlessRegistry::new();
        assert!(matches!(
            registry.start("Missing"),
            Err(BridgeError::NotAvailable(_))
        ));
    }

    #[tokio::test]
    async fn test_start_runs_factory_once_while_running() {
        let registry = TokioHeadlessRegistry::new();
        let count = Arc::new(AtomicUsize::new(0));
        registry
            .register_headless_task("TrackPlayer", counting_factory(Arc::clone(&count)))
            .unwrap();

        registry.start("TrackPlayer").unwrap();
        registry.start("TrackPlayer").unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(registry.is_running("TrackPlayer"));

        assert!(registry.stop("TrackPlayer"));
        assert!(!registry.is_running("TrackPlayer"));
        assert!(!registry.stop("TrackPlayer"));
    }

    #[tokio::test]
    async fn test_finished_task_can_restart() {
        let registry = TokioHeadlessRegistry::new();
        let (tx, rx) = oneshot::channel::<()>();
        let tx = Arc::new(Mutex::new(Some(tx)));
        let runs = Arc::new(AtomicUsize::new(0));

        let inner_runs = Arc::clone(&runs);
        let factory: ServiceFactory = Arc::new(move || {
            inner_runs.fetch_add(1, Ordering::SeqCst);
            let tx = tx.lock().unwrap().take();
            async move {
                if let Some(tx) = tx {
                    let _ = tx.send(());
                }
            }
            .boxed()
        });
        registry.register_headless_task("Once", factory).unwrap();

        registry.start("Once").unwrap();
        rx.await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        registry.start("Once").unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }
}
