//! Playback service registration.
//!
//! The playback service is the application's long-lived handler for remote
//! events (lock screen, headset, car). Platforms with a headless model start
//! it themselves; elsewhere it is started in-process right after
//! registration.

use crate::error::{PlayerError, Result};
use crate::player::TrackPlayer;
use bridge_traits::error::BridgeError;
use bridge_traits::headless::{ServiceFactory, ServiceFuture};
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

impl TrackPlayer {
    /// Register the factory producing the playback service.
    ///
    /// - With a headless registry configured the factory is declared under
    ///   the configured task name and the platform decides when to call it.
    /// - Otherwise the factory is called exactly once on a spawned task.
    ///   On a current-thread runtime it runs only after the registering task
    ///   yields. On a multi-thread runtime a worker may pick it up while the
    ///   caller is still running, so the only ordering guarantee there is
    ///   that the factory is not called inside this function.
    ///
    /// Never waits for the service itself.
    pub fn register_playback_service<F, Fut>(&self, factory: F) -> Result<()>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let factory: ServiceFactory = Arc::new(move || -> ServiceFuture { factory().boxed() });

        if let Some(registry) = self.headless.as_ref() {
            info!(task = %self.service_task_name, "Registering headless playback service");
            return registry
                .register_headless_task(&self.service_task_name, factory)
                .map_err(|err| {
                    warn!(error = %err, "Headless registration failed");
                    PlayerError::ServiceRegistration(err)
                });
        }

        let handle = Handle::try_current().map_err(|_| {
            PlayerError::ServiceRegistration(BridgeError::NotAvailable(
                "Starting the playback service in-process requires a Tokio runtime".to_string(),
            ))
        })?;

        debug!(task = %self.service_task_name, "Starting playback service in-process");
        handle.spawn(async move {
            // Give up one scheduler turn before starting the service.
            tokio::task::yield_now().await;
            factory().await;
        });
        Ok(())
    }
}
