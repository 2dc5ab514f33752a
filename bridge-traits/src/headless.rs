//! Headless Execution
//!
//! Some platforms can run a registered handler outside the normal foreground
//! lifecycle (Android headless JS tasks, iOS background audio sessions). The
//! host exposes that mechanism through [`HeadlessTaskRegistry`]; the core
//! only registers a named factory and never decides when it runs.

use futures::future::BoxFuture;
use std::sync::Arc;

use crate::error::Result;

/// Long-lived playback service future produced by a [`ServiceFactory`].
pub type ServiceFuture = BoxFuture<'static, ()>;

/// Zero-argument factory producing the playback service.
///
/// A platform with a headless model may call it more than once over the
/// process lifetime (e.g. after the service was killed and restarted).
pub type ServiceFactory = Arc<dyn Fn() -> ServiceFuture + Send + Sync>;

/// Platform registry for handlers that run without a foreground UI.
///
/// # Platform Notes
///
/// - **Android**: headless task registered with the app registry
/// - **iOS**: background audio service entry point
/// - **Desktop**: no headless model; hosts leave this unset
pub trait HeadlessTaskRegistry: Send + Sync {
    /// Declare `factory` under `task_name`. Must not invoke the factory.
    fn register_headless_task(&self, task_name: &str, factory: ServiceFactory) -> Result<()>;
}
