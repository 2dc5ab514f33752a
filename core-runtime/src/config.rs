//! # Player Configuration Module
//!
//! Provides configuration management for the track player bridge.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `PlayerConfig` instance that holds the injected native playback authority,
//! the optional platform bridges and the event bus settings. It enforces
//! fail-fast validation so a missing authority is reported at startup rather
//! than on the first command.
//!
//! ## Required Dependencies
//!
//! - `NativePlayer` - the platform playback authority
//!
//! ## Optional Dependencies (with defaults)
//!
//! - `AssetResolver` - bundled asset lookup (default: recognises nothing)
//! - `HeadlessTaskRegistry` - headless service registration (default: none,
//!   the playback service is started in-process)
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::PlayerConfig;
//! use core_runtime::events::EventTransportKind;
//! use std::sync::Arc;
//!
//! let config = PlayerConfig::builder()
//!     .native_player(Arc::new(MyNativePlayer::new()))
//!     .asset_resolver(Arc::new(bundle_registry))
//!     .event_transport(EventTransportKind::Direct)
//!     .build()?;
//!
//! // Hand the write half of the bus to the native adapter.
//! native_adapter.attach(config.event_bus.emitter());
//! ```
//!
//! ## Error Handling
//!
//! ```should_panic
//! use core_runtime::config::PlayerConfig;
//!
//! // Panics with an actionable message: no native player was injected
//! let config = PlayerConfig::builder()
//!     .build()
//!     .expect("Should fail - missing native player");
//! ```

use crate::error::{Error, Result};
use crate::events::{EventBus, EventTransportKind, DEFAULT_EVENT_BUFFER_SIZE};
use bridge_traits::{AssetResolver, HeadlessTaskRegistry, NativePlayer, NoopAssetResolver};
use std::sync::Arc;

/// Name under which the playback service is registered by default.
pub const DEFAULT_SERVICE_TASK_NAME: &str = "TrackPlayer";

/// Upper bound for the broadcast listener backlog warning.
pub const MAX_EVENT_BUFFER_SIZE: usize = 10_000;

/// Validated configuration for the track player bridge.
///
/// Use [`PlayerConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct PlayerConfig {
    /// Platform playback authority (required)
    pub native_player: Arc<dyn NativePlayer>,

    /// Bundled asset lookup
    pub asset_resolver: Arc<dyn AssetResolver>,

    /// Headless task registry (optional)
    pub headless_registry: Option<Arc<dyn HeadlessTaskRegistry>>,

    /// Event bus shared by the native adapter and the facade
    pub event_bus: EventBus,

    /// Name used when registering the playback service
    pub service_task_name: String,
}

impl std::fmt::Debug for PlayerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerConfig")
            .field("native_player", &"NativePlayer { ... }")
            .field("asset_resolver", &"AssetResolver { ... }")
            .field(
                "headless_registry",
                &self
                    .headless_registry
                    .as_ref()
                    .map(|_| "HeadlessTaskRegistry { ... }"),
            )
            .field("event_bus", &self.event_bus)
            .field("service_task_name", &self.service_task_name)
            .finish()
    }
}

impl PlayerConfig {
    /// Creates a new builder for constructing a `PlayerConfig`.
    pub fn builder() -> PlayerConfigBuilder {
        PlayerConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        validate_task_name(&self.service_task_name)
    }
}

fn validate_task_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Config(
            "Service task name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_buffer_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(Error::Config(
            "Event buffer size must be greater than 0".to_string(),
        ));
    }

    if size > MAX_EVENT_BUFFER_SIZE {
        return Err(Error::Config(format!(
            "Event buffer size exceeds maximum of {} events",
            MAX_EVENT_BUFFER_SIZE
        )));
    }

    Ok(())
}

fn native_player_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "NativePlayer".to_string(),
        message: "NativePlayer implementation is required to issue playback commands. \
                 Android/iOS: inject the adapter wrapping the platform playback service. \
                 Desktop: inject an adapter over the local audio engine. \
                 Tests: inject a mock or recording fake."
            .to_string(),
    }
}

/// Builder for constructing [`PlayerConfig`] instances.
///
/// Call [`build()`](PlayerConfigBuilder::build) once every dependency is set.
#[derive(Default)]
pub struct PlayerConfigBuilder {
    native_player: Option<Arc<dyn NativePlayer>>,
    asset_resolver: Option<Arc<dyn AssetResolver>>,
    headless_registry: Option<Arc<dyn HeadlessTaskRegistry>>,
    event_transport: EventTransportKind,
    event_buffer_size: Option<usize>,
    service_task_name: Option<String>,
}

impl PlayerConfigBuilder {
    /// Sets the native playback authority (required).
    pub fn native_player(mut self, player: Arc<dyn NativePlayer>) -> Self {
        self.native_player = Some(player);
        self
    }

    /// Sets the bundled asset resolver.
    ///
    /// Without one, bundled references are forwarded to the native player
    /// unresolved.
    pub fn asset_resolver(mut self, resolver: Arc<dyn AssetResolver>) -> Self {
        self.asset_resolver = Some(resolver);
        self
    }

    /// Sets the platform's headless task registry.
    pub fn headless_registry(mut self, registry: Arc<dyn HeadlessTaskRegistry>) -> Self {
        self.headless_registry = Some(registry);
        self
    }

    /// Selects the event bus transport.
    ///
    /// Default: [`EventTransportKind::Broadcast`]
    pub fn event_transport(mut self, kind: EventTransportKind) -> Self {
        self.event_transport = kind;
        self
    }

    /// Sets the per-listener backlog at which the broadcast transport warns
    /// about a slow listener. Events are never dropped.
    ///
    /// Default: 100 events. Accepted range: 1 to 10,000.
    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    /// Sets the name the playback service is registered under.
    ///
    /// Default: `"TrackPlayer"`
    pub fn service_task_name(mut self, name: impl Into<String>) -> Self {
        self.service_task_name = Some(name.into());
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::CapabilityMissing`] when no native player was provided
    /// - [`Error::Config`] for an out-of-range buffer size or an empty task name
    pub fn build(self) -> Result<PlayerConfig> {
        let native_player = self.native_player.ok_or_else(native_player_missing_error)?;

        let event_buffer_size = self.event_buffer_size.unwrap_or(DEFAULT_EVENT_BUFFER_SIZE);
        validate_buffer_size(event_buffer_size)?;

        let asset_resolver = self
            .asset_resolver
            .unwrap_or_else(|| Arc::new(NoopAssetResolver));

        let config = PlayerConfig {
            native_player,
            asset_resolver,
            headless_registry: self.headless_registry,
            event_bus: EventBus::new(self.event_transport, event_buffer_size),
            service_task_name: self
                .service_task_name
                .unwrap_or_else(|| DEFAULT_SERVICE_TASK_NAME.to_string()),
        };

        config.validate()?;

        Ok(config)
    }
}
