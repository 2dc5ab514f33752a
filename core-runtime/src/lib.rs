//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the track player bridge:
//! - Logging and tracing infrastructure
//! - Configuration management
//! - Event bus system
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the player facade depends on.
//! It establishes the logging conventions, the validated configuration that
//! wires the native bridges together, and the event bus that carries native
//! player events to application listeners.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::{PlayerConfig, PlayerConfigBuilder};
pub use error::{Error, Result};
pub use events::{EventBus, EventEmitter, EventTransportKind, Subscription, SubscriptionId};
