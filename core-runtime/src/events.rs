//! # Event Bus System
//!
//! Redistributes [`PlayerEvent`]s emitted by the native player to any number
//! of application listeners.
//!
//! ## Overview
//!
//! The event bus system consists of:
//! - **EventBus**: the process-wide bus, one of two transports chosen at
//!   construction
//! - **EventEmitter**: the write half, handed to the native adapter
//! - **Subscription**: handle returned for each listener, used to unsubscribe
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   emit    ┌─────────────────────┐   callback   ┌──────────┐
//! │ Native player├──────────>│ EventBus            ├─────────────>│ Listener │
//! │ (EventEmitter│           │  Broadcast | Direct │              └──────────┘
//! └──────────────┘           │                     │   callback   ┌──────────┐
//!                            │                     ├─────────────>│ Listener │
//!                            └─────────────────────┘              └──────────┘
//! ```
//!
//! ## Transports
//!
//! - **Broadcast**: fan-out over one unbounded `tokio::sync::mpsc` channel per
//!   listener, each drained by its own task. Emitting never waits on
//!   listeners and never drops an event. A listener whose backlog reaches the
//!   configured buffer size logs a warning.
//! - **Direct**: in-process registry. Callbacks run on the emitting thread,
//!   before `emit` returns. Suited to hosts that deliver native events on
//!   their own thread without an async runtime.
//!
//! Call sites never branch on the transport; both expose the same
//! subscribe/unsubscribe/emit contract.
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::EventBus;
//! use bridge_traits::event::{EventKind, PlayerEvent};
//!
//! let bus = EventBus::direct();
//! let subscription = bus
//!     .add_listener(EventKind::RemotePlay, |event| println!("{:?}", event))
//!     .unwrap();
//!
//! bus.emitter().emit(PlayerEvent::RemotePlay);
//! subscription.remove();
//! ```
//!
//! ## Listener Failures
//!
//! A panicking listener is caught and logged; the remaining listeners for the
//! same event still run and the bus keeps working.

use bridge_traits::event::{EventKind, PlayerEvent};
use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Default backlog at which a broadcast listener is reported as slow.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

/// Callback invoked for each matching event.
pub type Listener = Arc<dyn Fn(&PlayerEvent) + Send + Sync>;

/// Transport variant backing an [`EventBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventTransportKind {
    /// Channel-based delivery on the async runtime.
    #[default]
    Broadcast,
    /// Synchronous delivery on the emitting thread.
    Direct,
}

/// Identifier of a single listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Process-wide bus carrying native player events to listeners.
///
/// Cloning is cheap; all clones share the same listeners.
#[derive(Clone)]
pub enum EventBus {
    Broadcast(BroadcastTransport),
    Direct(DirectTransport),
}

impl EventBus {
    /// Creates a bus backed by the requested transport.
    ///
    /// `capacity` is the per-listener backlog at which the broadcast transport
    /// starts warning. It is ignored by [`EventTransportKind::Direct`].
    pub fn new(kind: EventTransportKind, capacity: usize) -> Self {
        match kind {
            EventTransportKind::Broadcast => Self::Broadcast(BroadcastTransport::new(capacity)),
            EventTransportKind::Direct => Self::Direct(DirectTransport::new()),
        }
    }

    /// Broadcast bus warning once a listener is `capacity` events behind.
    pub fn broadcast(capacity: usize) -> Self {
        Self::new(EventTransportKind::Broadcast, capacity)
    }

    /// Direct (synchronous) bus.
    pub fn direct() -> Self {
        Self::new(EventTransportKind::Direct, 0)
    }

    pub fn kind(&self) -> EventTransportKind {
        match self {
            EventBus::Broadcast(_) => EventTransportKind::Broadcast,
            EventBus::Direct(_) => EventTransportKind::Direct,
        }
    }

    /// Write half of the bus, for the native adapter.
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter { bus: self.clone() }
    }

    /// Attaches `callback` to every future occurrence of `kind`.
    ///
    /// Events emitted before this call are not replayed.
    ///
    /// # Errors
    ///
    /// The broadcast transport drives listeners on the Tokio runtime and
    /// returns [`Error::CapabilityMissing`] when called outside of one.
    pub fn add_listener<F>(&self, kind: EventKind, callback: F) -> Result<Subscription>
    where
        F: Fn(&PlayerEvent) + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(callback);
        let id = match self {
            EventBus::Broadcast(transport) => transport.add_listener(kind, listener)?,
            EventBus::Direct(transport) => transport.add_listener(kind, listener),
        };

        debug!(event = %kind, subscription = %id, "Listener registered");

        Ok(Subscription {
            id,
            kind,
            bus: self.clone(),
        })
    }

    /// Detaches a listener. Returns `false` when it was already removed.
    pub fn remove_listener(&self, id: SubscriptionId) -> bool {
        let removed = match self {
            EventBus::Broadcast(transport) => transport.remove_listener(id),
            EventBus::Direct(transport) => transport.remove_listener(id),
        };
        if removed {
            debug!(subscription = %id, "Listener removed");
        }
        removed
    }

    /// Number of live listeners for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        match self {
            EventBus::Broadcast(transport) => transport.listener_count(kind),
            EventBus::Direct(transport) => transport.listener_count(kind),
        }
    }

    fn emit(&self, event: PlayerEvent) -> usize {
        match self {
            EventBus::Broadcast(transport) => transport.emit(event),
            EventBus::Direct(transport) => transport.emit(event),
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("kind", &self.kind())
            .finish()
    }
}

/// Write half of an [`EventBus`].
///
/// Only the native adapter holds one; application code and the player facade
/// only subscribe.
#[derive(Clone, Debug)]
pub struct EventEmitter {
    bus: EventBus,
}

impl EventEmitter {
    /// Publishes an event as received; nothing is merged or filtered.
    ///
    /// Returns how many listeners of the event's kind were reached: queued
    /// for (broadcast) or invoked (direct). Zero means nobody was listening.
    pub fn emit(&self, event: PlayerEvent) -> usize {
        self.bus.emit(event)
    }
}

/// Handle to one listener registration.
///
/// Dropping the handle keeps the listener attached; call
/// [`remove`](Subscription::remove) to detach it.
pub struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    bus: EventBus,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Detaches the listener; later emissions no longer reach it.
    pub fn remove(self) -> bool {
        self.bus.remove_listener(self.id)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

fn invoke(listener: &Listener, event: &PlayerEvent) -> bool {
    match catch_unwind(AssertUnwindSafe(|| listener(event))) {
        Ok(()) => true,
        Err(_) => {
            warn!(event = %event.kind(), "Event listener panicked");
            false
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Broadcast Transport
// ============================================================================

struct ListenerTask {
    kind: EventKind,
    sender: mpsc::UnboundedSender<PlayerEvent>,
    pending: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

/// Channel transport: one unbounded queue and one task per listener.
#[derive(Clone)]
pub struct BroadcastTransport {
    backlog_warning: usize,
    listeners: Arc<Mutex<HashMap<SubscriptionId, ListenerTask>>>,
}

impl BroadcastTransport {
    pub fn new(capacity: usize) -> Self {
        Self {
            backlog_warning: capacity.max(1),
            listeners: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn add_listener(&self, kind: EventKind, listener: Listener) -> Result<SubscriptionId> {
        let handle = Handle::try_current().map_err(|_| Error::CapabilityMissing {
            capability: "Tokio runtime".to_string(),
            message: "The broadcast event transport delivers events on the async runtime. \
                      Register listeners from within a runtime or use the direct transport."
                .to_string(),
        })?;

        let (sender, mut receiver) = mpsc::unbounded_channel::<PlayerEvent>();
        let pending = Arc::new(AtomicUsize::new(0));
        let id = SubscriptionId::new();

        let drained = Arc::clone(&pending);
        let task = handle.spawn(async move {
            while let Some(event) = receiver.recv().await {
                invoke(&listener, &event);
                drained.fetch_sub(1, Ordering::Relaxed);
            }
        });

        lock(&self.listeners).insert(
            id,
            ListenerTask {
                kind,
                sender,
                pending,
                task,
            },
        );
        Ok(id)
    }

    fn remove_listener(&self, id: SubscriptionId) -> bool {
        match lock(&self.listeners).remove(&id) {
            Some(entry) => {
                entry.task.abort();
                true
            }
            None => false,
        }
    }

    fn listener_count(&self, kind: EventKind) -> usize {
        lock(&self.listeners)
            .values()
            .filter(|entry| entry.kind == kind)
            .count()
    }

    fn emit(&self, event: PlayerEvent) -> usize {
        let kind = event.kind();
        let listeners = lock(&self.listeners);
        let mut delivered = 0;

        for (id, entry) in listeners.iter().filter(|(_, entry)| entry.kind == kind) {
            entry.pending.fetch_add(1, Ordering::Relaxed);
            if entry.sender.send(event.clone()).is_err() {
                entry.pending.fetch_sub(1, Ordering::Relaxed);
                continue;
            }
            delivered += 1;

            let backlog = entry.pending.load(Ordering::Relaxed);
            if backlog == self.backlog_warning {
                warn!(event = %kind, subscription = %id, backlog, "Event listener falling behind");
            }
        }
        delivered
    }
}

// ============================================================================
// Direct Transport
// ============================================================================

type Registry = HashMap<EventKind, Vec<(SubscriptionId, Listener)>>;

/// Synchronous transport: callbacks run inside `emit`.
#[derive(Clone, Default)]
pub struct DirectTransport {
    listeners: Arc<Mutex<Registry>>,
}

impl DirectTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_listener(&self, kind: EventKind, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId::new();
        lock(&self.listeners)
            .entry(kind)
            .or_default()
            .push((id, listener));
        id
    }

    fn remove_listener(&self, id: SubscriptionId) -> bool {
        let mut registry = lock(&self.listeners);
        for listeners in registry.values_mut() {
            if let Some(position) = listeners.iter().position(|(entry, _)| *entry == id) {
                listeners.remove(position);
                return true;
            }
        }
        false
    }

    fn listener_count(&self, kind: EventKind) -> usize {
        lock(&self.listeners).get(&kind).map_or(0, Vec::len)
    }

    fn emit(&self, event: PlayerEvent) -> usize {
        // Snapshot, then release the lock: listeners may (un)subscribe from
        // inside their callback.
        let listeners: Vec<Listener> = lock(&self.listeners)
            .get(&event.kind())
            .map(|entries| entries.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default();

        for listener in &listeners {
            invoke(listener, &event);
        }
        listeners.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
