//! Integration tests for the event bus transports

use bridge_traits::event::{EventKind, PlayerEvent};
use bridge_traits::player::State;
use core_runtime::events::{EventBus, EventTransportKind};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

fn state_event(state: State) -> PlayerEvent {
    PlayerEvent::PlaybackState { state }
}

#[test]
fn test_direct_transport_preserves_emission_order() {
    let bus = EventBus::new(EventTransportKind::Direct, 0);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    bus.add_listener(EventKind::PlaybackState, move |event| {
        if let PlayerEvent::PlaybackState { state } = event {
            sink.lock().unwrap().push(*state);
        }
    })
    .unwrap();

    let emitter = bus.emitter();
    emitter.emit(state_event(State::Buffering));
    emitter.emit(state_event(State::Playing));
    emitter.emit(state_event(State::Paused));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![State::Buffering, State::Playing, State::Paused]
    );
}

#[test]
fn test_clones_share_listeners() {
    let bus = EventBus::direct();
    let clone = bus.clone();
    let subscription = clone.add_listener(EventKind::RemoteSeek, |_| {}).unwrap();

    assert_eq!(bus.listener_count(EventKind::RemoteSeek), 1);
    assert!(bus.remove_listener(subscription.id()));
    assert!(!subscription.remove());
}

#[tokio::test]
async fn test_broadcast_transport_delivers_payload() {
    let bus = EventBus::broadcast(16);
    let (tx, mut rx) = mpsc::unbounded_channel();

    bus.add_listener(EventKind::RemoteJumpForward, move |event| {
        let _ = tx.send(event.clone());
    })
    .unwrap();

    bus.emitter().emit(PlayerEvent::RemoteJumpBackward { interval: 5.0 });
    bus.emitter()
        .emit(PlayerEvent::RemoteJumpForward { interval: 15.0 });

    let received = timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("listener should be invoked")
        .expect("channel open");
    assert_eq!(received, PlayerEvent::RemoteJumpForward { interval: 15.0 });
}

#[tokio::test]
async fn test_broadcast_removed_listener_not_invoked() {
    let bus = EventBus::broadcast(16);
    let (kept_tx, mut kept_rx) = mpsc::unbounded_channel();
    let (removed_tx, mut removed_rx) = mpsc::unbounded_channel();

    bus.add_listener(EventKind::RemoteBookmark, move |_| {
        let _ = kept_tx.send(());
    })
    .unwrap();
    let removed = bus
        .add_listener(EventKind::RemoteBookmark, move |_| {
            let _ = removed_tx.send(());
        })
        .unwrap();

    assert!(removed.remove());
    bus.emitter().emit(PlayerEvent::RemoteBookmark);

    timeout(Duration::from_secs(1), kept_rx.recv())
        .await
        .expect("remaining listener should run")
        .expect("channel open");
    // The aborted task dropped its sender.
    let closed = timeout(Duration::from_secs(1), removed_rx.recv())
        .await
        .expect("aborted listener should release its sender");
    assert_eq!(closed, None);
}
