//! Options and metadata updates: every icon and artwork field is resolved
//! in a copy before it reaches the native player.

mod support;

use bridge_desktop::BundledAssetRegistry;
use core_player::{
    AssetSource, BridgeError, Capability, MetadataOptions, NowPlayingMetadata, PlayerError,
    RatingType, TrackMetadataUpdate,
};
use serde_json::json;
use std::sync::Arc;
use support::{player_with, player_with_assets, Call, RecordingPlayer};

#[tokio::test]
async fn test_update_options_default_issues_single_call() {
    let native = RecordingPlayer::new();
    let player = player_with(native.clone());

    player
        .update_options(&MetadataOptions::default())
        .await
        .unwrap();

    let calls = native.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        Call::UpdateOptions(sent) => {
            assert!(sent.icons().iter().all(|icon| icon.is_none()));
        }
        other => panic!("unexpected call {:?}", other),
    }
}

#[tokio::test]
async fn test_update_options_resolves_each_icon() {
    let registry = Arc::new(
        BundledAssetRegistry::new("/bundle").with_dev_server("http://localhost:8081"),
    );
    let play = registry.register("icons/play.png");
    let pause = registry.register("icons/pause.png");
    let native = RecordingPlayer::new();
    let player = player_with_assets(native.clone(), registry);

    let options = MetadataOptions {
        rating_type: Some(RatingType::Heart),
        capabilities: Some(vec![Capability::Play, Capability::Pause]),
        color: Some(0xFF00_00FF),
        play_icon: Some(play.into()),
        pause_icon: Some(pause.into()),
        stop_icon: Some(AssetSource::bundled(0)),
        next_icon: Some(AssetSource::uri("https://cdn.example.com/next.png")),
        rewind_icon: Some(AssetSource::bundled(99)),
        ..Default::default()
    };
    let before = options.clone();

    player.update_options(&options).await.unwrap();
    assert_eq!(options, before);

    match &native.calls()[0] {
        Call::UpdateOptions(sent) => {
            assert_eq!(
                sent.play_icon,
                Some(AssetSource::uri("http://localhost:8081/assets/icons/play.png"))
            );
            assert_eq!(
                sent.pause_icon,
                Some(AssetSource::uri("http://localhost:8081/assets/icons/pause.png"))
            );
            assert_eq!(sent.stop_icon, None);
            assert_eq!(sent.next_icon, before.next_icon);
            assert_eq!(sent.rewind_icon, Some(AssetSource::bundled(99)));
            assert_eq!(sent.icon, None);
            assert_eq!(sent.rating_type, before.rating_type);
            assert_eq!(sent.capabilities, before.capabilities);
            assert_eq!(sent.color, before.color);
        }
        other => panic!("unexpected call {:?}", other),
    }
}

#[tokio::test]
async fn test_update_metadata_for_track() {
    let registry = Arc::new(BundledAssetRegistry::new("/bundle"));
    let cover = registry.register("covers/live.jpg");
    let native = RecordingPlayer::new();
    let player = player_with_assets(native.clone(), registry);

    let update = TrackMetadataUpdate {
        title: Some("Live at Home".to_string()),
        artwork: Some(cover.into()),
        duration: Some(215.0),
        ..Default::default()
    };

    player.update_metadata_for_track(2, &update).await.unwrap();

    let expected = TrackMetadataUpdate {
        artwork: Some(AssetSource::uri("file:///bundle/covers/live.jpg")),
        ..update.clone()
    };
    assert_eq!(native.calls(), vec![Call::UpdateMetadataForTrack(2, expected)]);
    assert_eq!(update.artwork, Some(cover.into()));
}

#[tokio::test]
async fn test_now_playing_metadata() {
    let native = RecordingPlayer::new();
    let player = player_with(native.clone());

    let metadata = NowPlayingMetadata {
        title: Some("Radio One".to_string()),
        artwork: Some(AssetSource::uri("")),
        elapsed_time: Some(12.0),
        ..Default::default()
    };

    player.update_now_playing_metadata(&metadata).await.unwrap();
    player.clear_now_playing_metadata().await.unwrap();

    assert_eq!(
        native.calls(),
        vec![
            Call::UpdateNowPlayingMetadata(NowPlayingMetadata {
                artwork: None,
                ..metadata
            }),
            Call::ClearNowPlayingMetadata,
        ]
    );
}

#[tokio::test]
async fn test_metadata_failures_map_to_command_error() {
    let native = RecordingPlayer::new();
    let unavailable = BridgeError::NotAvailable("media session not created".to_string());
    native.fail_with("update_options", unavailable.clone());
    native.fail_with("update_metadata_for_track", unavailable.clone());
    native.fail_with("clear_now_playing_metadata", unavailable.clone());
    let player = player_with(native.clone());

    assert_eq!(
        player.update_options(&MetadataOptions::default()).await,
        Err(PlayerError::Command(unavailable.clone()))
    );
    assert_eq!(
        player
            .update_metadata_for_track(0, &TrackMetadataUpdate::default())
            .await,
        Err(PlayerError::Command(unavailable.clone()))
    );
    assert_eq!(
        player.clear_now_playing_metadata().await,
        Err(PlayerError::Command(unavailable))
    );
}

#[tokio::test]
async fn test_now_playing_payload_serializes_resolved_uri() {
    let registry = Arc::new(BundledAssetRegistry::new("/bundle"));
    let cover = registry.register("art/cover.png");
    let native = RecordingPlayer::new();
    let player = player_with_assets(native.clone(), registry);

    let metadata = NowPlayingMetadata {
        title: Some("Live Set".to_string()),
        artwork: Some(cover.into()),
        elapsed_time: Some(12.5),
        ..Default::default()
    };
    player.update_now_playing_metadata(&metadata).await.unwrap();

    match &native.calls()[0] {
        Call::UpdateNowPlayingMetadata(sent) => assert_eq!(
            serde_json::to_value(sent).unwrap(),
            json!({
                "title": "Live Set",
                "artwork": "file:///bundle/art/cover.png",
                "elapsedTime": 12.5
            })
        ),
        other => panic!("unexpected call {:?}", other),
    }
}
