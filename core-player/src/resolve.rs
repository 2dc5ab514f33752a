//! Asset resolution applied to every payload before it crosses the boundary.
//!
//! Resolution never fails. Empty locators are dropped, URIs pass through,
//! and bundled handles are swapped for the URI the resolver knows them by.
//! A handle the resolver does not recognise is forwarded as-is so the native
//! side can still try its own lookup.

use bridge_traits::asset::{AssetResolver, AssetSource};
use bridge_traits::player::{MetadataOptions, NowPlayingMetadata, Track, TrackMetadataUpdate};
use tracing::trace;

/// Resolve a single locator.
///
/// | input                     | output                    |
/// |---------------------------|---------------------------|
/// | `None`, `""`, bundled `0` | `None`                    |
/// | URI string                | same URI                  |
/// | known bundled handle      | resolved URI              |
/// | unknown bundled handle    | same handle               |
pub fn resolve_asset(
    resolver: &dyn AssetResolver,
    source: Option<&AssetSource>,
) -> Option<AssetSource> {
    let source = source.filter(|source| !source.is_empty())?;

    match source {
        AssetSource::Uri(_) => Some(source.clone()),
        AssetSource::Bundled(id) => match resolver.resolve(*id) {
            Some(uri) => {
                trace!(asset = %id, "Resolved bundled asset");
                Some(AssetSource::Uri(uri))
            }
            None => {
                trace!(asset = %id, "Bundled asset not recognised, forwarding handle");
                Some(source.clone())
            }
        },
    }
}

fn resolve_slot(resolver: &dyn AssetResolver, slot: &mut Option<AssetSource>) {
    *slot = resolve_asset(resolver, slot.as_ref());
}

/// Copy of `track` with `url` and `artwork` resolved.
pub fn resolve_track(resolver: &dyn AssetResolver, track: &Track) -> Track {
    let mut resolved = track.clone();
    resolve_slot(resolver, &mut resolved.url);
    resolve_slot(resolver, &mut resolved.artwork);
    resolved
}

/// Copy of `options` with every icon field resolved independently.
pub fn resolve_options(resolver: &dyn AssetResolver, options: &MetadataOptions) -> MetadataOptions {
    let mut resolved = options.clone();
    for icon in resolved.icons_mut() {
        resolve_slot(resolver, icon);
    }
    resolved
}

pub fn resolve_track_metadata(
    resolver: &dyn AssetResolver,
    metadata: &TrackMetadataUpdate,
) -> TrackMetadataUpdate {
    let mut resolved = metadata.clone();
    resolve_slot(resolver, &mut resolved.artwork);
    resolved
}

pub fn resolve_now_playing(
    resolver: &dyn AssetResolver,
    metadata: &NowPlayingMetadata,
) -> NowPlayingMetadata {
    let mut resolved = metadata.clone();
    resolve_slot(resolver, &mut resolved.artwork);
    resolved
}
