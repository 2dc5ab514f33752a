//! Asset References
//!
//! Locator fields (track url, artwork, notification icons) accept either a
//! plain URI string or an opaque handle to a resource packaged with the
//! application. Packaged handles only mean something to the host bundle, so
//! they are turned into a concrete URI through an [`AssetResolver`] before a
//! payload reaches the native player.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to a resource packaged with the application.
///
/// Handles are allocated by the host bundle starting at `1`; `0` never
/// identifies an asset and is treated as "no value".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub u32);

impl AssetId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset#{}", self.0)
    }
}

/// A locator value: packaged asset handle or URI string.
///
/// Serialized untagged, so a packaged handle travels as a number and a URI as
/// a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetSource {
    /// Resource packaged with the application.
    Bundled(AssetId),
    /// Remote URL, `file://` URI or platform-specific URI string.
    Uri(String),
}

impl AssetSource {
    pub fn uri(uri: impl Into<String>) -> Self {
        Self::Uri(uri.into())
    }

    pub fn bundled(id: u32) -> Self {
        Self::Bundled(AssetId(id))
    }

    /// `true` for values that carry no locator at all: an empty URI string
    /// or the zero handle.
    pub fn is_empty(&self) -> bool {
        match self {
            AssetSource::Uri(uri) => uri.is_empty(),
            AssetSource::Bundled(id) => id.0 == 0,
        }
    }

    pub fn as_uri(&self) -> Option<&str> {
        match self {
            AssetSource::Uri(uri) => Some(uri),
            AssetSource::Bundled(_) => None,
        }
    }

    pub fn is_bundled(&self) -> bool {
        matches!(self, AssetSource::Bundled(_))
    }
}

impl From<&str> for AssetSource {
    fn from(uri: &str) -> Self {
        Self::Uri(uri.to_string())
    }
}

impl From<String> for AssetSource {
    fn from(uri: String) -> Self {
        Self::Uri(uri)
    }
}

impl From<AssetId> for AssetSource {
    fn from(id: AssetId) -> Self {
        Self::Bundled(id)
    }
}

impl fmt::Display for AssetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetSource::Uri(uri) => f.write_str(uri),
            AssetSource::Bundled(id) => id.fmt(f),
        }
    }
}

/// Maps packaged asset handles to URIs the native player can open.
///
/// Lookups are synchronous and infallible: `None` means the handle is not
/// known to this bundle.
///
/// # Platform Notes
///
/// - **Desktop**: files under the application bundle directory, or a
///   development asset server
/// - **iOS / Android**: main bundle / APK resources, implemented by the host
pub trait AssetResolver: Send + Sync {
    /// Resolve a packaged asset handle to a URI.
    fn resolve(&self, id: AssetId) -> Option<String>;
}

/// Resolver that recognises no packaged assets.
///
/// Used when the host does not supply one; every packaged handle then passes
/// through to the native player unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAssetResolver;

impl AssetResolver for NoopAssetResolver {
    fn resolve(&self, _id: AssetId) -> Option<String> {
        None
    }
}
