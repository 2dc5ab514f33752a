//! Bundled Asset Registry
//!
//! Desktop builds ship icons and sample audio next to the executable (or in
//! the per-user data directory). The registry hands out numeric handles for
//! those files and turns a handle back into a URI the audio engine can open.

use bridge_traits::asset::{AssetId, AssetResolver};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Registry of assets bundled with the application.
///
/// Handles start at 1; `0` is never issued and never resolves.
///
/// # Example
///
/// ```
/// use bridge_desktop::BundledAssetRegistry;
/// use bridge_traits::AssetResolver;
///
/// let registry = BundledAssetRegistry::new("/opt/player/assets");
/// let icon = registry.register("icons/play.png");
///
/// assert_eq!(
///     registry.resolve(icon).as_deref(),
///     Some("file:///opt/player/assets/icons/play.png")
/// );
/// ```
pub struct BundledAssetRegistry {
    root: PathBuf,
    dev_server: Option<String>,
    entries: RwLock<Vec<String>>,
}

impl BundledAssetRegistry {
    /// Registry rooted at `root`; assets are registered relative to it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dev_server: None,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Registry rooted at the per-user data directory of `app_name`.
    pub fn for_app(app_name: &str) -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".local")
                    .join("share")
            })
            .join(app_name)
            .join("assets");

        Self::new(data_dir)
    }

    /// Serve assets from a development server instead of the bundle root.
    ///
    /// Handles then resolve to `<server>/assets/<relative path>`.
    pub fn with_dev_server(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.dev_server = Some(url.trim_end_matches('/').to_string());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Register `relative_path` and return its handle.
    ///
    /// Registering the same path twice returns the same handle.
    pub fn register(&self, relative_path: impl AsRef<Path>) -> AssetId {
        let normalized = normalize(relative_path.as_ref());
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(index) = entries.iter().position(|entry| *entry == normalized) {
            return id_for_index(index);
        }

        entries.push(normalized);
        let id = id_for_index(entries.len() - 1);
        debug!(asset = %id, "Registered bundled asset");
        id
    }

    /// Relative path registered under `id`.
    pub fn path_of(&self, id: AssetId) -> Option<String> {
        let index = (id.get() as usize).checked_sub(1)?;
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(index)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn file_uri(&self, relative: &str) -> String {
        let absolute = normalize(&self.root.join(relative));
        if absolute.starts_with('/') {
            format!("file://{}", absolute)
        } else {
            // Windows drive paths: file:///C:/...
            format!("file:///{}", absolute)
        }
    }
}

impl AssetResolver for BundledAssetRegistry {
    fn resolve(&self, id: AssetId) -> Option<String> {
        let relative = self.path_of(id)?;
        Some(match &self.dev_server {
            Some(server) => format!("{}/assets/{}", server, relative),
            None => self.file_uri(&relative),
        })
    }
}

fn id_for_index(index: usize) -> AssetId {
    AssetId::new(index as u32 + 1)
}

fn normalize(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .trim_start_matches("./")
        .to_string()
}
