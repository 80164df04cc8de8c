//! Cleanup of recipe image files orphaned by an update or delete.
//!
//! Uploads are handled outside this service; recipes only carry an
//! `image_url` of the form `recipes/<generated-filename>`. Removal must run
//! only after the database transaction that orphaned the file has committed,
//! and a failed removal is never fatal.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Asset root from ASSET_ROOT, defaulting to `assets/`.
    pub fn from_env() -> Self {
        let root = std::env::var("ASSET_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("assets"));
        Self::new(root)
    }

    /// Remove the file behind a replaced or deleted recipe's `image_url`.
    /// Callers must invoke this only after the owning transaction committed.
    pub async fn remove(&self, image_url: &str) {
        let Some(path) = self.resolve(image_url) else {
            tracing::warn!(image_url, "refusing to remove asset with no usable filename");
            return;
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed orphaned recipe image");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::error!(
                    error = %e,
                    path = %path.display(),
                    "failed to remove orphaned recipe image"
                );
            }
        }
    }

    /// Map an `image_url` to its on-disk path. Only the final filename
    /// component is honored, so stored URLs can never escape the recipes
    /// directory.
    fn resolve(&self, image_url: &str) -> Option<PathBuf> {
        let name = Path::new(image_url).file_name()?;
        Some(self.root.join("recipes").join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_joins_under_recipes_dir() {
        let store = AssetStore::new(PathBuf::from("/srv/assets"));
        assert_eq!(
            store.resolve("recipes/abc123.png"),
            Some(PathBuf::from("/srv/assets/recipes/abc123.png"))
        );
    }

    #[test]
    fn test_resolve_ignores_traversal_components() {
        let store = AssetStore::new(PathBuf::from("/srv/assets"));
        assert_eq!(
            store.resolve("../../etc/passwd"),
            Some(PathBuf::from("/srv/assets/recipes/passwd"))
        );
    }

    #[test]
    fn test_resolve_rejects_paths_without_filename() {
        let store = AssetStore::new(PathBuf::from("/srv/assets"));
        assert_eq!(store.resolve("recipes/.."), None);
        assert_eq!(store.resolve(""), None);
    }
}
