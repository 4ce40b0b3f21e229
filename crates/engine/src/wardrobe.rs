//! Wardrobe collaborator.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::types::{Garment, OwnerId};

#[derive(Debug, Error)]
pub enum WardrobeError {
    /// Raised by sources backed by a remote store that cannot be reached.
    #[error("wardrobe unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read wardrobe {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse wardrobe {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Lists the garments an owner can wear.
#[async_trait]
pub trait WardrobeSource: Send + Sync {
    async fn list_garments(&self, owner: OwnerId) -> Result<Vec<Garment>, WardrobeError>;
}

/// Wardrobe held in memory, shared by every owner it contains.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWardrobe {
    garments: Vec<Garment>,
}

impl InMemoryWardrobe {
    pub fn new(garments: Vec<Garment>) -> Self {
        Self { garments }
    }

    pub fn len(&self) -> usize {
        self.garments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.garments.is_empty()
    }
}

#[async_trait]
impl WardrobeSource for InMemoryWardrobe {
    async fn list_garments(&self, owner: OwnerId) -> Result<Vec<Garment>, WardrobeError> {
        Ok(self
            .garments
            .iter()
            .filter(|g| g.owner == owner)
            .cloned()
            .collect())
    }
}

/// Wardrobe stored as a JSON array of garments.
///
/// The file is re-read on every call.
#[derive(Debug, Clone)]
pub struct JsonFileWardrobe {
    path: PathBuf,
}

impl JsonFileWardrobe {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl WardrobeSource for JsonFileWardrobe {
    async fn list_garments(&self, owner: OwnerId) -> Result<Vec<Garment>, WardrobeError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| WardrobeError::Io {
                path: self.path.clone(),
                source,
            })?;
        let all: Vec<Garment> =
            serde_json::from_str(&content).map_err(|source| WardrobeError::Parse {
                path: self.path.clone(),
                source,
            })?;
        let total = all.len();
        let owned: Vec<Garment> = all.into_iter().filter(|g| g.owner == owner).collect();
        debug!(
            target: "outfitter::wardrobe",
            path = %self.path.display(),
            total,
            owned = owned.len(),
            "Loaded wardrobe file"
        );
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{garment, OWNER};
    use crate::types::Category;
    use uuid::Uuid;

    #[tokio::test]
    async fn in_memory_filters_by_owner() {
        let stranger = OwnerId(Uuid::from_u128(7));
        let wardrobe = InMemoryWardrobe::new(vec![
            garment(Category::Top, "shirt", "white", "cotton", "casual"),
            Garment {
                owner: stranger,
                ..garment(Category::Bottom, "jeans", "navy", "denim", "casual")
            },
        ]);

        assert_eq!(wardrobe.len(), 2);
        assert_eq!(wardrobe.list_garments(OWNER).await.unwrap().len(), 1);
        assert_eq!(
            wardrobe.list_garments(stranger).await.unwrap()[0].category,
            Category::Bottom
        );
    }

    #[tokio::test]
    async fn json_file_round_trips_owned_garments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wardrobe.json");
        let items = vec![
            garment(Category::Dress, "", "beige", "linen", "romantic"),
            garment(Category::Shoes, "loafers", "brown", "leather", "formal"),
        ];
        std::fs::write(&path, serde_json::to_string(&items).unwrap()).unwrap();

        let wardrobe = JsonFileWardrobe::new(&path);
        let listed = wardrobe.list_garments(OWNER).await.unwrap();

        assert_eq!(listed, items);
        assert_eq!(wardrobe.path(), path.as_path());
    }

    #[tokio::test]
    async fn json_file_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = JsonFileWardrobe::new(dir.path().join("absent.json"));
        assert!(matches!(
            missing.list_garments(OWNER).await,
            Err(WardrobeError::Io { .. })
        ));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(
            JsonFileWardrobe::new(&bad).list_garments(OWNER).await,
            Err(WardrobeError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn unknown_category_is_rejected_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wardrobe.json");
        let json = format!(
            r#"[{{"id": "{}", "owner": "{}", "category": "cape"}}]"#,
            Uuid::new_v4(),
            OWNER
        );
        std::fs::write(&path, json).unwrap();

        let err = JsonFileWardrobe::new(&path)
            .list_garments(OWNER)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("unknown garment category"));
    }
}
