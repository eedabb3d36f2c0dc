//! Read-only product source.
//!
//! The cart keeps only the flat line-item projection. Display data that the
//! projection does not carry (or that came back empty from storage) is
//! resolved here by id.

use std::collections::HashMap;
use std::path::Path;

use loft_core::{CatalogEntity, Category, ItemId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate catalog id: {0}")]
    DuplicateId(ItemId),
    #[error("negative price for catalog id {0}")]
    NegativePrice(ItemId),
}

/// Anything that can resolve an id to a catalog listing.
pub trait ProductSource {
    /// Returns `None` for ids the source does not know.
    fn lookup(&self, id: &ItemId) -> Option<CatalogEntity>;
}

/// In-memory catalog, in listing order.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entities: Vec<CatalogEntity>,
    index: HashMap<ItemId, usize>,
}

impl StaticCatalog {
    /// Build a catalog from listings.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two listings share an id and
    /// `CatalogError::NegativePrice` for a listing priced below zero.
    pub fn from_entities(entities: Vec<CatalogEntity>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(entities.len());
        for (position, entity) in entities.iter().enumerate() {
            if entity.unit_price.is_sign_negative() && !entity.unit_price.is_zero() {
                return Err(CatalogError::NegativePrice(entity.id.clone()));
            }
            if index.insert(entity.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(entity.id.clone()));
            }
        }
        Ok(Self { entities, index })
    }

    /// Parse a JSON array of listings.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` on malformed JSON, plus the errors of
    /// [`StaticCatalog::from_entities`].
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Self::from_entities(serde_json::from_str(json)?)
    }

    /// Load a JSON catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Read` if the file cannot be read, plus the
    /// errors of [`StaticCatalog::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The listings the storefront ships with.
    #[must_use]
    pub fn builtin() -> Self {
        let entities = vec![
            CatalogEntity::new("candle-cedar", "Cedar Candle", Decimal::new(2400, 2))
                .with_image("/images/shop/candle-cedar.jpg"),
            CatalogEntity::new("mug-stoneware", "Stoneware Mug", Decimal::new(1800, 2))
                .with_image("/images/shop/mug-stoneware.jpg"),
            CatalogEntity::new("tote-canvas", "Canvas Tote", Decimal::new(1500, 2))
                .with_image("/images/shop/tote-canvas.jpg"),
            CatalogEntity::new("room-studio-a", "Studio A (private)", Decimal::new(4000, 2))
                .with_image("/images/spaces/studio-a.jpg")
                .with_category(Category::Room)
                .with_duration_hours(1),
            CatalogEntity::new("room-loft", "The Loft (private)", Decimal::new(6500, 2))
                .with_image("/images/spaces/loft.jpg")
                .with_category(Category::Room)
                .with_duration_hours(2),
            CatalogEntity::new("class-wheel-intro", "Intro to the Wheel", Decimal::new(5500, 2))
                .with_image("/images/classes/wheel-intro.jpg")
                .with_category(Category::Class),
            CatalogEntity::new("class-glaze-lab", "Glaze Lab", Decimal::new(4500, 2))
                .with_image("/images/classes/glaze-lab.jpg")
                .with_category(Category::Class),
            CatalogEntity::new("membership-monthly", "Monthly Membership", Decimal::new(9000, 2))
                .with_image("/images/community/membership.jpg")
                .with_category(Category::Membership),
        ];
        let index = entities
            .iter()
            .enumerate()
            .map(|(position, entity)| (entity.id.clone(), position))
            .collect();
        Self { entities, index }
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&CatalogEntity> {
        self.index.get(id).and_then(|&i| self.entities.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntity> {
        self.entities.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl ProductSource for StaticCatalog {
    fn lookup(&self, id: &ItemId) -> Option<CatalogEntity> {
        self.get(id).cloned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_consistent() {
        let catalog = StaticCatalog::builtin();
        assert!(!catalog.is_empty());
        // Rebuilding through the validating constructor must succeed.
        let rebuilt = StaticCatalog::from_entities(catalog.iter().cloned().collect()).unwrap();
        assert_eq!(rebuilt.len(), catalog.len());
        assert!(catalog.iter().any(|e| e.category == Category::Room));
        assert!(catalog.iter().any(|e| e.category == Category::Class));
    }

    #[test]
    fn test_lookup() {
        let catalog = StaticCatalog::builtin();
        let room = catalog.lookup(&ItemId::new("room-studio-a")).unwrap();
        assert_eq!(room.duration_hours, Some(1));
        assert!(catalog.lookup(&ItemId::new("nope")).is_none());
    }

    #[test]
    fn test_from_json_str_preserves_order() {
        let json = r#"[
            {"id":"b","name":"B","unitPrice":"2"},
            {"id":"a","name":"A","unitPrice":1.5,"category":"class"}
        ]"#;
        let catalog = StaticCatalog::from_json_str(json).unwrap();
        let ids: Vec<_> = catalog.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(
            catalog.get(&ItemId::new("a")).unwrap().category,
            Category::Class
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[{"id":"a","name":"A","unitPrice":"1"},{"id":"a","name":"A2","unitPrice":"1"}]"#;
        assert!(matches!(
            StaticCatalog::from_json_str(json),
            Err(CatalogError::DuplicateId(id)) if id.as_str() == "a"
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let json = r#"[{"id":"a","name":"A","unitPrice":"-1"}]"#;
        assert!(matches!(
            StaticCatalog::from_json_str(json),
            Err(CatalogError::NegativePrice(_))
        ));
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = StaticCatalog::from_path(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
