use std::collections::HashMap;
use thiserror::Error;
use validator::Validate;

use super::melon::Melon;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Melon not found: {id}")]
    NotFound { id: String },
    #[error("Duplicate melon id in catalog: {id}")]
    DuplicateId { id: String },
    #[error("Catalog line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// The fixed, ordered set of melons on sale.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    melons: Vec<Melon>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting invalid records and duplicate ids.
    pub fn new(melons: Vec<Melon>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(melons.len());
        for (position, melon) in melons.iter().enumerate() {
            melon
                .validate()
                .map_err(|e| CatalogError::Validation(format!("melon '{}': {}", melon.id, e)))?;
            if index.insert(melon.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId {
                    id: melon.id.clone(),
                });
            }
        }
        Ok(Self { melons, index })
    }

    pub fn list_all(&self) -> &[Melon] {
        &self.melons
    }

    pub fn get_by_id(&self, id: &str) -> Result<&Melon, CatalogError> {
        self.index
            .get(id)
            .map(|&position| &self.melons[position])
            .ok_or_else(|| CatalogError::NotFound { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.melons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.melons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::price::Price;

    fn sample() -> Catalog {
        Catalog::new(vec![
            Melon::new("m1", "musk", "Musk Melon", Price::from_cents(500)),
            Melon::new("m2", "hdew", "Honeydew", Price::from_cents(350)),
        ])
        .unwrap()
    }

    #[test]
    fn test_get_by_id_returns_every_item() {
        let catalog = sample();
        for melon in catalog.list_all() {
            assert_eq!(catalog.get_by_id(&melon.id).unwrap(), melon);
        }
    }

    #[test]
    fn test_get_by_id_not_found() {
        let catalog = sample();
        let err = catalog.get_by_id("bogus").unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { ref id } if id == "bogus"));
    }

    #[test]
    fn test_list_all_keeps_order() {
        let ids: Vec<_> = sample().list_all().iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::new(vec![
            Melon::new("m1", "musk", "Musk Melon", Price::from_cents(500)),
            Melon::new("m1", "musk", "Other Musk", Price::from_cents(600)),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId { ref id }) if id == "m1"));
    }

    #[test]
    fn test_invalid_melon_rejected() {
        let result = Catalog::new(vec![Melon::new("", "musk", "Musk Melon", Price::ZERO)]);
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }
}
