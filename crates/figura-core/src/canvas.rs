//! Canvas document persistence.
//!
//! Shapes store point handles, so serializing the arena next to the container
//! keeps shared points shared across a save/load round trip.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::container::Container;
use crate::points::PointArena;

/// Document errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Shape references missing point slot {0}")]
    DanglingPoint(usize),
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        DocumentError::Serialization(err.to_string())
    }
}

/// A saved canvas: the committed container and the points it references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    pub points: PointArena,
    pub container: Container,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new(PointArena::new(), Container::default())
    }
}

impl CanvasDocument {
    pub fn new(points: PointArena, container: Container) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            points,
            container,
        }
    }

    /// Drop point slots nothing references and rewrite handles to match.
    pub fn compact(&mut self) {
        let reachable: Vec<_> = self.container.points().collect();
        let remap = self.points.compact(reachable);
        for shape in self
            .container
            .shapes
            .iter_mut()
            .chain(self.container.guides.iter_mut())
        {
            shape.remap_points(&remap);
        }
    }

    /// Check that every handle resolves to a slot in the arena.
    pub fn validate(&self) -> Result<(), DocumentError> {
        match self.container.points().find(|p| !self.points.contains(*p)) {
            Some(dangling) => Err(DocumentError::DanglingPoint(dangling.index())),
            None => Ok(()),
        }
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }
}
