//! Narrow contract to the external level store
//!
//! The core only ever hands the store a complete document at publish time
//! and only ever receives a complete document when starting a level. It
//! performs no partial merges itself and never calls the store mid-run;
//! failures surface to the caller, with no retry logic here.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::level::LevelDocument;

/// Opaque identifier assigned by the store
pub type LevelId = String;

#[derive(Debug, Error, PartialEq)]
pub enum RepositoryError {
    #[error("level {0:?} not found")]
    NotFound(LevelId),
    #[error("level store unavailable: {0}")]
    Unavailable(String),
}

/// Browsing metadata for one stored level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSummary {
    pub id: LevelId,
    pub name: String,
    pub difficulty: u8,
    pub length: f32,
}

/// Metadata-only partial update; obstacle data is never patched in place
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelPatch {
    pub name: Option<String>,
    pub difficulty: Option<u8>,
    pub description: Option<String>,
}

/// Abstract level store the editor publishes to and the menus read from
pub trait LevelRepository {
    /// Store a complete document, returning its new id
    fn create(&mut self, document: &LevelDocument) -> Result<LevelId, RepositoryError>;
    /// Fetch a complete document; `None` when the id is unknown
    fn read(&self, id: &LevelId) -> Result<Option<LevelDocument>, RepositoryError>;
    /// Summaries of every stored level
    fn list(&self) -> Result<Vec<LevelSummary>, RepositoryError>;
    /// Patch descriptive metadata on an existing level
    fn update(&mut self, id: &LevelId, patch: &LevelPatch) -> Result<(), RepositoryError>;
}

/// In-memory store backing tests and the demo driver. The production
/// remote store lives outside this crate behind the same trait.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    levels: BTreeMap<LevelId, LevelDocument>,
    next_id: u64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LevelRepository for InMemoryRepository {
    fn create(&mut self, document: &LevelDocument) -> Result<LevelId, RepositoryError> {
        self.next_id += 1;
        let id = format!("level-{}", self.next_id);
        self.levels.insert(id.clone(), document.clone());
        log::info!("published {:?} as {id}", document.name);
        Ok(id)
    }

    fn read(&self, id: &LevelId) -> Result<Option<LevelDocument>, RepositoryError> {
        Ok(self.levels.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<LevelSummary>, RepositoryError> {
        Ok(self
            .levels
            .iter()
            .map(|(id, doc)| LevelSummary {
                id: id.clone(),
                name: doc.name.clone(),
                difficulty: doc.difficulty,
                length: doc.length,
            })
            .collect())
    }

    fn update(&mut self, id: &LevelId, patch: &LevelPatch) -> Result<(), RepositoryError> {
        let doc = self
            .levels
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))?;
        if let Some(name) = &patch.name {
            doc.name = name.clone();
        }
        if let Some(difficulty) = patch.difficulty {
            doc.difficulty = difficulty;
        }
        if let Some(description) = &patch.description {
            doc.description = description.clone();
        }
        Ok(())
    }
}
