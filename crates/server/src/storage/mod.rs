//! Single-collection puzzle store.

mod datafile;

use std::path::Path;

use chrono::Utc;
use shared::{NewPuzzle, PuzzleDocument, PuzzleId};
use tokio::sync::Mutex;

use crate::error::StoreError;
use datafile::Datafile;

struct Inner {
    docs: Vec<PuzzleDocument>,
    datafile: Option<Datafile>,
}

/// Puzzle documents in insertion order, optionally backed by a datafile.
///
/// Each mutation is written to the datafile before it is applied in memory,
/// so a failed write leaves the store unchanged.
pub struct PuzzleStore {
    inner: Mutex<Inner>,
}

impl PuzzleStore {
    pub fn in_memory() -> Self {
        Self {
            inner: Mutex::new(Inner {
                docs: Vec::new(),
                datafile: None,
            }),
        }
    }

    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let (datafile, docs) = Datafile::open(path).await?;
        Ok(Self {
            inner: Mutex::new(Inner {
                docs,
                datafile: Some(datafile),
            }),
        })
    }

    /// Store holding `docs` whose every write fails
    #[cfg(test)]
    pub(crate) async fn unwritable(docs: Vec<PuzzleDocument>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: Mutex::new(Inner {
                docs,
                datafile: Some(Datafile::unwritable().await?),
            }),
        })
    }

    pub async fn insert(&self, new: NewPuzzle) -> Result<PuzzleDocument, StoreError> {
        let id = PuzzleId::new(uuid::Uuid::new_v4().simple().to_string());
        let doc = new.into_document(id, Utc::now());

        let mut inner = self.inner.lock().await;
        if let Some(datafile) = inner.datafile.as_mut() {
            datafile.append_document(&doc).await?;
        }
        inner.docs.push(doc.clone());

        tracing::info!("Saved puzzle {} ({:?})", doc.id, doc.title);
        Ok(doc)
    }

    pub async fn find_all(&self) -> Vec<PuzzleDocument> {
        self.inner.lock().await.docs.clone()
    }

    pub async fn find_one(&self, id: &PuzzleId) -> Option<PuzzleDocument> {
        let inner = self.inner.lock().await;
        inner.docs.iter().find(|d| &d.id == id).cloned()
    }

    /// Add one bookmark. Returns how many documents matched (0 or 1).
    pub async fn increment_bookmarks(&self, id: &PuzzleId) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().await;
        let Inner { docs, datafile } = &mut *inner;

        let Some(doc) = docs.iter_mut().find(|d| &d.id == id) else {
            return Ok(0);
        };

        let mut updated = doc.clone();
        updated.bookmarks += 1;
        if let Some(datafile) = datafile.as_mut() {
            datafile.append_document(&updated).await?;
        }
        *doc = updated;

        Ok(1)
    }

    /// Remove a document. Returns how many were removed (0 or 1).
    pub async fn remove(&self, id: &PuzzleId) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(index) = inner.docs.iter().position(|d| &d.id == id) else {
            return Ok(0);
        };

        if let Some(datafile) = inner.datafile.as_mut() {
            datafile.append_tombstone(id).await?;
        }
        inner.docs.remove(index);

        tracing::info!("Deleted puzzle {}", id);
        Ok(1)
    }

    pub async fn count(&self) -> u64 {
        self.inner.lock().await.docs.len() as u64
    }
}
