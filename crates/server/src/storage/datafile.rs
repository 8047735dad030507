//! Append-only JSON-lines datafile.
//!
//! Every insert or update appends the full document, every delete appends a
//! tombstone. Loading replays the log (last write wins) and compacts the file
//! down to one line per live document.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::{PuzzleDocument, PuzzleId};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::error::StoreError;

/// Fraction of unreadable lines tolerated on load
pub const CORRUPT_ALERT_THRESHOLD: f64 = 0.1;

#[derive(Debug, Serialize, Deserialize)]
struct Tombstone {
    #[serde(rename = "$$deleted")]
    deleted: bool,
    #[serde(rename = "_id")]
    id: PuzzleId,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Line {
    Tombstone(Tombstone),
    Document(PuzzleDocument),
}

/// Replay datafile contents into the live document list, in insertion order
pub fn replay(contents: &str, corrupt_threshold: f64) -> Result<Vec<PuzzleDocument>, StoreError> {
    let mut docs: Vec<PuzzleDocument> = Vec::new();
    let mut total = 0;
    let mut corrupt = 0;

    for raw in contents.lines() {
        if raw.trim().is_empty() {
            continue;
        }
        total += 1;

        match serde_json::from_str::<Line>(raw) {
            Ok(Line::Tombstone(t)) if t.deleted => docs.retain(|d| d.id != t.id),
            Ok(Line::Tombstone(_)) => {}
            Ok(Line::Document(doc)) => match docs.iter_mut().find(|d| d.id == doc.id) {
                Some(existing) => *existing = doc,
                None => docs.push(doc),
            },
            Err(e) => {
                corrupt += 1;
                tracing::warn!("Skipping unreadable datafile line {}: {}", total, e);
            }
        }
    }

    if total > 0 && corrupt as f64 / total as f64 > corrupt_threshold {
        return Err(StoreError::Corrupt { corrupt, total });
    }

    Ok(docs)
}

fn encode_documents(docs: &[PuzzleDocument]) -> Result<String, StoreError> {
    let mut out = String::new();
    for doc in docs {
        out.push_str(&serde_json::to_string(doc)?);
        out.push('\n');
    }
    Ok(out)
}

pub struct Datafile {
    file: File,
}

impl Datafile {
    /// Load `path` (creating it if missing), compact it and open it for appending
    pub async fn open(path: impl AsRef<Path>) -> Result<(Self, Vec<PuzzleDocument>), StoreError> {
        let path = path.as_ref().to_path_buf();

        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        let docs = replay(&contents, CORRUPT_ALERT_THRESHOLD)?;

        let mut tmp = path.clone().into_os_string();
        tmp.push("~");
        let tmp = PathBuf::from(tmp);
        let mut compacted = File::create(&tmp).await?;
        compacted.write_all(encode_documents(&docs)?.as_bytes()).await?;
        compacted.flush().await?;
        compacted.sync_all().await?;
        drop(compacted);
        fs::rename(&tmp, &path).await?;

        let file = OpenOptions::new().create(true).append(true).open(&path).await?;
        tracing::info!("Loaded {} puzzles from {}", docs.len(), path.display());

        Ok((Self { file }, docs))
    }

    pub async fn append_document(&mut self, doc: &PuzzleDocument) -> Result<(), StoreError> {
        let line = serde_json::to_string(doc)?;
        self.append_line(line).await
    }

    pub async fn append_tombstone(&mut self, id: &PuzzleId) -> Result<(), StoreError> {
        let line = serde_json::to_string(&Tombstone {
            deleted: true,
            id: id.clone(),
        })?;
        self.append_line(line).await
    }

    /// Append one line. On failure the file is cut back to its previous
    /// length so a half-written line never precedes the next append.
    async fn append_line(&mut self, mut line: String) -> Result<(), StoreError> {
        line.push('\n');
        let end = self.file.metadata().await?.len();
        if let Err(e) = self.write_synced(line.as_bytes()).await {
            self.truncate_to(end).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn write_synced(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.file.write_all(bytes).await?;
        self.file.flush().await?;
        self.file.sync_data().await
    }

    async fn truncate_to(&mut self, end: u64) {
        if let Err(e) = self.file.set_len(end).await {
            tracing::error!("Could not roll datafile back to {} bytes: {}", end, e);
        }
    }

    /// Datafile whose every append fails with `StorageFull`
    #[cfg(test)]
    pub async fn unwritable() -> Result<Self, StoreError> {
        let file = OpenOptions::new().append(true).open("/dev/full").await?;
        Ok(Self { file })
    }
}
