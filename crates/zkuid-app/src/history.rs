use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use zkuid_types::{ProofHistoryEntry, TxHash, VerificationType, ZkuidError, ZkuidResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    pub total: usize,
    pub verified: usize,
    pub failed: usize,
}

/// Append-only ledger of verification outcomes, optionally mirrored to a
/// JSON file.
pub struct ProofHistory {
    entries: RwLock<Vec<ProofHistoryEntry>>,
    path: Option<PathBuf>,
}

impl ProofHistory {
    pub fn in_memory() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            path: None,
        }
    }

    /// Loads the ledger at `path`. An unreadable or corrupt file is moved
    /// aside and the ledger starts empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = load(&path);

        debug!("Loaded {} proof history entries from {:?}", entries.len(), path);

        Self {
            entries: RwLock::new(entries),
            path: Some(path),
        }
    }

    pub async fn record(
        &self,
        verification_type: VerificationType,
        verified: bool,
        tx_hash: Option<TxHash>,
    ) -> ZkuidResult<ProofHistoryEntry> {
        let entry = ProofHistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            date: chrono::Utc::now().date_naive(),
            verification_type,
            verified,
            tx_hash,
        };

        let mut entries = self.entries.write().await;
        entries.push(entry.clone());

        if let Some(ref path) = self.path {
            if let Err(e) = persist(path, &entries).await {
                entries.pop();
                return Err(e);
            }
        }

        info!(
            "Recorded {} verification: {}",
            verification_type,
            if verified { "verified" } else { "failed" }
        );
        Ok(entry)
    }

    /// Newest first.
    pub async fn entries(&self) -> Vec<ProofHistoryEntry> {
        let entries = self.entries.read().await;
        entries.iter().rev().cloned().collect()
    }

    pub async fn stats(&self) -> HistoryStats {
        let entries = self.entries.read().await;
        let verified = entries.iter().filter(|e| e.verified).count();
        HistoryStats {
            total: entries.len(),
            verified,
            failed: entries.len() - verified,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

fn load(path: &Path) -> Vec<ProofHistoryEntry> {
    if !path.exists() {
        return Vec::new();
    }

    let parsed = std::fs::read_to_string(path)
        .map_err(|e| ZkuidError::Io(format!("Failed to read history: {}", e)))
        .and_then(|contents| {
            serde_json::from_str(&contents)
                .map_err(|e| ZkuidError::Serialization(format!("Failed to parse history: {}", e)))
        });

    match parsed {
        Ok(entries) => entries,
        Err(e) => {
            let aside = path.with_extension("json.corrupt");
            warn!("{}; moving {:?} to {:?} and starting empty", e, path, aside);
            if let Err(e) = std::fs::rename(path, &aside) {
                warn!("Failed to move history file aside: {}", e);
            }
            Vec::new()
        }
    }
}

/// Writes to a sibling temp file and renames it over `path`, so a crash
/// never leaves a half-written ledger.
async fn persist(path: &Path, entries: &[ProofHistoryEntry]) -> ZkuidResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ZkuidError::Io(format!("Failed to create data dir: {}", e)))?;
    }

    let contents = serde_json::to_string_pretty(entries)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, contents)
        .await
        .map_err(|e| ZkuidError::Io(format!("Failed to write history: {}", e)))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| ZkuidError::Io(format!("Failed to replace history: {}", e)))
}

impl Default for ProofHistory {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_and_stats() {
        let history = ProofHistory::in_memory();
        history
            .record(VerificationType::Age, true, Some(TxHash::new("0x9abc")))
            .await
            .unwrap();
        history.record(VerificationType::Kyc, false, None).await.unwrap();

        let stats = history.stats().await;
        assert_eq!(stats, HistoryStats { total: 2, verified: 1, failed: 1 });

        let entries = history.entries().await;
        assert_eq!(entries[0].verification_type, VerificationType::Kyc);
        assert_ne!(entries[0].id, entries[1].id);
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("proof_history.json");

        {
            let history = ProofHistory::open(&path);
            history
                .record(VerificationType::Email, true, Some(TxHash::new("0x4fd3")))
                .await
                .unwrap();
        }

        let reopened = ProofHistory::open(&path);
        let entries = reopened.entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tx_hash.as_ref().unwrap().as_str(), "0x4fd3");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_set_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proof_history.json");
        std::fs::write(&path, r#"{"trunc"#).unwrap();

        let history = ProofHistory::open(&path);

        assert!(history.is_empty().await);
        assert!(!path.exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("proof_history.json.corrupt")).unwrap(),
            r#"{"trunc"#
        );

        history.record(VerificationType::Age, true, None).await.unwrap();
        assert_eq!(ProofHistory::open(&path).len().await, 1);
    }

    #[tokio::test]
    async fn test_record_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proof_history.json");
        let history = ProofHistory::open(&path);

        history.record(VerificationType::Full, false, None).await.unwrap();
        history.record(VerificationType::Kyc, true, None).await.unwrap();

        assert!(!dir.path().join("proof_history.json.tmp").exists());
        let stored: Vec<ProofHistoryEntry> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_persist_rolls_back_entry() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the ledger file should be makes the rename fail.
        let path = dir.path().join("proof_history.json");
        std::fs::create_dir_all(path.join("occupied")).unwrap();
        let history = ProofHistory {
            entries: RwLock::new(Vec::new()),
            path: Some(path),
        };

        assert!(history.record(VerificationType::Age, true, None).await.is_err());
        assert!(history.is_empty().await);
    }
}
