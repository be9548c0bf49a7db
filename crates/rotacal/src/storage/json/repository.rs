//! JSON file repository.
//!
//! Notes and settings live in one JSON document:
//!
//! ```json
//! { "notes": { "2025-10-26": ["pay rent"] }, "settings": { "day": "06:00", ... } }
//! ```
//!
//! A missing file reads as empty notes, and a document without a `settings`
//! object reads as the repository's default settings. Writes go to a
//! sibling temporary file that is then renamed over the target.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use rotacal_core::notes::NoteBook;
use rotacal_core::settings::NotificationSettings;
use rotacal_core::storage::{
    NoteRepository, RepositoryError, Result, SettingsRepository,
};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    notes: NoteBook,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    settings: Option<NotificationSettings>,
}

/// File-backed repository storing a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
    default_settings: NotificationSettings,
    // Serializes read-modify-write cycles within this process.
    lock: Arc<Mutex<()>>,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            default_settings: NotificationSettings::default(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Settings returned until some are saved.
    pub fn with_default_settings(mut self, settings: NotificationSettings) -> Self {
        self.default_settings = settings;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Document> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Document::default()),
            Err(err) => return Err(io_error(&self.path, err)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Document::default());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            RepositoryError::InvalidData(format!("{}: {e}", self.path.display()))
        })
    }

    async fn write_document(&self, document: &Document) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| io_error(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| io_error(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), "Wrote note store");
        Ok(())
    }
}

fn io_error(path: &Path, err: std::io::Error) -> RepositoryError {
    RepositoryError::Io(format!("{}: {err}", path.display()))
}

#[async_trait]
impl NoteRepository for JsonFileRepository {
    async fn load_notes(&self) -> Result<NoteBook> {
        let _guard = self.lock.lock().await;
        Ok(self.read_document().await?.notes)
    }

    async fn save_notes(&self, notes: &NoteBook) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        document.notes = notes.pruned();
        self.write_document(&document).await
    }
}

#[async_trait]
impl SettingsRepository for JsonFileRepository {
    async fn load_settings(&self) -> Result<NotificationSettings> {
        let _guard = self.lock.lock().await;
        Ok(self
            .read_document()
            .await?
            .settings
            .unwrap_or(self.default_settings))
    }

    async fn save_settings(&self, settings: &NotificationSettings) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        document.settings = Some(*settings);
        self.write_document(&document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::TempDir;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn repo(dir: &TempDir) -> JsonFileRepository {
        JsonFileRepository::new(dir.path().join("notes.json"))
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);

        assert!(repo.load_notes().await.unwrap().is_empty());
        assert_eq!(
            repo.load_settings().await.unwrap(),
            NotificationSettings::default()
        );
    }

    #[tokio::test]
    async fn test_round_trip_prunes_empty_dates() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let mut book = NoteBook::new();
        book.add(make_date(2025, 10, 26), "pay rent").unwrap();
        book.add(make_date(2025, 10, 27), "temp").unwrap();
        book.clear(make_date(2025, 10, 27));
        book.add(make_date(2025, 10, 28), "gone").unwrap();
        book.remove(make_date(2025, 10, 28), 0).unwrap();

        repo.save_notes(&book).await.unwrap();

        let raw = tokio::fs::read_to_string(repo.path()).await.unwrap();
        assert!(raw.contains("2025-10-26"));
        assert!(!raw.contains("2025-10-28"));

        let loaded = repo.load_notes().await.unwrap();
        assert_eq!(loaded, book.pruned());
    }

    #[tokio::test]
    async fn test_notes_and_settings_are_saved_independently() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        let mut book = NoteBook::new();
        book.add(make_date(2025, 10, 26), "kept").unwrap();
        repo.save_notes(&book).await.unwrap();

        let settings = NotificationSettings {
            night: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            ..NotificationSettings::default()
        };
        repo.save_settings(&settings).await.unwrap();

        assert_eq!(repo.load_notes().await.unwrap(), book);
        assert_eq!(repo.load_settings().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_default_settings_until_saved() {
        let dir = TempDir::new().unwrap();
        let configured = NotificationSettings {
            off: NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
            ..NotificationSettings::default()
        };
        let repo = repo(&dir).with_default_settings(configured);

        repo.save_notes(&NoteBook::new()).await.unwrap();
        assert_eq!(repo.load_settings().await.unwrap(), configured);

        let saved = NotificationSettings::default();
        repo.save_settings(&saved).await.unwrap();
        assert_eq!(repo.load_settings().await.unwrap(), saved);
    }

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("nested/dir/notes.json"));

        repo.save_notes(&NoteBook::new()).await.unwrap();

        assert!(repo.path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_invalid_data() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        tokio::fs::write(repo.path(), b"{ not json").await.unwrap();

        assert!(matches!(
            repo.load_notes().await,
            Err(RepositoryError::InvalidData(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let repo = repo(&dir);
        tokio::fs::write(repo.path(), b"\n").await.unwrap();

        assert!(repo.load_notes().await.unwrap().is_empty());
    }
}
