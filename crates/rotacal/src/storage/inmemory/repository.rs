//! In-memory repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use rotacal_core::notes::NoteBook;
use rotacal_core::settings::NotificationSettings;
use rotacal_core::storage::{NoteRepository, Result, SettingsRepository};

/// In-memory storage backend for tests and ephemeral sessions.
///
/// Data is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    notes: Arc<RwLock<NoteBook>>,
    settings: Arc<RwLock<NotificationSettings>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that starts with `settings`.
    pub fn with_settings(settings: NotificationSettings) -> Self {
        Self {
            notes: Arc::default(),
            settings: Arc::new(RwLock::new(settings)),
        }
    }

    /// Creates a repository pre-populated with `notes`.
    pub fn with_notes(notes: NoteBook) -> Self {
        Self {
            notes: Arc::new(RwLock::new(notes.pruned())),
            settings: Arc::default(),
        }
    }
}

#[async_trait]
impl NoteRepository for InMemoryRepository {
    async fn load_notes(&self) -> Result<NoteBook> {
        Ok(self.notes.read().await.clone())
    }

    async fn save_notes(&self, notes: &NoteBook) -> Result<()> {
        *self.notes.write().await = notes.pruned();
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for InMemoryRepository {
    async fn load_settings(&self) -> Result<NotificationSettings> {
        Ok(*self.settings.read().await)
    }

    async fn save_settings(&self, settings: &NotificationSettings) -> Result<()> {
        *self.settings.write().await = *settings;
        Ok(())
    }
}
