use async_trait::async_trait;

use crate::notes::NoteBook;
use crate::settings::NotificationSettings;

use super::Result;

/// Persistence for the note book.
///
/// Implementations store the whole mapping at once; callers prune empty
/// dates before saving.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Loads the stored notes, empty when nothing has been saved yet.
    async fn load_notes(&self) -> Result<NoteBook>;

    /// Replaces the stored notes with `notes`.
    async fn save_notes(&self, notes: &NoteBook) -> Result<()>;
}

/// Persistence for notification settings.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Loads the stored settings, the defaults when nothing has been saved.
    async fn load_settings(&self) -> Result<NotificationSettings>;

    async fn save_settings(&self, settings: &NotificationSettings) -> Result<()>;
}
