use taskdeck_core::AppResult;
use taskdeck_domain::{NewNote, Note, NotePatch};

use crate::HttpApiClient;

/// Notes served by `/notes`.
#[derive(Debug, Clone)]
pub struct HttpNoteService {
    client: HttpApiClient,
}

impl HttpNoteService {
    /// Creates a service over a shared client.
    #[must_use]
    pub fn new(client: HttpApiClient) -> Self {
        Self { client }
    }

    /// Lists notes, pinned first as returned by the API.
    pub async fn list(&self) -> AppResult<Vec<Note>> {
        let url = self.client.endpoint(&["notes"])?;
        self.client.get_json(url).await
    }

    /// Loads one note.
    pub async fn get(&self, note_id: &str) -> AppResult<Note> {
        let url = self.client.endpoint(&["notes", note_id])?;
        self.client.get_json(url).await
    }

    /// Creates a note.
    pub async fn create(&self, note: &NewNote) -> AppResult<Note> {
        let url = self.client.endpoint(&["notes"])?;
        self.client.post_json(url, note).await
    }

    /// Applies a partial update.
    pub async fn update(&self, note_id: &str, patch: &NotePatch) -> AppResult<Note> {
        let url = self.client.endpoint(&["notes", note_id])?;
        self.client.patch_json(url, patch).await
    }

    /// Deletes a note.
    pub async fn delete(&self, note_id: &str) -> AppResult<()> {
        let url = self.client.endpoint(&["notes", note_id])?;
        self.client.delete(url).await
    }
}
