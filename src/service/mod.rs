use crate::{models::Note, repository::Repository, store::StoreError};

/// What a save did to the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Deleted,
}

#[derive(Clone)]
pub struct NoteService {
    repo: Repository,
}

impl NoteService {
    pub const fn new(repo: Repository) -> Self {
        Self { repo }
    }

    pub async fn list_note_ids(&self) -> Result<Vec<String>, StoreError> {
        self.repo.list_ids().await
    }

    pub async fn get_note(&self, id: &str) -> Result<Option<Note>, StoreError> {
        self.repo.get(id).await
    }

    /// Replaces the note's body. A blank body removes the note instead, and
    /// the first non-blank save is what creates it.
    pub async fn save_note(&self, id: &str, body: &str) -> Result<SaveOutcome, StoreError> {
        if body.trim().is_empty() {
            self.repo.remove(id).await?;
            return Ok(SaveOutcome::Deleted);
        }

        self.repo.set(id, body).await?;

        Ok(SaveOutcome::Saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    use std::sync::Arc;

    fn service() -> NoteService {
        NoteService::new(Repository::new(Arc::new(MemoryStore::new())))
    }

    #[tokio::test]
    async fn whitespace_body_deletes_note() {
        let service = service();
        service.save_note("plan", "draft").await.unwrap();

        let outcome = service.save_note("plan", " \n\t ").await.unwrap();

        assert_eq!(outcome, SaveOutcome::Deleted);
        assert_eq!(service.get_note("plan").await.unwrap(), None);
    }

    #[tokio::test]
    async fn body_is_stored_untrimmed() {
        let service = service();

        let outcome = service.save_note("plan", "  indented\n").await.unwrap();

        assert_eq!(outcome, SaveOutcome::Saved);
        let note = service.get_note("plan").await.unwrap().unwrap();
        assert_eq!(note.body, "  indented\n");
    }
}
