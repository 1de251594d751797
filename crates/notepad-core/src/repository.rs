//! Async note repository
//!
//! Screens talk to notes through [`NoteRepository`]. The local implementation
//! runs every `SQLite` call on the executor's blocking pool and republishes
//! the note list after each write.

use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::db::{Database, NoteDao, SqliteNoteDao};
use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::models::{Note, NoteId};

/// Trait for asynchronous note operations
pub trait NoteRepository: Send + Sync {
    /// Insert or replace a note keyed by its id. Completes once, no retry.
    fn add_note(&self, note: Note) -> impl Future<Output = Result<NoteId>> + Send;

    /// All notes, most recently touched first
    fn get_all_notes(&self) -> impl Future<Output = Result<Vec<Note>>> + Send;

    /// Fetch a note by id
    fn get_note_by_id(&self, id: NoteId) -> impl Future<Output = Result<Option<Note>>> + Send;

    /// Delete a note by id
    fn delete_note(&self, id: NoteId) -> impl Future<Output = Result<()>> + Send;

    /// Reload the note list and subscribe to later changes
    fn observe_notes(&self) -> impl Future<Output = Result<watch::Receiver<Vec<Note>>>> + Send;
}

/// Repository backed by a local `SQLite` database
#[derive(Clone)]
pub struct LocalNoteRepository {
    db: Arc<Mutex<Database>>,
    executor: Executor,
    notes: Arc<watch::Sender<Vec<Note>>>,
}

impl LocalNoteRepository {
    /// Take ownership of an open database
    pub fn new(db: Database, executor: Executor) -> Self {
        Self::shared(Arc::new(Mutex::new(db)), executor)
    }

    /// Share a database handle with other repositories
    pub fn shared(db: Arc<Mutex<Database>>, executor: Executor) -> Self {
        let (notes, _) = watch::channel(Vec::new());
        Self {
            db,
            executor,
            notes: Arc::new(notes),
        }
    }

    /// Re-read all notes and publish them to observers
    pub async fn refresh(&self) -> Result<()> {
        let notes = self.with_dao(|dao| dao.get_all()).await?;
        self.notes.send_replace(notes);
        Ok(())
    }

    async fn refresh_after_write(&self) {
        if let Err(error) = self.refresh().await {
            tracing::warn!("Failed to refresh note list: {error}");
        }
    }

    async fn with_dao<F, T>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&SqliteNoteDao<'_>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        self.executor
            .run_blocking(move || {
                let db = db
                    .lock()
                    .map_err(|_| Error::Database("Database lock poisoned".to_string()))?;
                let dao = SqliteNoteDao::new(db.connection());
                work(&dao)
            })
            .await
    }
}

impl NoteRepository for LocalNoteRepository {
    async fn add_note(&self, note: Note) -> Result<NoteId> {
        let id = self.with_dao(move |dao| dao.upsert(&note)).await?;
        tracing::debug!("Saved note {id}");
        self.refresh_after_write().await;
        Ok(id)
    }

    async fn get_all_notes(&self) -> Result<Vec<Note>> {
        self.with_dao(|dao| dao.get_all()).await
    }

    async fn get_note_by_id(&self, id: NoteId) -> Result<Option<Note>> {
        self.with_dao(move |dao| dao.get_by_id(id)).await
    }

    async fn delete_note(&self, id: NoteId) -> Result<()> {
        self.with_dao(move |dao| dao.delete_by_id(id)).await?;
        tracing::debug!("Deleted note {id}");
        self.refresh_after_write().await;
        Ok(())
    }

    async fn observe_notes(&self) -> Result<watch::Receiver<Vec<Note>>> {
        self.refresh().await?;
        Ok(self.notes.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Timestamp;
    use pretty_assertions::assert_eq;

    fn setup() -> LocalNoteRepository {
        let db = Database::open_in_memory().unwrap();
        LocalNoteRepository::new(db, Executor::current().unwrap())
    }

    fn note(title: &str, created: i64) -> Note {
        Note::new(title, None, None, Timestamp::from_millis(created))
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_add_and_get() {
        let repo = setup();

        let id = repo.add_note(note("Hello", 1_000)).await.unwrap();
        let fetched = repo.get_note_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Hello");
        assert_eq!(fetched.id, id);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_add_same_id_twice_upserts() {
        let repo = setup();

        let id = repo.add_note(note("Draft", 1_000)).await.unwrap();
        let mut edited = repo.get_note_by_id(id).await.unwrap().unwrap();
        edited.title = "Final".to_string();
        edited.modify_date = Some(Timestamp::from_millis(2_000));

        assert_eq!(repo.add_note(edited.clone()).await.unwrap(), id);
        assert_eq!(repo.get_all_notes().await.unwrap(), vec![edited]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_observe_notes_sees_writes() {
        let repo = setup();
        let mut notes = repo.observe_notes().await.unwrap();
        assert!(notes.borrow_and_update().is_empty());

        let id = repo.add_note(note("Watched", 1_000)).await.unwrap();
        notes.changed().await.unwrap();
        assert_eq!(notes.borrow_and_update().len(), 1);

        repo.delete_note(id).await.unwrap();
        notes.changed().await.unwrap();
        assert!(notes.borrow_and_update().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_observe_notes_restarts_with_current_list() {
        let repo = setup();
        repo.add_note(note("One", 1_000)).await.unwrap();
        repo.add_note(note("Two", 2_000)).await.unwrap();

        let notes = repo.observe_notes().await.unwrap();
        let titles = notes
            .borrow()
            .iter()
            .map(|n| n.title.clone())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["Two", "One"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_delete_missing_note() {
        let repo = setup();
        let result = repo.delete_note(NoteId::new(12)).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_shared_handle_sees_same_rows() {
        let db = Arc::new(Mutex::new(Database::open_in_memory().unwrap()));
        let executor = Executor::current().unwrap();
        let first = LocalNoteRepository::shared(Arc::clone(&db), executor.clone());
        let second = LocalNoteRepository::shared(db, executor);

        let id = first.add_note(note("Shared", 1_000)).await.unwrap();
        assert!(second.get_note_by_id(id).await.unwrap().is_some());
    }
}
