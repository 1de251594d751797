//! Note details state machine
//!
//! `Initial → {Viewing, Adding}`, `Viewing → Editing`. Saves run on the
//! executor and report back through [`NoteEvent`]s, one save at a time.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use super::state::{Mode, NoteEvent, UiState};
use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::models::{Note, NoteDetailsArgs, NoteDetailsType};
use crate::repository::NoteRepository;
use crate::util::compact_text;

/// State holder for one note details screen
pub struct NoteViewModel<R> {
    repository: Arc<R>,
    executor: Executor,
    clock: Arc<dyn Clock>,
    state: watch::Sender<UiState>,
    events_tx: mpsc::UnboundedSender<NoteEvent>,
    events_rx: mpsc::UnboundedReceiver<NoteEvent>,
    save_in_flight: bool,
}

impl<R> NoteViewModel<R>
where
    R: NoteRepository + 'static,
{
    /// Create a view model in [`Mode::Initial`]
    pub fn new(repository: Arc<R>, executor: Executor, clock: Arc<dyn Clock>) -> Self {
        let (state, _) = watch::channel(UiState::default());
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            repository,
            executor,
            clock,
            state,
            events_tx,
            events_rx,
            save_in_flight: false,
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.state.borrow().mode
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    /// Whether a save has been started and its event not consumed yet
    pub const fn is_saving(&self) -> bool {
        self.save_in_flight
    }

    /// Apply the screen's entry arguments. Only acts in [`Mode::Initial`].
    ///
    /// A note opens in [`Mode::Viewing`]; no note opens in [`Mode::Adding`].
    pub fn initialize(&mut self, args: &NoteDetailsArgs) -> bool {
        let changed = self.state.send_if_modified(|state| {
            if state.mode != Mode::Initial {
                return false;
            }

            match &args.note {
                Some(note) => {
                    state.mode = Mode::Viewing;
                    state.photo_url.clone_from(&note.photo_url);
                    state.note = Some(note.clone());
                }
                None => {
                    state.mode = Mode::Adding;
                    state.photo_url = None;
                    state.note = None;
                }
            }
            true
        });

        if changed {
            if args.mode == NoteDetailsType::Add && args.note.is_some() {
                tracing::debug!("Add request carried a note; opening it for viewing");
            }
            tracing::debug!("Screen initialized in {:?} mode", self.mode());
        }
        changed
    }

    /// Switch from viewing to editing. Silently ignored in any other mode.
    pub fn begin_edit(&mut self) -> bool {
        let changed = self.state.send_if_modified(|state| {
            if state.mode != Mode::Viewing {
                return false;
            }
            state.mode = Mode::Editing;
            true
        });

        if changed {
            tracing::debug!("Began editing note");
        }
        changed
    }

    /// Replace the working photo URL. `None` or a blank URL clears it.
    pub fn set_photo(&mut self, url: Option<String>) {
        let url = url.filter(|value| !value.trim().is_empty());
        self.state.send_modify(|state| state.photo_url = url);
    }

    /// Persist the note being added or edited.
    ///
    /// Returns once the save is scheduled; the outcome arrives as a
    /// [`NoteEvent`] from [`Self::next_event`]. Title and content are expected
    /// to be validated by the caller.
    pub fn save(&mut self, title: impl Into<String>, content: Option<String>) -> Result<()> {
        if self.save_in_flight {
            return Err(Error::SaveInProgress);
        }

        let note = self.build_note(title.into(), content)?;
        self.save_in_flight = true;
        tracing::debug!(
            "Saving note {} ({} mode)",
            note.id,
            if note.id.is_set() { "edit" } else { "add" }
        );

        let repository = Arc::clone(&self.repository);
        let events = self.events_tx.clone();
        self.executor.spawn(async move {
            let event = match repository.add_note(note).await {
                Ok(_) => NoteEvent::NoteSaved,
                Err(error) => {
                    tracing::warn!("Failed to save note: {error}");
                    NoteEvent::SaveFailed {
                        message: compact_text(&error.to_string()),
                    }
                }
            };
            if events.send(event).is_err() {
                tracing::debug!("Screen closed before save completed");
            }
        });

        Ok(())
    }

    fn build_note(&self, title: String, content: Option<String>) -> Result<Note> {
        let state = self.state.borrow();
        let now = self.clock.now();

        match state.mode {
            Mode::Adding => Ok(Note::new(title, content, state.photo_url.clone(), now)),
            Mode::Editing => {
                let Some(existing) = state.note.as_ref() else {
                    return Err(Error::InvalidInput("No note loaded for editing".into()));
                };
                Ok(Note {
                    id: existing.id,
                    title,
                    content,
                    photo_url: state.photo_url.clone(),
                    create_date: existing.create_date,
                    modify_date: Some(now),
                })
            }
            mode => Err(Error::InvalidTransition {
                action: "save",
                mode,
            }),
        }
    }

    /// Wait for the outcome of the pending save.
    ///
    /// Returns `None` immediately when no save is pending.
    pub async fn next_event(&mut self) -> Option<NoteEvent> {
        if !self.save_in_flight {
            return None;
        }
        let event = self.events_rx.recv().await;
        self.save_in_flight = false;
        event
    }

    /// Non-blocking variant of [`Self::next_event`]
    pub fn try_next_event(&mut self) -> Option<NoteEvent> {
        let event = self.events_rx.try_recv().ok();
        if event.is_some() {
            self.save_in_flight = false;
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::db::Database;
    use crate::models::{NoteId, Timestamp};
    use crate::repository::LocalNoteRepository;
    use pretty_assertions::assert_eq;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const T0: Timestamp = Timestamp::from_millis(1_663_853_400_000);
    const T1: Timestamp = Timestamp::from_millis(1_663_939_800_000);

    fn repository() -> Arc<LocalNoteRepository> {
        let db = Database::open_in_memory().unwrap();
        Arc::new(LocalNoteRepository::new(db, Executor::current().unwrap()))
    }

    fn view_model<R: NoteRepository + 'static>(repo: &Arc<R>, now: Timestamp) -> NoteViewModel<R> {
        NoteViewModel::new(
            Arc::clone(repo),
            Executor::current().unwrap(),
            Arc::new(FixedClock(now)),
        )
    }

    fn saved_note(id: i64, photo_url: Option<&str>) -> Note {
        Note {
            id: NoteId::new(id),
            title: "Original".to_string(),
            content: Some("Body".to_string()),
            photo_url: photo_url.map(str::to_string),
            create_date: T0,
            modify_date: None,
        }
    }

    /// Repository whose writes always fail
    struct FailingRepository {
        attempts: AtomicUsize,
    }

    impl NoteRepository for FailingRepository {
        fn add_note(&self, _note: Note) -> impl Future<Output = Result<NoteId>> + Send {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(Error::Database("disk I/O error".to_string())) }
        }

        async fn get_all_notes(&self) -> Result<Vec<Note>> {
            Ok(Vec::new())
        }

        async fn get_note_by_id(&self, _id: NoteId) -> Result<Option<Note>> {
            Ok(None)
        }

        async fn delete_note(&self, id: NoteId) -> Result<()> {
            Err(Error::NotFound(id.to_string()))
        }

        async fn observe_notes(&self) -> Result<watch::Receiver<Vec<Note>>> {
            Ok(watch::channel(Vec::new()).1)
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_starts_in_initial() {
        let repo = repository();
        let vm = view_model(&repo, T0);
        assert_eq!(vm.state(), UiState::default());
        assert_eq!(vm.mode(), Mode::Initial);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_initialize_add_opens_adding() {
        let repo = repository();
        let mut vm = view_model(&repo, T0);

        assert!(vm.initialize(&NoteDetailsArgs::add()));
        assert_eq!(
            vm.state(),
            UiState {
                mode: Mode::Adding,
                photo_url: None,
                note: None,
            }
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_initialize_view_copies_photo() {
        let repo = repository();
        let mut vm = view_model(&repo, T0);
        let note = saved_note(3, Some("https://example.com/cat.png"));

        vm.initialize(&NoteDetailsArgs::view(note.clone()));
        let state = vm.state();
        assert_eq!(state.mode, Mode::Viewing);
        assert_eq!(state.photo_url.as_deref(), Some("https://example.com/cat.png"));
        assert_eq!(state.note, Some(note));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_initialize_view_without_photo() {
        let repo = repository();
        let mut vm = view_model(&repo, T0);

        vm.initialize(&NoteDetailsArgs::view(saved_note(3, None)));
        assert_eq!(vm.state().photo_url, None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_initialize_view_without_note_opens_adding() {
        let repo = repository();
        let mut vm = view_model(&repo, T0);

        let args = NoteDetailsArgs {
            mode: NoteDetailsType::View,
            note: None,
        };
        assert!(vm.initialize(&args));
        assert_eq!(
            vm.state(),
            UiState {
                mode: Mode::Adding,
                photo_url: None,
                note: None,
            }
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_initialize_add_with_note_opens_viewing() {
        let repo = repository();
        let mut vm = view_model(&repo, T0);
        let note = saved_note(6, Some("https://example.com/dog.png"));

        let args = NoteDetailsArgs {
            mode: NoteDetailsType::Add,
            note: Some(note.clone()),
        };
        assert!(vm.initialize(&args));
        assert_eq!(
            vm.state(),
            UiState {
                mode: Mode::Viewing,
                photo_url: Some("https://example.com/dog.png".to_string()),
                note: Some(note),
            }
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_initialize_only_once() {
        let repo = repository();
        let mut vm = view_model(&repo, T0);

        vm.initialize(&NoteDetailsArgs::add());
        assert!(!vm.initialize(&NoteDetailsArgs::view(saved_note(1, None))));
        assert_eq!(vm.mode(), Mode::Adding);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_begin_edit_only_from_viewing() {
        let repo = repository();

        let mut initial = view_model(&repo, T0);
        assert!(!initial.begin_edit());
        assert_eq!(initial.state(), UiState::default());

        let mut adding = view_model(&repo, T0);
        adding.initialize(&NoteDetailsArgs::add());
        let before = adding.state();
        assert!(!adding.begin_edit());
        assert_eq!(adding.state(), before);

        let mut viewing = view_model(&repo, T0);
        let note = saved_note(2, Some("https://example.com/a.png"));
        viewing.initialize(&NoteDetailsArgs::view(note.clone()));
        assert!(viewing.begin_edit());
        assert_eq!(
            viewing.state(),
            UiState {
                mode: Mode::Editing,
                photo_url: Some("https://example.com/a.png".to_string()),
                note: Some(note),
            }
        );

        // Already editing
        assert!(!viewing.begin_edit());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_set_photo_in_any_mode() {
        let repo = repository();
        let mut vm = view_model(&repo, T0);

        vm.set_photo(Some("https://example.com/x.png".to_string()));
        assert_eq!(vm.state().photo_url.as_deref(), Some("https://example.com/x.png"));

        vm.set_photo(Some("   ".to_string()));
        assert_eq!(vm.state().photo_url, None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_subscribers_see_transitions() {
        let repo = repository();
        let mut vm = view_model(&repo, T0);
        let mut states = vm.subscribe();

        vm.initialize(&NoteDetailsArgs::view(saved_note(1, None)));
        states.changed().await.unwrap();
        assert_eq!(states.borrow_and_update().mode, Mode::Viewing);

        vm.begin_edit();
        states.changed().await.unwrap();
        assert_eq!(states.borrow_and_update().mode, Mode::Editing);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_add_flow_persists_new_note() {
        let repo = repository();
        let mut vm = view_model(&repo, T0);

        vm.initialize(&NoteDetailsArgs::add());
        vm.set_photo(Some("http://x/img.png".to_string()));
        vm.save("Hello", Some("World".to_string())).unwrap();

        assert_eq!(vm.next_event().await, Some(NoteEvent::NoteSaved));
        assert_eq!(vm.try_next_event(), None);
        assert_eq!(vm.next_event().await, None);

        let notes = repo.get_all_notes().await.unwrap();
        assert_eq!(notes.len(), 1);
        let saved = &notes[0];
        assert!(saved.id.is_set());
        assert_eq!(saved.title, "Hello");
        assert_eq!(saved.content.as_deref(), Some("World"));
        assert_eq!(saved.photo_url.as_deref(), Some("http://x/img.png"));
        assert_eq!(saved.create_date, T0);
        assert_eq!(saved.modify_date, None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_edit_flow_keeps_create_date() {
        let repo = repository();
        let existing = saved_note(5, None);
        repo.add_note(existing.clone()).await.unwrap();

        let mut vm = view_model(&repo, T1);
        vm.initialize(&NoteDetailsArgs::view(existing));
        assert!(vm.begin_edit());
        vm.save("New title", None).unwrap();
        assert_eq!(vm.next_event().await, Some(NoteEvent::NoteSaved));

        let notes = repo.get_all_notes().await.unwrap();
        assert_eq!(
            notes,
            vec![Note {
                id: NoteId::new(5),
                title: "New title".to_string(),
                content: None,
                photo_url: None,
                create_date: T0,
                modify_date: Some(T1),
            }]
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_second_edit_updates_modify_date() {
        let repo = repository();
        let mut existing = saved_note(8, None);
        existing.modify_date = Some(T1);
        repo.add_note(existing.clone()).await.unwrap();

        let later = Timestamp::from_millis(T1.as_millis() + 60_000);
        let mut vm = view_model(&repo, later);
        vm.initialize(&NoteDetailsArgs::view(existing));
        vm.begin_edit();
        vm.save("Again", Some("Body".to_string())).unwrap();
        vm.next_event().await;

        let stored = repo.get_note_by_id(NoteId::new(8)).await.unwrap().unwrap();
        assert_eq!(stored.create_date, T0);
        assert_eq!(stored.modify_date, Some(later));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_removing_photo_while_editing() {
        let repo = repository();
        let existing = saved_note(4, Some("https://example.com/old.png"));
        repo.add_note(existing.clone()).await.unwrap();

        let mut vm = view_model(&repo, T1);
        vm.initialize(&NoteDetailsArgs::view(existing));
        vm.begin_edit();
        vm.set_photo(None);
        vm.save("Original", Some("Body".to_string())).unwrap();
        vm.next_event().await;

        let stored = repo.get_note_by_id(NoteId::new(4)).await.unwrap().unwrap();
        assert_eq!(stored.photo_url, None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_save_rejected_outside_adding_or_editing() {
        let repo = repository();

        let mut initial = view_model(&repo, T0);
        assert!(matches!(
            initial.save("Title", None),
            Err(Error::InvalidTransition {
                mode: Mode::Initial,
                ..
            })
        ));

        let mut viewing = view_model(&repo, T0);
        viewing.initialize(&NoteDetailsArgs::view(saved_note(1, None)));
        assert!(matches!(
            viewing.save("Title", None),
            Err(Error::InvalidTransition {
                mode: Mode::Viewing,
                ..
            })
        ));
        assert!(!viewing.is_saving());
        assert!(repo.get_all_notes().await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_one_save_in_flight() {
        let repo = repository();
        let mut vm = view_model(&repo, T0);
        vm.initialize(&NoteDetailsArgs::add());

        vm.save("First", None).unwrap();
        assert!(vm.is_saving());
        assert!(matches!(vm.save("Second", None), Err(Error::SaveInProgress)));

        assert_eq!(vm.next_event().await, Some(NoteEvent::NoteSaved));
        assert!(!vm.is_saving());
        assert_eq!(repo.get_all_notes().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failed_save_keeps_state_and_allows_retry() {
        let repo = Arc::new(FailingRepository {
            attempts: AtomicUsize::new(0),
        });
        let mut vm = view_model(&repo, T0);
        vm.initialize(&NoteDetailsArgs::add());
        vm.set_photo(Some("https://example.com/p.png".to_string()));
        let before = vm.state();

        vm.save("Title", Some("Body".to_string())).unwrap();
        let event = vm.next_event().await;
        assert!(matches!(
            event,
            Some(NoteEvent::SaveFailed { ref message }) if message.contains("disk I/O error")
        ));
        assert_eq!(vm.state(), before);

        vm.save("Title", Some("Body".to_string())).unwrap();
        assert!(matches!(
            vm.next_event().await,
            Some(NoteEvent::SaveFailed { .. })
        ));
        assert_eq!(repo.attempts.load(Ordering::SeqCst), 2);
    }
}
