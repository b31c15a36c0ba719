//! The owned session-state object.
//!
//! `BoardSession` is created once at application start and passed by
//! reference to every view; there are no hidden statics. It wires the
//! navigator, the menu manager, the drag-transfer protocol, the long-press
//! detector, the editor, the selected entry, and the two collaborator
//! result panes to the persistent store, and rehydrates all of them on
//! construction.

pub mod results;

use std::sync::Arc;
use std::time::{Duration, Instant};

use pictoboard_core::error::Result;
use pictoboard_core::gesture::{Gesture, LongPressDetector};
use pictoboard_core::menu::{MenuEntry, MenuId, MenuManager};
use pictoboard_core::navigation::{Navigator, SessionView};
use pictoboard_core::pictogram::PictogramDescriptor;
use pictoboard_core::recognition::{QueryStatus, RecognitionClient};
use pictoboard_core::storage::{self, KeyValueStore, keys};
use pictoboard_core::transfer::{DragTransfer, TransferPayload};
use pictoboard_infrastructure::{JsonFileStore, Settings, WebhookClient};

use crate::compose;
use results::{RequestTicket, ResultPane};

/// In-flight edit of one menu entry's caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryEditor {
    menu_id: MenuId,
    /// The caption being typed; pre-filled with the entry's current text.
    pub text: String,
}

impl EntryEditor {
    pub fn menu_id(&self) -> MenuId {
        self.menu_id
    }
}

/// Session state for one device: everything the views read and mutate.
pub struct BoardSession {
    store: Arc<dyn KeyValueStore>,
    client: Arc<dyn RecognitionClient>,
    navigator: Navigator,
    menu: MenuManager,
    drag: DragTransfer,
    gesture: LongPressDetector,
    editor: Option<EntryEditor>,
    selected: Option<MenuEntry>,
    search: ResultPane,
    search_query: String,
    upload: ResultPane,
}

impl BoardSession {
    /// Composition root: builds a session over the on-disk store and the
    /// webhook client configured in `settings`.
    pub fn bootstrap(settings: &Settings, location_param: Option<&str>) -> Result<Self> {
        let store = Arc::new(JsonFileStore::open(settings.store_dir()?)?);
        let client = Arc::new(WebhookClient::new(settings)?);
        Self::restore(
            store,
            client,
            location_param,
            settings.long_press_threshold(),
        )
    }

    /// Builds the session, rehydrating every persisted piece of state.
    ///
    /// `location_param` is the entry location's view parameter, if any; it
    /// takes precedence over the persisted last-active view.
    pub fn restore(
        store: Arc<dyn KeyValueStore>,
        client: Arc<dyn RecognitionClient>,
        location_param: Option<&str>,
        long_press_threshold: Duration,
    ) -> Result<Self> {
        let navigator = Navigator::resolve_initial(store.clone(), location_param)?;
        let menu = MenuManager::restore(store.clone());
        let selected = storage::read_json::<MenuEntry>(store.as_ref(), keys::SELECTED_ENTRY);
        let search_query =
            storage::read_json::<String>(store.as_ref(), keys::LAST_SEARCH_QUERY).unwrap_or_default();
        let search = ResultPane::restore(storage::read_json_or_default(
            store.as_ref(),
            keys::LAST_SEARCH_RESULTS,
        ));
        let upload = ResultPane::restore(storage::read_json_or_default(
            store.as_ref(),
            keys::LAST_UPLOAD_RESULTS,
        ));

        Ok(Self {
            store,
            client,
            navigator,
            menu,
            drag: DragTransfer::new(),
            gesture: LongPressDetector::new(long_press_threshold),
            editor: None,
            selected,
            search,
            search_query,
            upload,
        })
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn active_view(&self) -> SessionView {
        self.navigator.active()
    }

    pub fn navigate_to(&mut self, view: SessionView) -> Result<()> {
        self.navigator.navigate_to(view)
    }

    /// Leaves the compose view, restoring the preceding primary view.
    pub fn return_from_compose(&mut self) -> Result<SessionView> {
        self.navigator.return_from_compose()
    }

    // ------------------------------------------------------------------
    // Menu
    // ------------------------------------------------------------------

    pub fn menu(&self) -> &MenuManager {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut MenuManager {
        &mut self.menu
    }

    /// Non-drag "add" affordance. Issues the identical insert call the
    /// drop path issues, so both input modalities behave the same.
    pub fn add_pictogram(&mut self, descriptor: &PictogramDescriptor) -> Result<bool> {
        Ok(self.menu.insert(descriptor)?.is_some())
    }

    // ------------------------------------------------------------------
    // Drag transfer
    // ------------------------------------------------------------------

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_drop_target_active(&self) -> bool {
        self.drag.is_over_target()
    }

    /// A result-list item was picked up.
    pub fn begin_drag(&mut self, descriptor: &PictogramDescriptor) -> Result<TransferPayload> {
        self.drag.begin(descriptor)
    }

    pub fn drag_over_menu(&mut self) {
        self.drag.drag_over();
    }

    pub fn drag_leave_menu(&mut self) {
        self.drag.drag_leave();
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// The menu area received a dropped payload.
    ///
    /// A malformed payload is discarded silently and nothing is mutated;
    /// a valid one goes through the same insert call as
    /// [`add_pictogram`](Self::add_pictogram). Returns whether the menu
    /// changed.
    pub fn drop_on_menu(&mut self, media_type: &str, data: &str) -> Result<bool> {
        let parsed = TransferPayload::decode(media_type, data);
        self.drag.complete();

        match parsed {
            Some(descriptor) => self.add_pictogram(&descriptor),
            None => Ok(false),
        }
    }

    // ------------------------------------------------------------------
    // Gesture and editor
    // ------------------------------------------------------------------

    /// Pointer or touch interaction started over a menu entry.
    pub fn press_started(&mut self, menu_id: MenuId, at: Instant) {
        self.gesture.press_started(menu_id, at);
    }

    /// Interaction released over the entry: a short press selects it, a
    /// press that outlived the threshold opens its editor.
    pub fn press_ended(&mut self, at: Instant) -> Result<()> {
        match self.gesture.press_ended(at) {
            Some(Gesture::ShortPress(menu_id)) => {
                self.select_entry(menu_id)?;
            }
            Some(Gesture::LongPress(menu_id)) => self.open_editor(menu_id),
            None => {}
        }
        Ok(())
    }

    /// Pointer left the entry mid-press: the press is abandoned without
    /// selecting or editing anything.
    pub fn press_left(&mut self) {
        self.gesture.cancel();
    }

    /// Long-press timer poll; opens the editor when the timer fires.
    pub fn poll_gesture(&mut self, now: Instant) {
        if let Some(menu_id) = self.gesture.poll(now) {
            self.open_editor(menu_id);
        }
    }

    /// Opens the caption editor for `menu_id`, pre-filled with the entry's
    /// current text. Unknown ids are ignored.
    pub fn open_editor(&mut self, menu_id: MenuId) {
        self.gesture.cancel();
        if let Some(entry) = self.menu.get(menu_id) {
            self.editor = Some(EntryEditor {
                menu_id,
                text: entry.pictogram.original_text.clone(),
            });
        }
    }

    pub fn editor(&self) -> Option<&EntryEditor> {
        self.editor.as_ref()
    }

    pub fn set_editor_text(&mut self, text: &str) {
        if let Some(editor) = self.editor.as_mut() {
            editor.text = text.to_string();
        }
    }

    /// Commits the edit as a rename and closes the editor.
    pub fn save_editor(&mut self) -> Result<bool> {
        match self.editor.take() {
            Some(editor) => self.menu.rename(editor.menu_id, &editor.text),
            None => Ok(false),
        }
    }

    /// Closes the editor, discarding the edit (explicit cancel or
    /// interaction outside the editor).
    pub fn cancel_editor(&mut self) {
        self.editor = None;
    }

    // ------------------------------------------------------------------
    // Selection and compose
    // ------------------------------------------------------------------

    pub fn selected(&self) -> Option<&MenuEntry> {
        self.selected.as_ref()
    }

    /// Selects the entry for sentence composition and persists the
    /// selection under its own key. Unknown ids are a no-op.
    pub fn select_entry(&mut self, menu_id: MenuId) -> Result<bool> {
        let Some(entry) = self.menu.get(menu_id).cloned() else {
            return Ok(false);
        };
        storage::write_json(self.store.as_ref(), keys::SELECTED_ENTRY, &entry)?;
        self.selected = Some(entry);
        Ok(true)
    }

    /// Clears the selection and removes its persisted key.
    pub fn clear_selection(&mut self) -> Result<()> {
        self.selected = None;
        self.store.remove(keys::SELECTED_ENTRY)
    }

    /// The fixed-template sentence for the current selection.
    pub fn assemble_sentence(&self) -> Option<Vec<String>> {
        self.selected.as_ref().map(compose::assemble)
    }

    // ------------------------------------------------------------------
    // Search view
    // ------------------------------------------------------------------

    pub fn search_status(&self) -> &QueryStatus {
        self.search.status()
    }

    pub fn search_results(&self) -> &[PictogramDescriptor] {
        self.search.results()
    }

    pub fn last_search_query(&self) -> &str {
        &self.search_query
    }

    /// Starts a text search attempt: persists the query, clears the
    /// previous results, and invalidates any request still in flight.
    pub fn begin_search(&mut self, query: &str) -> Result<RequestTicket> {
        self.search_query = query.to_string();
        storage::write_json(self.store.as_ref(), keys::LAST_SEARCH_QUERY, &self.search_query)?;
        Ok(self.search.begin())
    }

    /// Applies a finished search. Stale tickets are discarded; successful
    /// results are persisted for the next session.
    pub fn complete_search(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Vec<PictogramDescriptor>>,
    ) -> Result<bool> {
        if !self.search.complete(ticket, outcome) {
            return Ok(false);
        }
        if matches!(self.search.status(), QueryStatus::Succeeded) {
            storage::write_json(
                self.store.as_ref(),
                keys::LAST_SEARCH_RESULTS,
                &self.search.results(),
            )?;
        }
        Ok(true)
    }

    /// Runs a whole search attempt against the collaborator.
    pub async fn search(&mut self, query: &str) -> Result<bool> {
        let ticket = self.begin_search(query)?;
        let client = self.client.clone();
        let outcome = client.search_text(query).await;
        self.complete_search(ticket, outcome)
    }

    // ------------------------------------------------------------------
    // Upload view
    // ------------------------------------------------------------------

    pub fn upload_status(&self) -> &QueryStatus {
        self.upload.status()
    }

    pub fn upload_results(&self) -> &[PictogramDescriptor] {
        self.upload.results()
    }

    /// Starts an image-recognition attempt; a previously selected file's
    /// in-flight request is invalidated here.
    pub fn begin_upload(&mut self) -> RequestTicket {
        self.upload.begin()
    }

    /// Applies a finished recognition request; stale tickets (a new file
    /// was selected in the meantime) are discarded.
    pub fn complete_upload(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Vec<PictogramDescriptor>>,
    ) -> Result<bool> {
        if !self.upload.complete(ticket, outcome) {
            return Ok(false);
        }
        if matches!(self.upload.status(), QueryStatus::Succeeded) {
            storage::write_json(
                self.store.as_ref(),
                keys::LAST_UPLOAD_RESULTS,
                &self.upload.results(),
            )?;
        }
        Ok(true)
    }

    /// Runs a whole image-recognition attempt against the collaborator.
    pub async fn recognize_image(
        &mut self,
        image: Vec<u8>,
        file_name: &str,
        mime_type: &str,
    ) -> Result<bool> {
        let ticket = self.begin_upload();
        let client = self.client.clone();
        let outcome = client.recognize_image(image, file_name, mime_type).await;
        self.complete_upload(ticket, outcome)
    }
}
