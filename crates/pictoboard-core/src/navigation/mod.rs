//! View navigation state machine.
//!
//! A finite state machine over the application's views. The last active
//! primary view is persisted so it survives page reloads; the compose view
//! is deliberately never persisted, so returning from it (or reloading
//! while composing) restores whichever primary view preceded it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::Result;
use crate::storage::{self, KeyValueStore, keys};

/// The closed set of application views.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionView {
    /// Free-text pictogram search.
    Search,
    /// Image upload / recognition.
    Upload,
    /// Sentence composition over the selected entry.
    Compose,
}

impl SessionView {
    /// Hard default when nothing else resolves.
    pub const DEFAULT: SessionView = SessionView::Upload;

    /// Primary views are persisted as "last active"; compose is not.
    pub fn is_primary(&self) -> bool {
        !matches!(self, SessionView::Compose)
    }
}

/// Navigator over the session's views, synchronized with storage.
pub struct Navigator {
    store: Arc<dyn KeyValueStore>,
    active: SessionView,
}

impl Navigator {
    /// Resolves the initial view on session start and activates it.
    ///
    /// Precedence: an explicit `location_param` naming a valid view
    /// overrides the persisted last-active view, which overrides the hard
    /// default. An unrecognized parameter or an undecodable persisted value
    /// simply falls through to the next candidate.
    pub fn resolve_initial(
        store: Arc<dyn KeyValueStore>,
        location_param: Option<&str>,
    ) -> Result<Self> {
        let from_param = location_param.and_then(|raw| match raw.parse::<SessionView>() {
            Ok(view) => Some(view),
            Err(_) => {
                tracing::warn!("ignoring unknown view parameter '{raw}'");
                None
            }
        });

        let initial = from_param
            .or_else(|| storage::read_json::<SessionView>(store.as_ref(), keys::LAST_ACTIVE_VIEW))
            .unwrap_or(SessionView::DEFAULT);

        let mut navigator = Self {
            store,
            active: initial,
        };
        navigator.navigate_to(initial)?;
        Ok(navigator)
    }

    pub fn active(&self) -> SessionView {
        self.active
    }

    /// Activates `view`; primary views are persisted as last active.
    pub fn navigate_to(&mut self, view: SessionView) -> Result<()> {
        self.active = view;
        if view.is_primary() {
            storage::write_json(self.store.as_ref(), keys::LAST_ACTIVE_VIEW, &view)?;
        }
        Ok(())
    }

    /// Leaves the compose view, restoring the persisted last-active primary
    /// view (never the compose view itself, never blindly the default).
    pub fn return_from_compose(&mut self) -> Result<SessionView> {
        let target = storage::read_json::<SessionView>(self.store.as_ref(), keys::LAST_ACTIVE_VIEW)
            .filter(SessionView::is_primary)
            .unwrap_or(SessionView::DEFAULT);
        self.navigate_to(target)?;
        Ok(target)
    }
}
