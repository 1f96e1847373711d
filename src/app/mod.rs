//! Application state types and the list-manager operations.
//!
//! `AppState` owns the canonical list, the derived filtered view, the draft
//! record and the form mode. Every mutation goes through a method here and
//! ends by re-deriving the filtered view with [`crate::search::apply_search`].
//!
pub mod config;
pub mod draft;
pub mod keymap;
pub mod theme;
pub mod update;

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::UserListError;
use crate::model::User;
use crate::search::apply_search;
use crate::source::worker::FetchOutcome;
use crate::store::{UserId, UserRecord, UserStore};

pub use draft::DraftField;
pub use keymap::Keymap;
pub use theme::Theme;

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Form,
    Modal,
}

/// Which form, if any, is open. Only one can be open at a time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Closed,
    Adding,
    Editing(UserId),
}

/// Progress of the initial fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Overlay dialogs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    DeleteConfirm { id: UserId, selected: usize },
    Help { scroll: u16 },
}

pub struct AppState {
    pub started_at: Instant,
    pub store: UserStore,
    /// Filtered view: ids of `store` records matching `active_query`.
    pub visible: Vec<UserId>,
    pub selected_index: usize,
    pub columns: usize,
    pub cards_per_page: usize,
    pub input_mode: InputMode,
    /// Search box contents; applied to `active_query` on Enter.
    pub search_input: String,
    pub active_query: String,
    pub form: FormMode,
    pub draft: User,
    pub form_field: usize,
    pub load: LoadState,
    /// Last validation error, shown until the next successful action.
    pub notice: Option<String>,
    pub modal: Option<ModalState>,
    pub theme: Theme,
    pub keymap: Keymap,
    pub profile_name: String,
}

impl AppState {
    pub fn new(theme: Theme, keymap: Keymap) -> Self {
        Self {
            started_at: Instant::now(),
            store: UserStore::new(),
            visible: Vec::new(),
            selected_index: 0,
            columns: 1,
            cards_per_page: 1,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            active_query: String::new(),
            form: FormMode::Closed,
            draft: User::default(),
            form_field: 0,
            load: LoadState::Loading,
            notice: None,
            modal: None,
            theme,
            keymap,
            profile_name: current_profile_name(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.load {
            LoadState::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    /// Records of the filtered view, in canonical order.
    pub fn visible_users(&self) -> impl Iterator<Item = &UserRecord> + '_ {
        self.visible.iter().filter_map(|id| self.store.get(*id))
    }

    pub fn selected_id(&self) -> Option<UserId> {
        self.visible.get(self.selected_index).copied()
    }

    /// Apply the initial fetch result. Ignored unless still loading.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome) {
        if !self.is_loading() {
            debug!("ignoring late fetch result");
            return;
        }
        match outcome {
            Ok(users) => {
                info!(count = users.len(), "user list loaded");
                self.store.replace_all(users);
                self.load = LoadState::Ready;
            }
            Err(msg) => {
                warn!(error = %msg, "user list unavailable");
                self.load = LoadState::Failed(msg);
            }
        }
        self.selected_index = 0;
        apply_search(self);
    }

    /// Set the active query and re-derive the filtered view.
    pub fn search(&mut self, query: &str) {
        self.active_query = query.to_string();
        self.search_input = query.to_string();
        apply_search(self);
        debug!(query, matches = self.visible.len(), "search applied");
    }

    /// The "Add User" toggle. Replaces an open edit form.
    ///
    /// Refused with [`UserListError::NotReady`] until the initial fetch has
    /// succeeded, so a fetch arriving later cannot overwrite local records.
    pub fn begin_add(&mut self) -> Result<(), UserListError> {
        if self.form == FormMode::Adding {
            self.cancel_form();
            return Ok(());
        }
        let res = self.ensure_ready();
        self.record_outcome(res)?;
        self.draft = User::default();
        self.form = FormMode::Adding;
        self.form_field = 0;
        self.input_mode = InputMode::Form;
        Ok(())
    }

    /// Open the edit form on the record with `id`, copying it into the draft.
    pub fn begin_edit(&mut self, id: UserId) -> Result<(), UserListError> {
        let res = self.ensure_ready().and_then(|()| {
            self.store
                .get(id)
                .map(|r| r.user.clone())
                .ok_or(UserListError::UnknownUser(id))
        });
        let user = self.record_outcome(res)?;
        self.draft = user;
        self.form = FormMode::Editing(id);
        self.form_field = 0;
        self.input_mode = InputMode::Form;
        Ok(())
    }

    /// Local mutations are only allowed once the fetched list is in place.
    fn ensure_ready(&self) -> Result<(), UserListError> {
        match self.load {
            LoadState::Ready => Ok(()),
            _ => Err(UserListError::NotReady),
        }
    }

    pub fn cancel_form(&mut self) {
        self.draft = User::default();
        self.form = FormMode::Closed;
        self.form_field = 0;
        self.notice = None;
        if self.input_mode == InputMode::Form {
            self.input_mode = InputMode::Normal;
        }
    }

    /// Merge one raw value into the draft by wire field name.
    pub fn update_draft_field(&mut self, field_name: &str, raw: &str) -> Result<(), UserListError> {
        let field = DraftField::from_name(field_name)?;
        self.set_draft_field(field, raw)
    }

    pub fn set_draft_field(&mut self, field: DraftField, raw: &str) -> Result<(), UserListError> {
        let res = draft::set_field(&mut self.draft, field, raw);
        self.record_outcome(res)
    }

    /// Commit the draft under the current form mode: append when adding,
    /// replace by id when editing. Nothing changes on error.
    pub fn add_or_update(&mut self) -> Result<UserId, UserListError> {
        let res = self.commit_draft();
        let id = self.record_outcome(res)?;
        self.draft = User::default();
        self.form = FormMode::Closed;
        self.form_field = 0;
        if self.input_mode == InputMode::Form {
            self.input_mode = InputMode::Normal;
        }
        apply_search(self);
        if let Some(pos) = self.visible.iter().position(|v| *v == id) {
            self.selected_index = pos;
        }
        Ok(id)
    }

    fn commit_draft(&mut self) -> Result<UserId, UserListError> {
        let mode = self.form;
        if mode == FormMode::Closed {
            return Err(UserListError::NoOpenForm);
        }
        self.ensure_ready()?;
        draft::validate(&self.draft)?;
        let id = match mode {
            FormMode::Editing(id) => {
                self.store.update(id, self.draft.clone())?;
                id
            }
            _ => self.store.add(self.draft.clone()),
        };
        debug!(%id, username = %self.draft.username, ?mode, "draft committed");
        Ok(id)
    }

    /// Remove the record with `id` and return it.
    pub fn delete(&mut self, id: UserId) -> Result<User, UserListError> {
        let res = self.ensure_ready().and_then(|()| self.store.remove(id));
        let removed = self.record_outcome(res)?;
        debug!(%id, username = %removed.username, "user deleted");
        if self.form == FormMode::Editing(id) {
            self.cancel_form();
        }
        apply_search(self);
        Ok(removed)
    }

    fn record_outcome<T>(&mut self, res: Result<T, UserListError>) -> Result<T, UserListError> {
        match &res {
            Ok(_) => self.notice = None,
            Err(e) => {
                warn!(error = %e, "rejected");
                self.notice = Some(e.to_string());
            }
        }
        res
    }

    pub fn move_by(&mut self, delta: isize) {
        if self.visible.is_empty() {
            self.selected_index = 0;
            return;
        }
        let last = self.visible.len() - 1;
        let next = self.selected_index as isize + delta;
        self.selected_index = next.clamp(0, last as isize) as usize;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Theme::default(), Keymap::default())
    }
}

/// Login name of the current OS user for the navbar.
pub fn current_profile_name() -> String {
    users::get_current_username()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
