use crate::api::ApiClient;
use crate::models::{Note, User};
use leptos::prelude::*;

/// Add/edit dialog state. One tagged value instead of a loose
/// open-flag + nullable-note pair, so "open" and "what is being edited"
/// can never disagree.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum NoteDialog {
    #[default]
    Closed,
    AddingNew,
    Editing(String),
}

impl NoteDialog {
    pub fn is_open(&self) -> bool {
        !matches!(self, NoteDialog::Closed)
    }

    pub fn editing_id(&self) -> Option<&str> {
        match self {
            NoteDialog::Editing(id) => Some(id),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            NoteDialog::Editing(_) => "Edit Note",
            _ => "Add Note",
        }
    }
}

/// Transient form state owned by the open dialog. An empty
/// `selected_user_id` means "no assignee".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NoteDraft {
    pub title: String,
    pub content: String,
    pub selected_user_id: String,
}

impl NoteDraft {
    pub fn seeded_from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            selected_user_id: note
                .assignee()
                .map(|u| u.id.clone())
                .unwrap_or_default(),
        }
    }
}

// Copy: every field is an arena-backed signal handle, so the whole state
// can move freely into event-handler closures.
#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Server-authoritative caches, replaced wholesale on every fetch.
    pub notes: RwSignal<Vec<Note>>,
    pub users: RwSignal<Vec<User>>,

    pub login_error: RwSignal<Option<String>>,

    pub dialog: RwSignal<NoteDialog>,
    pub draft_title: RwSignal<String>,
    pub draft_content: RwSignal<String>,
    pub draft_user_id: RwSignal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::load_from_storage()),
            notes: RwSignal::new(vec![]),
            users: RwSignal::new(vec![]),
            login_error: RwSignal::new(None),
            dialog: RwSignal::new(NoteDialog::Closed),
            draft_title: RwSignal::new(String::new()),
            draft_content: RwSignal::new(String::new()),
            draft_user_id: RwSignal::new(String::new()),
        }
    }

    fn set_draft(&self, draft: NoteDraft) {
        self.draft_title.set(draft.title);
        self.draft_content.set(draft.content);
        self.draft_user_id.set(draft.selected_user_id);
    }

    pub fn open_add_dialog(&self) {
        self.set_draft(NoteDraft::default());
        self.dialog.set(NoteDialog::AddingNew);
    }

    pub fn open_edit_dialog(&self, note: &Note) {
        self.set_draft(NoteDraft::seeded_from(note));
        self.dialog.set(NoteDialog::Editing(note.id.clone()));
    }

    /// Unconditional close; discards the draft.
    pub fn close_dialog(&self) {
        self.dialog.set(NoteDialog::Closed);
        self.set_draft(NoteDraft::default());
    }

    /// Local removal by identity, no re-fetch. A second call with the same
    /// id is a no-op.
    pub fn remove_note(&self, id: &str) {
        self.notes.update(|notes| notes.retain(|n| n.id != id));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
