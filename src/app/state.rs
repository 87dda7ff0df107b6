//! Application state types, including the query workspace.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use ratatui::widgets::TableState;
use uuid::Uuid;

use crate::api::models::{Instance, SavedQuery};
use crate::naming;

/// Placeholder content for a freshly created draft query.
pub const DRAFT_TEMPLATE: &str = "QUERY untitled ($param) =>\n";

/// Simple list navigation over a ratatui table/list state.
#[derive(Default)]
pub struct ListNav {
    pub state: TableState,
}

impl ListNav {
    pub fn select_next(&mut self, max: usize) {
        let i = self.state.selected().unwrap_or(0);
        if i < max.saturating_sub(1) {
            self.state.select(Some(i + 1));
        }
    }

    pub fn select_prev(&mut self) {
        let i = self.state.selected().unwrap_or(0);
        self.state.select(Some(i.saturating_sub(1)));
    }

    pub fn select_first(&mut self) {
        self.state.select(Some(0));
    }

    pub const fn selected(&self) -> Option<usize> {
        self.state.selected()
    }
}

/// Filter state for panel filtering.
#[derive(Default)]
pub struct FilterState {
    pub text: String,
    pub active: bool,
}

impl FilterState {
    pub fn clear(&mut self) {
        self.text.clear();
        self.active = false;
    }

    pub fn push_char(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn pop_char(&mut self) {
        self.text.pop();
    }
}

/// UI feedback: status line, errors, in-flight operation flags, and the
/// action queued for the runtime to pick up.
#[derive(Default)]
pub struct UiFeedback {
    pub status_message: Option<String>,
    pub loading_instances: bool,
    pub loading_queries: bool,
    pub save_in_flight: bool,
    pub delete_in_flight: bool,
    pub spinner_frame: u8,
    pub pending_action: Option<super::AppAction>,
}

impl UiFeedback {
    pub const fn busy(&self) -> bool {
        self.loading_instances
            || self.loading_queries
            || self.save_in_flight
            || self.delete_in_flight
    }
}

/// The working copy of one query, distinct from its last-saved value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryEdit {
    pub id: Uuid,
    pub content: String,
    pub name: String,
    pub original_content: String,
    pub original_name: String,
    pub dirty: bool,
}

impl QueryEdit {
    fn from_query(query: &SavedQuery) -> Self {
        Self {
            id: query.id,
            content: query.content.clone(),
            name: query.name.clone(),
            original_content: query.content.clone(),
            original_name: query.name.clone(),
            dirty: false,
        }
    }

    fn recompute_dirty(&mut self) {
        self.dirty = self.content != self.original_content || self.name != self.original_name;
    }
}

/// Client-side model of the user's instances and the queries of the
/// currently viewed instance. Single writer: only the reducer methods below
/// mutate collections, and failure paths never touch them.
#[derive(Default)]
pub struct QueryWorkspace {
    pub instances: Vec<Instance>,
    pub instances_fetched_at: Option<DateTime<Utc>>,
    pub queries: Vec<SavedQuery>,
    pub active_query_id: Option<Uuid>,
    pub last_error: Option<String>,
    edits: HashMap<Uuid, QueryEdit>,
    drafts: HashSet<Uuid>,
}

impl QueryWorkspace {
    // ── Instances ────────────────────────────────────────────────────────

    pub fn instances_loaded(&mut self, instances: Vec<Instance>) {
        self.instances = instances;
        self.instances_fetched_at = Some(Utc::now());
        self.last_error = None;
    }

    pub fn instances_failed(&mut self, message: String) {
        self.last_error = Some(message);
    }

    pub fn instance_deleted(&mut self, instance_id: &str) {
        self.instances.retain(|i| i.id != instance_id);
    }

    pub fn instance_by_id(&self, instance_id: &str) -> Option<&Instance> {
        self.instances.iter().find(|i| i.id == instance_id)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Fresh-start policy: a refetch replaces the whole list and discards
    /// every in-progress edit and draft, saved or not, along with the
    /// active selection.
    pub fn queries_loaded(&mut self, queries: Vec<SavedQuery>) {
        self.queries = queries;
        self.edits.clear();
        self.drafts.clear();
        self.active_query_id = None;
        self.last_error = None;
    }

    pub fn queries_failed(&mut self, message: String) {
        self.last_error = Some(message);
    }

    pub fn query_by_id(&self, id: Uuid) -> Option<&SavedQuery> {
        self.queries.iter().find(|q| q.id == id)
    }

    /// Create an in-memory draft with a client-generated id. It joins the
    /// query list immediately but only reaches the server on save.
    pub fn new_draft(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        let name = naming::derive_query_name(DRAFT_TEMPLATE).unwrap_or_else(|| "untitled".into());
        self.queries.push(SavedQuery {
            id,
            name,
            content: DRAFT_TEMPLATE.to_string(),
        });
        self.drafts.insert(id);
        id
    }

    pub fn is_draft(&self, id: Uuid) -> bool {
        self.drafts.contains(&id)
    }

    // ── Edits ────────────────────────────────────────────────────────────

    /// Set the active query. Lazily creates its working copy from the
    /// stored query on first selection. Selecting an unknown id clears the
    /// selection and reports whether it was found.
    pub fn select_query(&mut self, id: Option<Uuid>) -> bool {
        match id {
            None => {
                self.active_query_id = None;
                true
            }
            Some(id) => {
                let Some(query) = self.query_by_id(id) else {
                    self.active_query_id = None;
                    return false;
                };
                if !self.edits.contains_key(&id) {
                    self.edits.insert(id, QueryEdit::from_query(query));
                }
                self.active_query_id = Some(id);
                true
            }
        }
    }

    pub fn edit_for(&self, id: Uuid) -> Option<&QueryEdit> {
        self.edits.get(&id)
    }

    pub fn active_edit(&self) -> Option<&QueryEdit> {
        self.active_query_id.and_then(|id| self.edits.get(&id))
    }

    /// Replace the working content of a query. The derived name is
    /// re-extracted from the new content; when no usable declaration is
    /// present the previous name is kept (the explicit fallback path).
    /// No-op when the query has no working copy.
    pub fn update_content(&mut self, id: Uuid, content: String) {
        let Some(edit) = self.edits.get_mut(&id) else {
            return;
        };
        if let Some(name) = naming::derive_query_name(&content) {
            edit.name = name;
        }
        edit.content = content;
        edit.recompute_dirty();
    }

    /// Reset a working copy to its last committed value.
    pub fn revert(&mut self, id: Uuid) {
        if let Some(edit) = self.edits.get_mut(&id) {
            edit.content = edit.original_content.clone();
            edit.name = edit.original_name.clone();
            edit.dirty = false;
        }
    }

    /// Commit a successful save. The saved values become the new committed
    /// baseline; the working copy is left alone so keystrokes typed while the
    /// save was in flight are kept (and stay marked unsaved). Returns `true`
    /// when the id was already in the local list (the entry is replaced in
    /// place); `false` means the caller should refetch the list.
    pub fn query_saved(&mut self, id: Uuid, name: String, content: String) -> bool {
        self.drafts.remove(&id);
        if let Some(edit) = self.edits.get_mut(&id) {
            edit.original_name = name.clone();
            edit.original_content = content.clone();
            edit.recompute_dirty();
        }
        if let Some(query) = self.queries.iter_mut().find(|q| q.id == id) {
            query.name = name;
            query.content = content;
            true
        } else {
            false
        }
    }

    /// Commit a successful delete (or drop an unsaved draft locally).
    pub fn query_deleted(&mut self, id: Uuid) {
        self.queries.retain(|q| q.id != id);
        self.edits.remove(&id);
        self.drafts.remove(&id);
        if self.active_query_id == Some(id) {
            self.active_query_id = None;
        }
    }

    pub fn has_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    /// True when any working copy differs from its committed value.
    pub fn any_unsaved_changes(&self) -> bool {
        self.edits.values().any(|e| e.dirty)
    }

    /// Derived names of every query except `exclude`, for the duplicate-name
    /// pre-save check. Falls back to the stored name when a query's content
    /// has no usable declaration.
    pub fn other_query_names(&self, exclude: Uuid) -> Vec<String> {
        self.queries
            .iter()
            .filter(|q| q.id != exclude)
            .map(|q| naming::derive_query_name(&q.content).unwrap_or_else(|| q.name.clone()))
            .collect()
    }
}

/// Cursor and viewport of the editor pane, in char offsets over the active
/// edit's content.
#[derive(Default)]
pub struct EditorState {
    pub cursor: usize,
    pub scroll: u16,
}

impl EditorState {
    pub fn clamp_to(&mut self, content: &str) {
        self.cursor = self.cursor.min(content.chars().count());
    }

    /// (line, column) of the cursor, for rendering.
    pub fn position(&self, content: &str) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for c in content.chars().take(self.cursor) {
            if c == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }
}
