//! Application state and key handling.

mod actions;
mod panels;
mod state;

pub use actions::{AppAction, InstanceContext};
pub use panels::{ConfirmAction, NavTarget, Pane, ViewMode};
pub use state::{
    EditorState, FilterState, ListNav, QueryEdit, QueryWorkspace, UiFeedback, DRAFT_TEMPLATE,
};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config as MatcherConfig, Matcher};
use uuid::Uuid;

use crate::api::models::{Instance, QueryPayload, SavedQuery};
use crate::config::{AppConfig, ConfigItem};
use crate::ui::theme;
use crate::{editor, naming};

/// Max characters to show in clipboard preview messages
const CLIPBOARD_PREVIEW_LEN: usize = 40;

/// Types that can be filtered with fuzzy matching.
pub trait Filterable {
    fn filter_string(&self) -> String;
}

impl Filterable for Instance {
    fn filter_string(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name,
            self.region,
            self.status.label(),
            self.endpoint
        )
    }
}

impl Filterable for SavedQuery {
    fn filter_string(&self) -> String {
        format!("{} {}", self.name, self.content)
    }
}

/// Selection state for the config overlay.
#[derive(Default)]
pub struct ConfigOverlay {
    pub selected: usize,
}

pub struct App {
    pub running: bool,
    pub pane: Pane,
    pub view_mode: ViewMode,
    /// Keystrokes go to the editor instead of the query list.
    pub editor_focused: bool,

    pub workspace: QueryWorkspace,
    pub editor: EditorState,
    pub selected_instance_id: Option<String>,

    pub instances_nav: ListNav,
    pub queries_nav: ListNav,
    pub filter: FilterState,
    pub feedback: UiFeedback,
    pub overlay_scroll: u16,

    pub config: AppConfig,
    pub config_overlay: ConfigOverlay,

    pub user_id: String,
    pub api_host: String,
}

impl App {
    pub fn new(user_id: String, api_host: String, config: AppConfig) -> Self {
        Self {
            running: true,
            pane: Pane::Instances,
            view_mode: ViewMode::Normal,
            editor_focused: false,
            workspace: QueryWorkspace::default(),
            editor: EditorState::default(),
            selected_instance_id: None,
            instances_nav: ListNav::default(),
            queries_nav: ListNav::default(),
            filter: FilterState::default(),
            feedback: UiFeedback::default(),
            overlay_scroll: 0,
            config,
            config_overlay: ConfigOverlay::default(),
            user_id,
            api_host,
        }
    }

    // ── Derived views ────────────────────────────────────────────────────

    pub fn should_apply_filter(&self) -> bool {
        !self.filter.text.is_empty() && (self.filter.active || self.view_mode == ViewMode::Filter)
    }

    /// Build indices for items, optionally applying fuzzy filter.
    fn filtered_indices<T: Filterable>(&self, items: &[T]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..items.len()).collect();
        if self.should_apply_filter() {
            let mut matcher = Matcher::new(MatcherConfig::DEFAULT);
            let pattern =
                Pattern::parse(&self.filter.text, CaseMatching::Ignore, Normalization::Smart);
            indices.retain(|&i| {
                let haystack = items[i].filter_string();
                let mut buf = Vec::new();
                pattern
                    .score(
                        nucleo_matcher::Utf32Str::new(&haystack, &mut buf),
                        &mut matcher,
                    )
                    .is_some()
            });
        }
        indices
    }

    pub fn instance_indices(&self) -> Vec<usize> {
        match self.pane {
            Pane::Instances => self.filtered_indices(&self.workspace.instances),
            Pane::Queries => (0..self.workspace.instances.len()).collect(),
        }
    }

    pub fn query_indices(&self) -> Vec<usize> {
        match self.pane {
            Pane::Queries => self.filtered_indices(&self.workspace.queries),
            Pane::Instances => (0..self.workspace.queries.len()).collect(),
        }
    }

    pub fn selected_instance(&self) -> Option<&Instance> {
        let idx = self.instances_nav.selected().unwrap_or(0);
        let indices = self.instance_indices();
        let &real_idx = indices.get(idx)?;
        self.workspace.instances.get(real_idx)
    }

    pub fn selected_query(&self) -> Option<&SavedQuery> {
        let idx = self.queries_nav.selected().unwrap_or(0);
        let indices = self.query_indices();
        let &real_idx = indices.get(idx)?;
        self.workspace.queries.get(real_idx)
    }

    /// The instance queries are currently scoped to.
    pub fn current_instance(&self) -> Option<&Instance> {
        let id = self.selected_instance_id.as_deref()?;
        self.workspace.instance_by_id(id)
    }

    fn current_instance_context(&self) -> Option<InstanceContext> {
        self.current_instance().map(|i| InstanceContext {
            instance_id: i.id.clone(),
            instance_name: i.name.clone(),
            cluster_id: i.cluster_id.clone(),
            region: i.region.clone(),
        })
    }

    // ── Navigation ───────────────────────────────────────────────────────

    /// Guarded navigation: targets that would lose unsaved work go through a
    /// discard-confirmation dialog first.
    pub fn request_navigate(&mut self, target: NavTarget) {
        if self.workspace.any_unsaved_changes() {
            self.view_mode = ViewMode::Confirm(ConfirmAction::DiscardEdits(target));
        } else {
            self.perform_navigation(target);
        }
    }

    fn perform_navigation(&mut self, target: NavTarget) {
        match target {
            NavTarget::Instances => {
                self.pane = Pane::Instances;
                self.editor_focused = false;
                self.filter.clear();
                self.workspace.select_query(None);
            }
            NavTarget::RefreshQueries => {
                if let Some(id) = self.selected_instance_id.clone() {
                    self.feedback.loading_queries = true;
                    self.feedback.pending_action =
                        Some(AppAction::FetchQueries { instance_id: id });
                }
            }
            NavTarget::Quit => {
                self.running = false;
            }
        }
    }

    fn open_instance(&mut self) {
        let Some(instance) = self.selected_instance() else {
            return;
        };
        let id = instance.id.clone();
        self.selected_instance_id = Some(id.clone());
        self.pane = Pane::Queries;
        self.editor_focused = false;
        self.filter.clear();
        self.queries_nav.select_first();
        self.feedback.loading_queries = true;
        self.feedback.pending_action = Some(AppAction::FetchQueries { instance_id: id });
    }

    fn open_selected_query(&mut self) {
        let Some(query) = self.selected_query() else {
            return;
        };
        let id = query.id;
        if !self.workspace.select_query(Some(id)) {
            // Not-found is a navigation event, not a hard failure.
            self.feedback.status_message = Some("Query no longer exists".into());
            return;
        }
        self.editor_focused = true;
        if let Some(edit) = self.workspace.active_edit() {
            self.editor.cursor = edit.content.chars().count();
            self.editor.scroll = 0;
        }
    }

    fn new_draft_query(&mut self) {
        let id = self.workspace.new_draft();
        self.workspace.select_query(Some(id));
        self.editor_focused = true;
        if let Some(edit) = self.workspace.active_edit() {
            self.editor.cursor = edit.content.chars().count();
            self.editor.scroll = 0;
        }
        self.feedback.status_message = Some("New draft query".into());
    }

    // ── Save / revert ────────────────────────────────────────────────────

    fn try_save_active_query(&mut self) {
        if self.feedback.save_in_flight {
            return;
        }
        let Some(edit) = self.workspace.active_edit() else {
            return;
        };
        let id = edit.id;
        let content = edit.content.clone();
        let dirty = edit.dirty;
        let other_names = self.workspace.other_query_names(id);

        match naming::validate_save(&content, dirty, &other_names) {
            Ok(name) => {
                let Some(context) = self.current_instance_context() else {
                    self.feedback.status_message = Some("No instance selected".into());
                    return;
                };
                self.feedback.save_in_flight = true;
                self.feedback.status_message = Some(format!("Saving '{name}'..."));
                self.feedback.pending_action = Some(AppAction::SaveQuery {
                    context,
                    query: QueryPayload { id, name, content },
                });
            }
            Err(e) => {
                self.feedback.status_message = Some(format!("Cannot save: {e}"));
            }
        }
    }

    fn revert_active_query(&mut self) {
        let Some(edit) = self.workspace.active_edit() else {
            return;
        };
        let id = edit.id;
        self.workspace.revert(id);
        if let Some(edit) = self.workspace.active_edit() {
            let content = edit.content.clone();
            self.editor.clamp_to(&content);
        }
        self.feedback.status_message = Some("Reverted to last saved version".into());
    }

    // ── Clipboard ────────────────────────────────────────────────────────

    fn copy_to_clipboard(&mut self, text: &str) {
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text)) {
            Ok(()) => {
                let preview: String = text.chars().take(CLIPBOARD_PREVIEW_LEN).collect();
                let suffix = if text.chars().count() > CLIPBOARD_PREVIEW_LEN {
                    "..."
                } else {
                    ""
                };
                self.feedback.status_message = Some(format!("Copied: {preview}{suffix}"));
            }
            Err(e) => {
                self.feedback.status_message = Some(format!("Clipboard error: {e}"));
            }
        }
    }

    fn yank_selected(&mut self) {
        match self.pane {
            Pane::Instances => {
                if let Some(instance) = self.selected_instance() {
                    let text = instance.endpoint.clone();
                    self.copy_to_clipboard(&text);
                }
            }
            Pane::Queries => {
                let text = if self.editor_focused {
                    self.workspace.active_edit().map(|e| e.content.clone())
                } else {
                    self.selected_query().map(|q| q.content.clone())
                };
                if let Some(text) = text {
                    self.copy_to_clipboard(&text);
                }
            }
        }
    }

    // ── Key handling ─────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Layer 1: modal overlays consume all input
        match self.view_mode.clone() {
            ViewMode::Confirm(action) => {
                self.handle_confirm_key(key, action);
                return;
            }
            ViewMode::Help => {
                self.handle_help_key(key);
                return;
            }
            ViewMode::Config => {
                self.handle_config_key(key);
                return;
            }
            ViewMode::Filter => {
                self.handle_filter_key(key);
                return;
            }
            ViewMode::Normal => {}
        }

        // Layer 2: the focused editor owns the keyboard
        if self.pane == Pane::Queries && self.editor_focused {
            self.handle_editor_key(key);
            return;
        }

        // Layer 3: global keys
        if self.handle_global_key(key) {
            return;
        }

        // Layer 4: pane-specific keys
        match self.pane {
            Pane::Instances => self.handle_instances_key(key),
            Pane::Queries => self.handle_queries_key(key),
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                match self.pane {
                    Pane::Instances => self.request_navigate(NavTarget::Quit),
                    Pane::Queries => self.request_navigate(NavTarget::Instances),
                }
                true
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
                true
            }
            KeyCode::Char('?') => {
                self.overlay_scroll = 0;
                self.view_mode = ViewMode::Help;
                true
            }
            KeyCode::Char(',') => {
                self.view_mode = ViewMode::Config;
                true
            }
            KeyCode::Char('y') => {
                self.yank_selected();
                true
            }
            KeyCode::Char('/') => {
                self.view_mode = ViewMode::Filter;
                true
            }
            KeyCode::Char('r') => {
                match self.pane {
                    Pane::Instances => {
                        self.feedback.loading_instances = true;
                        self.feedback.pending_action = Some(AppAction::FetchInstances);
                    }
                    Pane::Queries => self.request_navigate(NavTarget::RefreshQueries),
                }
                true
            }
            _ => false,
        }
    }

    fn handle_instances_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.instances_nav.select_prev();
                self.feedback.status_message = None;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.instance_indices().len();
                self.instances_nav.select_next(max);
                self.feedback.status_message = None;
            }
            KeyCode::Enter => self.open_instance(),
            KeyCode::Char('d') => {
                if self.feedback.delete_in_flight {
                    return;
                }
                if let Some(instance) = self.selected_instance() {
                    self.view_mode =
                        ViewMode::Confirm(ConfirmAction::DeleteInstance(instance.id.clone()));
                }
            }
            _ => {}
        }
    }

    fn handle_queries_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.queries_nav.select_prev();
                self.feedback.status_message = None;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.query_indices().len();
                self.queries_nav.select_next(max);
                self.feedback.status_message = None;
            }
            KeyCode::Enter | KeyCode::Char('i') => self.open_selected_query(),
            KeyCode::Char('n') => self.new_draft_query(),
            KeyCode::Char('d') => {
                if self.feedback.delete_in_flight {
                    return;
                }
                if let Some(query) = self.selected_query() {
                    self.view_mode = ViewMode::Confirm(ConfirmAction::DeleteQuery(query.id));
                }
            }
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                self.editor_focused = false;
                return;
            }
            (KeyCode::Char('s'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.try_save_active_query();
                return;
            }
            (KeyCode::Char('r'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.revert_active_query();
                return;
            }
            _ => {}
        }

        let Some(edit) = self.workspace.active_edit() else {
            return;
        };
        let id = edit.id;
        let content = edit.content.clone();
        self.editor.clamp_to(&content);
        let cursor = self.editor.cursor;

        if let Some(result) = editor::apply_keystroke(&content, cursor, cursor, key) {
            self.workspace.update_content(id, result.text);
            self.editor.cursor = result.selection_start;
            return;
        }
        self.default_editor_input(id, &content, key);
    }

    /// Default text-input behavior for keys the structured editor leaves
    /// unhandled.
    fn default_editor_input(&mut self, id: Uuid, content: &str, key: KeyEvent) {
        let chars: Vec<char> = content.chars().collect();
        let pos = self.editor.cursor.min(chars.len());
        match key.code {
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut text: String = chars[..pos].iter().collect();
                text.push(c);
                text.extend(&chars[pos..]);
                self.workspace.update_content(id, text);
                self.editor.cursor = pos + 1;
            }
            KeyCode::Backspace if pos > 0 => {
                let mut text: String = chars[..pos - 1].iter().collect();
                text.extend(&chars[pos..]);
                self.workspace.update_content(id, text);
                self.editor.cursor = pos - 1;
            }
            KeyCode::Delete if pos < chars.len() => {
                let mut text: String = chars[..pos].iter().collect();
                text.extend(&chars[pos + 1..]);
                self.workspace.update_content(id, text);
            }
            KeyCode::Left => {
                self.editor.cursor = pos.saturating_sub(1);
            }
            KeyCode::Right => {
                self.editor.cursor = (pos + 1).min(chars.len());
            }
            KeyCode::Up | KeyCode::Down => {
                self.move_cursor_vertically(&chars, key.code == KeyCode::Down);
            }
            KeyCode::Home => {
                let ls = chars[..pos]
                    .iter()
                    .rposition(|&c| c == '\n')
                    .map_or(0, |i| i + 1);
                self.editor.cursor = ls;
            }
            KeyCode::End => {
                let le = chars[pos..]
                    .iter()
                    .position(|&c| c == '\n')
                    .map_or(chars.len(), |i| pos + i);
                self.editor.cursor = le;
            }
            _ => {}
        }
    }

    fn move_cursor_vertically(&mut self, chars: &[char], down: bool) {
        let pos = self.editor.cursor.min(chars.len());
        let ls = chars[..pos]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1);
        let col = pos - ls;

        let target_ls = if down {
            match chars[pos..].iter().position(|&c| c == '\n') {
                Some(i) => pos + i + 1,
                None => return,
            }
        } else {
            if ls == 0 {
                return;
            }
            chars[..ls - 1]
                .iter()
                .rposition(|&c| c == '\n')
                .map_or(0, |i| i + 1)
        };
        let target_len = chars[target_ls..]
            .iter()
            .position(|&c| c == '\n')
            .unwrap_or(chars.len() - target_ls);
        self.editor.cursor = target_ls + col.min(target_len);
    }

    // ── Modal overlay handlers ───────────────────────────────────────────

    fn handle_confirm_key(&mut self, key: KeyEvent, action: ConfirmAction) {
        let confirmed = matches!(key.code, KeyCode::Char('y' | 'Y'));
        self.view_mode = ViewMode::Normal;
        if !confirmed {
            self.feedback.status_message = Some("Aborted".into());
            return;
        }
        match action {
            ConfirmAction::DeleteQuery(id) => {
                if self.workspace.is_draft(id) {
                    // Never reached the server; drop it locally.
                    self.workspace.query_deleted(id);
                    self.editor_focused = false;
                    self.feedback.status_message = Some("Draft discarded".into());
                    return;
                }
                let Some(query) = self.workspace.query_by_id(id) else {
                    return;
                };
                let payload = QueryPayload {
                    id: query.id,
                    name: query.name.clone(),
                    content: query.content.clone(),
                };
                let Some(context) = self.current_instance_context() else {
                    return;
                };
                self.feedback.delete_in_flight = true;
                self.feedback.pending_action = Some(AppAction::DeleteQuery {
                    context,
                    query: payload,
                });
            }
            ConfirmAction::DeleteInstance(instance_id) => {
                let Some(instance) = self.workspace.instance_by_id(&instance_id) else {
                    return;
                };
                let context = InstanceContext {
                    instance_id: instance.id.clone(),
                    instance_name: instance.name.clone(),
                    cluster_id: instance.cluster_id.clone(),
                    region: instance.region.clone(),
                };
                self.feedback.delete_in_flight = true;
                self.feedback.pending_action = Some(AppAction::DeleteInstance { context });
            }
            ConfirmAction::DiscardEdits(target) => {
                self.perform_navigation(target);
            }
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
                self.overlay_scroll = 0;
                self.view_mode = ViewMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.overlay_scroll = self.overlay_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.overlay_scroll = self.overlay_scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    fn handle_config_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.feedback.pending_action = Some(AppAction::SaveConfig);
                self.view_mode = ViewMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.config_overlay.selected > 0 {
                    self.config_overlay.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.config_overlay.selected < ConfigItem::ALL.len() - 1 {
                    self.config_overlay.selected += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => self.config_adjust(-1),
            KeyCode::Right | KeyCode::Char('l') => self.config_adjust(1),
            _ => {}
        }
    }

    fn config_adjust(&mut self, direction: i8) {
        match ConfigItem::ALL[self.config_overlay.selected] {
            ConfigItem::ColorTheme => {
                self.config.color_theme = if direction > 0 {
                    self.config.color_theme.next()
                } else {
                    self.config.color_theme.prev()
                };
                theme::set_theme(self.config.color_theme.colors());
            }
            ConfigItem::RequestTimeout => {
                let val = self.config.request_timeout_secs as i64 + i64::from(direction) * 5;
                self.config.request_timeout_secs = val.clamp(5, 120) as u64;
            }
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.filter.clear();
                self.view_mode = ViewMode::Normal;
                self.reset_pane_selection();
            }
            KeyCode::Enter => {
                self.filter.active = !self.filter.text.is_empty();
                self.view_mode = ViewMode::Normal;
                self.reset_pane_selection();
            }
            KeyCode::Backspace => {
                self.filter.pop_char();
                self.reset_pane_selection();
            }
            KeyCode::Char(c) => {
                self.filter.push_char(c);
                self.reset_pane_selection();
            }
            _ => {}
        }
    }

    fn reset_pane_selection(&mut self) {
        match self.pane {
            Pane::Instances => self.instances_nav.select_first(),
            Pane::Queries => self.queries_nav.select_first(),
        }
    }
}

#[cfg(test)]
mod tests;
