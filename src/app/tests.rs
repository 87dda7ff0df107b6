use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use uuid::Uuid;

use super::*;
use crate::api::models::{Instance, InstanceStatus, SavedQuery};
use crate::config::AppConfig;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn instance(id: &str, name: &str) -> Instance {
    Instance {
        id: id.to_string(),
        name: name.to_string(),
        region: "eu-west-1".to_string(),
        status: InstanceStatus::Active,
        vcpu: 2,
        memory_gb: 4,
        endpoint: format!("{name}.db.example.com"),
        cluster_id: "cluster-1".to_string(),
    }
}

fn saved_query(name: &str, content: &str) -> SavedQuery {
    SavedQuery {
        id: Uuid::new_v4(),
        name: name.to_string(),
        content: content.to_string(),
    }
}

fn make_app() -> App {
    let mut app = App::new(
        "user-1".to_string(),
        "api.example.com".to_string(),
        AppConfig::default(),
    );
    app.workspace
        .instances_loaded(vec![instance("inst-1", "alpha"), instance("inst-2", "beta")]);
    app.instances_nav.select_first();
    app
}

fn make_app_with_queries(queries: Vec<SavedQuery>) -> App {
    let mut app = make_app();
    app.selected_instance_id = Some("inst-1".to_string());
    app.pane = Pane::Queries;
    app.workspace.queries_loaded(queries);
    app.queries_nav.select_first();
    app
}

// ── Workspace: edits and dirty tracking ─────────────────────────────────

#[test]
fn select_query_creates_working_copy_lazily() {
    let q = saved_query("list_users", "QUERY list_users ($limit) =>\n");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q]);

    assert!(app.workspace.edit_for(id).is_none());
    assert!(app.workspace.select_query(Some(id)));
    let edit = app.workspace.edit_for(id).unwrap();
    assert_eq!(edit.content, "QUERY list_users ($limit) =>\n");
    assert!(!edit.dirty);
}

#[test]
fn select_unknown_query_clears_selection() {
    let mut app = make_app_with_queries(vec![saved_query("a", "QUERY a () =>")]);
    assert!(!app.workspace.select_query(Some(Uuid::new_v4())));
    assert_eq!(app.workspace.active_query_id, None);
}

#[test]
fn dirty_flag_tracks_divergence_from_original() {
    let q = saved_query("list_users", "QUERY list_users () =>");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q]);
    app.workspace.select_query(Some(id));

    app.workspace
        .update_content(id, "QUERY list_users () => changed".to_string());
    assert!(app.workspace.edit_for(id).unwrap().dirty);

    // Typing back to the original content clears the flag again.
    app.workspace
        .update_content(id, "QUERY list_users () =>".to_string());
    assert!(!app.workspace.edit_for(id).unwrap().dirty);
}

#[test]
fn update_content_rederives_name() {
    let q = saved_query("old_name", "QUERY old_name () =>");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q]);
    app.workspace.select_query(Some(id));

    app.workspace
        .update_content(id, "QUERY FetchAllOrders ($region) =>".to_string());
    assert_eq!(app.workspace.edit_for(id).unwrap().name, "fetch_all_orders");
}

#[test]
fn name_falls_back_to_previous_when_declaration_removed() {
    let q = saved_query("keep_me", "QUERY keep_me () =>");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q]);
    app.workspace.select_query(Some(id));

    app.workspace
        .update_content(id, "no declaration here".to_string());
    assert_eq!(app.workspace.edit_for(id).unwrap().name, "keep_me");
}

#[test]
fn revert_restores_committed_content_and_name() {
    let q = saved_query("list_users", "QUERY list_users () =>");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q]);
    app.workspace.select_query(Some(id));
    app.workspace
        .update_content(id, "QUERY renamed () => body".to_string());

    app.workspace.revert(id);
    let edit = app.workspace.edit_for(id).unwrap();
    assert_eq!(edit.content, "QUERY list_users () =>");
    assert_eq!(edit.name, "list_users");
    assert!(!edit.dirty);
}

// ── Workspace: fresh-start refetch and failures ─────────────────────────

#[test]
fn refetch_discards_all_edits_drafts_and_selection() {
    let q = saved_query("a", "QUERY a () =>");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q]);
    app.workspace.select_query(Some(id));
    app.workspace.update_content(id, "QUERY a () => edited".to_string());
    let draft_id = app.workspace.new_draft();

    app.workspace
        .queries_loaded(vec![saved_query("b", "QUERY b () =>")]);

    assert!(!app.workspace.has_edits());
    assert!(!app.workspace.is_draft(draft_id));
    assert_eq!(app.workspace.active_query_id, None);
    assert_eq!(app.workspace.queries.len(), 1);
    assert_eq!(app.workspace.queries[0].name, "b");
}

#[test]
fn fetch_failure_leaves_collections_untouched() {
    let q = saved_query("a", "QUERY a () =>");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q.clone()]);
    app.workspace.select_query(Some(id));
    app.workspace.update_content(id, "QUERY a () => wip".to_string());

    app.workspace.queries_failed("connection reset".to_string());
    app.workspace.instances_failed("gateway timeout".to_string());

    assert_eq!(app.workspace.queries, vec![q]);
    assert_eq!(app.workspace.instances.len(), 2);
    assert_eq!(app.workspace.edit_for(id).unwrap().content, "QUERY a () => wip");
    assert_eq!(app.workspace.active_query_id, Some(id));
    assert!(app.workspace.last_error.is_some());
}

#[test]
fn save_success_replaces_list_entry_in_place() {
    let q = saved_query("a", "QUERY a () =>");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q, saved_query("b", "QUERY b () =>")]);
    app.workspace.select_query(Some(id));
    app.workspace
        .update_content(id, "QUERY a_two () => body".to_string());

    let known = app
        .workspace
        .query_saved(id, "a_two".to_string(), "QUERY a_two () => body".to_string());

    assert!(known);
    assert_eq!(app.workspace.queries.len(), 2);
    assert_eq!(app.workspace.queries[0].name, "a_two");
    assert!(!app.workspace.edit_for(id).unwrap().dirty);
}

#[test]
fn typing_during_an_in_flight_save_survives_the_success_result() {
    let q = saved_query("a", "QUERY a () =>");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q]);
    app.workspace.select_query(Some(id));
    app.workspace
        .update_content(id, "QUERY a_two () => body".to_string());

    // The save request carries the content as of the keypress; more typing
    // happens before the response lands.
    app.workspace
        .update_content(id, "QUERY a_two () => body extended".to_string());
    app.workspace
        .query_saved(id, "a_two".to_string(), "QUERY a_two () => body".to_string());

    let edit = app.workspace.edit_for(id).unwrap();
    assert_eq!(edit.content, "QUERY a_two () => body extended");
    assert_eq!(edit.original_content, "QUERY a_two () => body");
    assert!(edit.dirty);
    assert_eq!(app.workspace.queries[0].content, "QUERY a_two () => body");
}

#[test]
fn save_success_for_unknown_id_requests_refetch() {
    let mut app = make_app_with_queries(vec![saved_query("a", "QUERY a () =>")]);
    let known = app
        .workspace
        .query_saved(Uuid::new_v4(), "x".to_string(), "QUERY x () =>".to_string());
    assert!(!known);
    assert_eq!(app.workspace.queries.len(), 1);
}

#[test]
fn delete_success_removes_query_and_clears_selection() {
    let q = saved_query("a", "QUERY a () =>");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q]);
    app.workspace.select_query(Some(id));

    app.workspace.query_deleted(id);
    assert!(app.workspace.queries.is_empty());
    assert_eq!(app.workspace.active_query_id, None);
    assert!(app.workspace.edit_for(id).is_none());
}

// ── Save validation through the app ─────────────────────────────────────

#[test]
fn duplicate_name_rejected_before_any_request() {
    let q1 = saved_query("list_users", "QUERY list_users () =>");
    let q2 = saved_query("count_rows", "QUERY count_rows () =>");
    let id = q2.id;
    let mut app = make_app_with_queries(vec![q1, q2]);
    app.workspace.select_query(Some(id));
    app.editor_focused = true;
    app.workspace
        .update_content(id, "QUERY list_users ($x) => clash".to_string());
    let before = app.workspace.queries.clone();

    app.handle_key(ctrl('s'));

    assert!(app.feedback.pending_action.is_none());
    assert!(!app.feedback.save_in_flight);
    assert_eq!(app.workspace.queries, before);
    let msg = app.feedback.status_message.as_deref().unwrap();
    assert!(msg.contains("already named 'list_users'"), "got: {msg}");
}

#[test]
fn empty_and_unchanged_queries_are_rejected() {
    let q = saved_query("a", "QUERY a () =>");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q]);
    app.workspace.select_query(Some(id));
    app.editor_focused = true;

    // Unchanged content: nothing to save.
    app.handle_key(ctrl('s'));
    assert!(app.feedback.pending_action.is_none());
    assert!(app
        .feedback
        .status_message
        .as_deref()
        .unwrap()
        .contains("no changes"));

    // Whitespace-only content: empty.
    app.workspace.update_content(id, "   \n".to_string());
    app.handle_key(ctrl('s'));
    assert!(app.feedback.pending_action.is_none());
    assert!(app
        .feedback
        .status_message
        .as_deref()
        .unwrap()
        .contains("empty"));
}

#[test]
fn malformed_declaration_is_rejected() {
    let q = saved_query("a", "QUERY a () =>");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q]);
    app.workspace.select_query(Some(id));
    app.editor_focused = true;
    app.workspace
        .update_content(id, "SELECT * FROM things".to_string());

    app.handle_key(ctrl('s'));
    assert!(app.feedback.pending_action.is_none());
    assert!(app
        .feedback
        .status_message
        .as_deref()
        .unwrap()
        .contains("declaration"));
}

#[test]
fn valid_save_queues_request_with_derived_name() {
    let q = saved_query("a", "QUERY a () =>");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q]);
    app.workspace.select_query(Some(id));
    app.editor_focused = true;
    app.workspace
        .update_content(id, "QUERY WeeklyReport ($week) => body".to_string());

    app.handle_key(ctrl('s'));

    assert!(app.feedback.save_in_flight);
    match app.feedback.pending_action.take() {
        Some(AppAction::SaveQuery { context, query }) => {
            assert_eq!(context.instance_id, "inst-1");
            assert_eq!(query.id, id);
            assert_eq!(query.name, "weekly_report");
        }
        other => panic!("unexpected action: {other:?}"),
    }
}

#[test]
fn save_is_suppressed_while_one_is_in_flight() {
    let q = saved_query("a", "QUERY a () =>");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q]);
    app.workspace.select_query(Some(id));
    app.editor_focused = true;
    app.workspace
        .update_content(id, "QUERY a ($x) => v2".to_string());

    app.handle_key(ctrl('s'));
    let first = app.feedback.pending_action.take();
    assert!(first.is_some());

    app.handle_key(ctrl('s'));
    assert!(app.feedback.pending_action.is_none());
}

// ── Drafts ──────────────────────────────────────────────────────────────

#[test]
fn new_draft_opens_editor_with_template() {
    let mut app = make_app_with_queries(vec![]);
    app.handle_key(key(KeyCode::Char('n')));

    assert!(app.editor_focused);
    let edit = app.workspace.active_edit().unwrap();
    assert_eq!(edit.content, DRAFT_TEMPLATE);
    assert!(app.workspace.is_draft(edit.id));
    assert_eq!(app.workspace.queries.len(), 1);
}

#[test]
fn deleting_a_draft_never_reaches_the_runtime() {
    let mut app = make_app_with_queries(vec![]);
    app.handle_key(key(KeyCode::Char('n')));
    app.handle_key(key(KeyCode::Esc)); // leave editor
    app.handle_key(key(KeyCode::Char('d')));
    assert!(matches!(app.view_mode, ViewMode::Confirm(ConfirmAction::DeleteQuery(_))));

    app.handle_key(key(KeyCode::Char('y')));
    assert!(app.workspace.queries.is_empty());
    assert!(app.feedback.pending_action.is_none());
    assert!(!app.feedback.delete_in_flight);
}

// ── Guarded navigation ──────────────────────────────────────────────────

#[test]
fn leaving_queries_with_unsaved_changes_asks_first() {
    let q = saved_query("a", "QUERY a () =>");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q]);
    app.workspace.select_query(Some(id));
    app.workspace.update_content(id, "QUERY a () => wip".to_string());

    app.handle_key(key(KeyCode::Char('q')));
    assert_eq!(
        app.view_mode,
        ViewMode::Confirm(ConfirmAction::DiscardEdits(NavTarget::Instances))
    );
    assert_eq!(app.pane, Pane::Queries);

    // Abort keeps us where we were, edit intact.
    app.handle_key(key(KeyCode::Char('n')));
    assert_eq!(app.view_mode, ViewMode::Normal);
    assert_eq!(app.pane, Pane::Queries);
    assert!(app.workspace.edit_for(id).unwrap().dirty);

    // Confirming actually navigates.
    app.handle_key(key(KeyCode::Char('q')));
    app.handle_key(key(KeyCode::Char('y')));
    assert_eq!(app.pane, Pane::Instances);
}

#[test]
fn leaving_queries_without_changes_is_immediate() {
    let mut app = make_app_with_queries(vec![saved_query("a", "QUERY a () =>")]);
    app.handle_key(key(KeyCode::Char('q')));
    assert_eq!(app.pane, Pane::Instances);
    assert_eq!(app.view_mode, ViewMode::Normal);
}

#[test]
fn refresh_with_unsaved_changes_is_guarded() {
    let q = saved_query("a", "QUERY a () =>");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q]);
    app.workspace.select_query(Some(id));
    app.workspace.update_content(id, "QUERY a () => wip".to_string());

    app.handle_key(key(KeyCode::Char('r')));
    assert!(app.feedback.pending_action.is_none());
    assert_eq!(
        app.view_mode,
        ViewMode::Confirm(ConfirmAction::DiscardEdits(NavTarget::RefreshQueries))
    );

    app.handle_key(key(KeyCode::Char('y')));
    assert!(matches!(
        app.feedback.pending_action,
        Some(AppAction::FetchQueries { .. })
    ));
}

#[test]
fn quit_from_instances_with_unsaved_changes_is_guarded() {
    let q = saved_query("a", "QUERY a () =>");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q]);
    app.workspace.select_query(Some(id));
    app.workspace.update_content(id, "QUERY a () => wip".to_string());
    app.handle_key(key(KeyCode::Char('q'))); // back to instances
    app.handle_key(key(KeyCode::Char('y')));
    assert_eq!(app.pane, Pane::Instances);

    // Edits survive navigation; quitting is still guarded.
    app.handle_key(key(KeyCode::Char('q')));
    assert_eq!(
        app.view_mode,
        ViewMode::Confirm(ConfirmAction::DiscardEdits(NavTarget::Quit))
    );
    app.handle_key(key(KeyCode::Char('y')));
    assert!(!app.running);
}

// ── Key routing ─────────────────────────────────────────────────────────

#[test]
fn enter_on_instance_scopes_queries_and_fetches() {
    let mut app = make_app();
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.pane, Pane::Queries);
    assert_eq!(app.selected_instance_id.as_deref(), Some("inst-1"));
    assert!(app.feedback.loading_queries);
    assert!(matches!(
        app.feedback.pending_action,
        Some(AppAction::FetchQueries { ref instance_id }) if instance_id == "inst-1"
    ));
}

#[test]
fn editor_receives_structured_keystrokes() {
    let q = saved_query("a", "QUERY a () =>\n");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q]);
    app.handle_key(key(KeyCode::Enter)); // open editor, cursor at end

    app.handle_key(key(KeyCode::Char('{')));
    let edit = app.workspace.edit_for(id).unwrap();
    assert_eq!(edit.content, "QUERY a () =>\n{}");
    assert_eq!(app.editor.cursor, "QUERY a () =>\n{".chars().count());

    app.handle_key(key(KeyCode::Enter));
    let edit = app.workspace.edit_for(id).unwrap();
    assert_eq!(edit.content, "QUERY a () =>\n{\n    \n}");
}

#[test]
fn plain_typing_goes_through_default_input() {
    let q = saved_query("a", "QUERY a");
    let id = q.id;
    let mut app = make_app_with_queries(vec![q]);
    app.handle_key(key(KeyCode::Enter));

    app.handle_key(key(KeyCode::Char('!')));
    assert_eq!(app.workspace.edit_for(id).unwrap().content, "QUERY a!");

    app.handle_key(key(KeyCode::Backspace));
    assert_eq!(app.workspace.edit_for(id).unwrap().content, "QUERY a");
}

#[test]
fn esc_leaves_editor_before_leaving_pane() {
    let mut app = make_app_with_queries(vec![saved_query("a", "QUERY a () =>")]);
    app.handle_key(key(KeyCode::Enter));
    assert!(app.editor_focused);

    app.handle_key(key(KeyCode::Esc));
    assert!(!app.editor_focused);
    assert_eq!(app.pane, Pane::Queries);

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.pane, Pane::Instances);
}

#[test]
fn delete_instance_goes_through_confirmation() {
    let mut app = make_app();
    app.handle_key(key(KeyCode::Char('d')));
    assert!(matches!(
        app.view_mode,
        ViewMode::Confirm(ConfirmAction::DeleteInstance(ref id)) if id == "inst-1"
    ));

    app.handle_key(key(KeyCode::Char('y')));
    assert!(app.feedback.delete_in_flight);
    assert!(matches!(
        app.feedback.pending_action,
        Some(AppAction::DeleteInstance { ref context }) if context.instance_id == "inst-1"
    ));
}

#[test]
fn filter_narrows_query_list() {
    let mut app = make_app_with_queries(vec![
        saved_query("list_users", "QUERY list_users () =>"),
        saved_query("count_rows", "QUERY count_rows () =>"),
    ]);
    app.handle_key(key(KeyCode::Char('/')));
    for c in "list".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
    assert_eq!(app.query_indices(), vec![0]);

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.query_indices().len(), 2);
}

#[test]
fn help_overlay_captures_keys() {
    let mut app = make_app();
    app.handle_key(key(KeyCode::Char('?')));
    assert_eq!(app.view_mode, ViewMode::Help);

    // Pane keys must not leak through the overlay.
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.pane, Pane::Instances);
    assert_eq!(app.view_mode, ViewMode::Normal);
}
