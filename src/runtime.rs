//! Main application runtime - terminal event loop and API worker.

use std::time::Duration;

use color_eyre::eyre::{Context, Result};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::api::models::{Instance, QueryPayload, SavedQuery};
use crate::api::ApiClient;
use crate::app::{App, AppAction, InstanceContext, Pane};
use crate::cli::Cli;
use crate::config::AppConfig;
use crate::ui::theme;
use crate::{event, ui};

enum ApiCommand {
    FetchInstances,
    FetchQueries { instance_id: String },
    SaveQuery { context: InstanceContext, query: QueryPayload },
    DeleteQuery { context: InstanceContext, query: QueryPayload },
    DeleteInstance { context: InstanceContext },
}

enum ApiResult {
    Instances(Result<Vec<Instance>, String>),
    /// Tagged with the instance the fetch was issued for, so responses that
    /// arrive after the user moved on can be dropped.
    Queries {
        instance_id: String,
        result: Result<Vec<SavedQuery>, String>,
    },
    QuerySaved {
        name: String,
        result: Result<SavedQuery, String>,
    },
    QueryDeleted {
        id: Uuid,
        name: String,
        result: Result<(), String>,
    },
    InstanceDeleted {
        instance_id: String,
        name: String,
        result: Result<(), String>,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load();
    if let Some(timeout) = cli.timeout {
        config.request_timeout_secs = timeout;
    }
    theme::set_theme(config.color_theme.colors());

    let client = ApiClient::new(
        &cli.api_url,
        cli.user.clone(),
        cli.token.clone(),
        config.request_timeout_secs,
    )
    .context("invalid API configuration\n\nTry: dbdeck --api-url https://api.dbdeck.dev -u my-account\nSee: dbdeck --help")?;

    let mut app = App::new(cli.user.clone(), cli.api_host(), config);

    let (cmd_tx, mut cmd_rx) = mpsc::channel::<ApiCommand>(16);
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<ApiResult>();

    // Background task for API operations
    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            let result = match cmd {
                ApiCommand::FetchInstances => ApiResult::Instances(
                    client.list_instances().await.map_err(|e| e.to_string()),
                ),
                ApiCommand::FetchQueries { instance_id } => {
                    let result = client
                        .list_queries(&instance_id)
                        .await
                        .map_err(|e| e.to_string());
                    ApiResult::Queries {
                        instance_id,
                        result,
                    }
                }
                ApiCommand::SaveQuery { context, query } => {
                    let name = query.name.clone();
                    let result = client
                        .save_query(
                            &context.instance_id,
                            &context.instance_name,
                            &context.cluster_id,
                            &context.region,
                            query,
                        )
                        .await
                        .map_err(|e| e.to_string());
                    ApiResult::QuerySaved { name, result }
                }
                ApiCommand::DeleteQuery { context, query } => {
                    let id = query.id;
                    let name = query.name.clone();
                    let result = client
                        .delete_query(
                            &context.instance_id,
                            &context.instance_name,
                            &context.cluster_id,
                            &context.region,
                            query,
                        )
                        .await
                        .map_err(|e| e.to_string());
                    ApiResult::QueryDeleted { id, name, result }
                }
                ApiCommand::DeleteInstance { context } => {
                    let result = client
                        .delete_instance(
                            &context.cluster_id,
                            &context.region,
                            &context.instance_id,
                        )
                        .await
                        .map_err(|e| e.to_string());
                    ApiResult::InstanceDeleted {
                        instance_id: context.instance_id,
                        name: context.instance_name,
                        result,
                    }
                }
            };
            if result_tx.send(result).is_err() {
                break;
            }
        }
    });

    // Initial fetch
    app.feedback.loading_instances = true;
    let _ = cmd_tx.try_send(ApiCommand::FetchInstances);

    let mut terminal = ratatui::init();
    let mut events = event::EventHandler::new(Duration::from_millis(50));
    let mut spinner_interval = tokio::time::interval(Duration::from_millis(80));

    while app.running {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        tokio::select! {
            _ = spinner_interval.tick() => {
                if app.feedback.busy() {
                    app.feedback.spinner_frame = app.feedback.spinner_frame.wrapping_add(1);
                }
            }
            event = events.next() => {
                match event {
                    Some(event::AppEvent::Key(key)) => app.handle_key(key),
                    Some(event::AppEvent::Resize) => {}
                    None => break,
                }
            }
            result = result_rx.recv() => {
                if let Some(result) = result {
                    apply_result(&mut app, result, &cmd_tx);
                }
            }
        }

        // Process pending actions
        if let Some(action) = app.feedback.pending_action.take() {
            match action {
                AppAction::FetchInstances => {
                    let _ = cmd_tx.try_send(ApiCommand::FetchInstances);
                }
                AppAction::FetchQueries { instance_id } => {
                    let _ = cmd_tx.try_send(ApiCommand::FetchQueries { instance_id });
                }
                AppAction::SaveQuery { context, query } => {
                    let _ = cmd_tx.try_send(ApiCommand::SaveQuery { context, query });
                }
                AppAction::DeleteQuery { context, query } => {
                    let _ = cmd_tx.try_send(ApiCommand::DeleteQuery { context, query });
                }
                AppAction::DeleteInstance { context } => {
                    let _ = cmd_tx.try_send(ApiCommand::DeleteInstance { context });
                }
                AppAction::SaveConfig => {
                    app.config.save();
                }
            }
        }
    }

    ratatui::restore();
    Ok(())
}

fn apply_result(app: &mut App, result: ApiResult, cmd_tx: &mpsc::Sender<ApiCommand>) {
    match result {
        ApiResult::Instances(result) => {
            app.feedback.loading_instances = false;
            match result {
                Ok(instances) => {
                    app.workspace.instances_loaded(instances);
                    clamp_selection(app);
                }
                Err(e) => app.workspace.instances_failed(e),
            }
        }
        ApiResult::Queries {
            instance_id,
            result,
        } => {
            // A response for an instance the user already left is stale.
            if app.selected_instance_id.as_deref() != Some(instance_id.as_str()) {
                return;
            }
            app.feedback.loading_queries = false;
            match result {
                Ok(queries) => {
                    app.workspace.queries_loaded(queries);
                    app.editor_focused = false;
                    clamp_selection(app);
                }
                Err(e) => app.workspace.queries_failed(e),
            }
        }
        ApiResult::QuerySaved { name, result } => {
            app.feedback.save_in_flight = false;
            match result {
                Ok(saved) => {
                    let known =
                        app.workspace
                            .query_saved(saved.id, saved.name.clone(), saved.content);
                    app.feedback.status_message = Some(format!("Saved '{}'", saved.name));
                    if !known {
                        // The server assigned an id we have never seen.
                        if let Some(id) = app.selected_instance_id.clone() {
                            app.feedback.loading_queries = true;
                            let _ = cmd_tx.try_send(ApiCommand::FetchQueries { instance_id: id });
                        }
                    }
                }
                Err(e) => {
                    app.workspace.last_error = Some(format!("save '{name}' failed: {e}"));
                }
            }
        }
        ApiResult::QueryDeleted { id, name, result } => {
            app.feedback.delete_in_flight = false;
            match result {
                Ok(()) => {
                    app.workspace.query_deleted(id);
                    app.editor_focused = false;
                    app.feedback.status_message = Some(format!("Deleted '{name}'"));
                    clamp_selection(app);
                }
                Err(e) => {
                    app.workspace.last_error = Some(format!("delete '{name}' failed: {e}"));
                }
            }
        }
        ApiResult::InstanceDeleted {
            instance_id,
            name,
            result,
        } => {
            app.feedback.delete_in_flight = false;
            match result {
                Ok(()) => {
                    app.workspace.instance_deleted(&instance_id);
                    if app.selected_instance_id.as_deref() == Some(instance_id.as_str()) {
                        app.selected_instance_id = None;
                        app.pane = Pane::Instances;
                        app.editor_focused = false;
                    }
                    app.feedback.status_message = Some(format!("Deleted instance '{name}'"));
                    clamp_selection(app);
                }
                Err(e) => {
                    app.workspace.last_error =
                        Some(format!("delete instance '{name}' failed: {e}"));
                }
            }
        }
    }
}

/// Keep list selections valid after collections shrink or get replaced.
fn clamp_selection(app: &mut App) {
    let instance_count = app.instance_indices().len();
    match app.instances_nav.selected() {
        None if instance_count > 0 => app.instances_nav.select_first(),
        Some(i) if i >= instance_count => {
            app.instances_nav
                .state
                .select(Some(instance_count.saturating_sub(1)));
        }
        _ => {}
    }
    let query_count = app.query_indices().len();
    match app.queries_nav.selected() {
        None if query_count > 0 => app.queries_nav.select_first(),
        Some(i) if i >= query_count => {
            app.queries_nav
                .state
                .select(Some(query_count.saturating_sub(1)));
        }
        _ => {}
    }
}
