mod editor_pane;
mod footer;
mod header;
mod instances;
mod layout;
mod overlay;
mod ql_highlight;
mod queries;
pub mod theme;
mod util;

use ratatui::Frame;

use crate::app::{App, ConfirmAction, Pane, ViewMode};

pub fn render(frame: &mut Frame, app: &mut App) {
    let areas = layout::compute_layout(frame.area());

    header::render(frame, app, areas.header);

    match app.pane {
        Pane::Instances => instances::render(frame, app, areas.body),
        Pane::Queries => {
            let (list_area, editor_area) = layout::split_queries(areas.body);
            queries::render(frame, app, list_area);
            editor_pane::render(frame, app, editor_area);
        }
    }

    footer::render(frame, app, areas.footer);

    match app.view_mode.clone() {
        ViewMode::Help => overlay::render_help(frame, app, frame.area()),
        ViewMode::Config => overlay::render_config(frame, app, frame.area()),
        ViewMode::Confirm(ConfirmAction::DeleteQuery(id)) => {
            let name = app
                .workspace
                .query_by_id(id)
                .map_or("?", |q| q.name.as_str())
                .to_string();
            let is_draft = app.workspace.is_draft(id);
            overlay::render_confirm_delete_query(frame, &name, is_draft, frame.area());
        }
        ViewMode::Confirm(ConfirmAction::DeleteInstance(ref id)) => {
            let name = app
                .workspace
                .instance_by_id(id)
                .map_or("?", |i| i.name.as_str())
                .to_string();
            overlay::render_confirm_delete_instance(frame, &name, frame.area());
        }
        ViewMode::Confirm(ConfirmAction::DiscardEdits(ref target)) => {
            overlay::render_discard(frame, target, frame.area());
        }
        ViewMode::Normal | ViewMode::Filter => {}
    }
}
