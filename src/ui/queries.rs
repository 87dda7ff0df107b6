use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};
use ratatui::Frame;

use super::theme::Theme;
use super::util::inline_preview;
use crate::app::App;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let total_count = app.workspace.queries.len();
    let indices = app.query_indices();
    let filtered_count = indices.len();

    let title = if app.should_apply_filter() {
        format!(
            " Queries [{}/{}] (filter: {}) ",
            filtered_count, total_count, app.filter.text
        )
    } else {
        format!(" Queries [{total_count}] ")
    };

    let border_color = if app.editor_focused {
        Theme::border_dim()
    } else {
        Theme::border_active()
    };
    let block = Block::default()
        .title(title)
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_style(border_color));

    let preview_width = (area.width.saturating_sub(6) as usize / 2).max(10);

    let rows: Vec<Row> = indices
        .iter()
        .filter_map(|&i| app.workspace.queries.get(i))
        .map(|query| {
            // The working copy, if there is one, is the truth for display.
            let edit = app.workspace.edit_for(query.id);
            let name = edit.map_or(query.name.as_str(), |e| e.name.as_str());
            let dirty = edit.is_some_and(|e| e.dirty);
            let marker = if dirty {
                "*"
            } else if app.workspace.is_draft(query.id) {
                "+"
            } else {
                " "
            };
            let marker_style = Style::default().fg(Theme::border_warn());
            let name_style = if app.workspace.active_query_id == Some(query.id) {
                Style::default()
                    .fg(Theme::border_active())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Theme::fg())
            };
            let content = edit.map_or(query.content.as_str(), |e| e.content.as_str());
            Row::new(vec![
                Cell::from(marker.to_string()).style(marker_style),
                Cell::from(name.to_string()).style(name_style),
                Cell::from(inline_preview(content, preview_width))
                    .style(Style::default().fg(Theme::fg_dim())),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Fill(2),
            Constraint::Fill(3),
        ],
    )
    .block(block)
    .row_highlight_style(
        Style::default()
            .bg(Theme::highlight_bg())
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("▸ ");

    frame.render_stateful_widget(table, area, &mut app.queries_nav.state);
}
