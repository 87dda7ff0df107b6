use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};
use ratatui::Frame;

use super::theme::Theme;
use super::util::truncate_to_width;
use crate::app::App;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let total_count = app.workspace.instances.len();
    let indices = app.instance_indices();
    let filtered_count = indices.len();

    let title = if app.should_apply_filter() {
        format!(
            " Instances [{}/{}] (filter: {}) ",
            filtered_count, total_count, app.filter.text
        )
    } else {
        format!(" Instances [{total_count}] ")
    };

    let block = Block::default()
        .title(title)
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_style(Theme::border_active()));

    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Region"),
        Cell::from("Status"),
        Cell::from("vCPU"),
        Cell::from("Memory"),
        Cell::from("Endpoint"),
    ])
    .style(
        Style::default()
            .fg(Theme::fg())
            .add_modifier(Modifier::BOLD),
    );

    let endpoint_width = (area.width.saturating_sub(4) as usize * 6 / 16).max(20);

    let rows: Vec<Row> = indices
        .iter()
        .filter_map(|&i| app.workspace.instances.get(i))
        .map(|instance| {
            let status_style = Style::default().fg(Theme::status_color(&instance.status));
            Row::new(vec![
                Cell::from(instance.name.clone()).style(Style::default().fg(Theme::fg())),
                Cell::from(instance.region.clone()).style(Style::default().fg(Theme::fg_dim())),
                Cell::from(instance.status.label().to_string()).style(status_style),
                Cell::from(instance.vcpu.to_string()).style(Style::default().fg(Theme::fg())),
                Cell::from(format!("{} GB", instance.memory_gb))
                    .style(Style::default().fg(Theme::fg())),
                Cell::from(truncate_to_width(&instance.endpoint, endpoint_width))
                    .style(Style::default().fg(Theme::fg_dim())),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Fill(3),
            Constraint::Fill(2),
            Constraint::Length(12),
            Constraint::Length(5),
            Constraint::Length(7),
            Constraint::Fill(6),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .bg(Theme::highlight_bg())
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("▸ ");

    frame.render_stateful_widget(table, area, &mut app.instances_nav.state);
}
