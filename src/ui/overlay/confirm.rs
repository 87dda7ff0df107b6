use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;

use crate::app::NavTarget;
use crate::ui::theme::Theme;

use super::{centered_rect, overlay_block, separator_line};

// Helper to create a styled button: " key " with background color
fn button(key: &str, bg: Color) -> Span<'static> {
    Span::styled(
        format!(" {key} "),
        Style::default()
            .fg(Theme::overlay_bg())
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )
}

// Standard confirm/abort buttons row
fn confirm_abort_buttons(confirm_color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ", Style::default()),
        button("y", confirm_color),
        Span::styled(" confirm    ", Style::default().fg(Theme::fg_dim())),
        button("Esc", Theme::border_dim()),
        Span::styled(" abort", Style::default().fg(Theme::fg_dim())),
    ])
}

// Render a confirmation dialog with standard layout
fn render_dialog(
    frame: &mut Frame,
    area: Rect,
    width: u16,
    height: u16,
    title: &str,
    border_color: Color,
    lines: Vec<Line<'static>>,
) {
    let popup = centered_rect(width, height, area);
    frame.render_widget(Clear, popup);

    let block = overlay_block(title, border_color);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);
    frame.render_widget(paragraph, popup);
}

pub fn render_confirm_delete_query(frame: &mut Frame, name: &str, is_draft: bool, area: Rect) {
    let color = Theme::border_danger();
    let note = if is_draft {
        "  This draft was never saved and will be discarded."
    } else {
        "  The query will be removed from the server."
    };
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Delete query ", Style::default().fg(Theme::fg())),
            Span::styled(
                name.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled("?", Style::default().fg(Theme::fg())),
        ]),
        Line::from(""),
        Line::from(Span::styled(note, Style::default().fg(Theme::fg_dim()))),
        Line::from(""),
        separator_line(),
        confirm_abort_buttons(color),
    ];
    render_dialog(frame, area, 50, 25, "Delete Query", color, lines);
}

pub fn render_confirm_delete_instance(frame: &mut Frame, name: &str, area: Rect) {
    let color = Theme::border_danger();
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Delete instance ", Style::default().fg(Theme::fg())),
            Span::styled(
                name.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled("?", Style::default().fg(Theme::fg())),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  ⚠ The instance and its saved queries will be destroyed.",
            Style::default().fg(color),
        )),
        Line::from(""),
        separator_line(),
        confirm_abort_buttons(color),
    ];
    render_dialog(frame, area, 50, 25, "Delete Instance", color, lines);
}

pub fn render_discard(frame: &mut Frame, target: &NavTarget, area: Rect) {
    let color = Theme::border_warn();
    let destination = match target {
        NavTarget::Instances => "going back to instances",
        NavTarget::RefreshQueries => "refreshing the list",
        NavTarget::Quit => "quitting",
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  You have unsaved changes.",
            Style::default().fg(Theme::fg()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("  Discard them and continue {destination}?"),
            Style::default().fg(Theme::fg_dim()),
        )),
        Line::from(""),
        separator_line(),
        confirm_abort_buttons(color),
    ];
    render_dialog(frame, area, 50, 25, "Unsaved Changes", color, lines);
}
