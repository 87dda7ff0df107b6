use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::theme::Theme;
use super::util::truncate_to_width;
use crate::app::{App, Pane};

const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let now = chrono::Local::now().format("%H:%M:%S").to_string();

    let mut spans = vec![
        Span::styled(
            " dbdeck ",
            Style::default()
                .fg(Theme::border_active())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(Theme::border_dim())),
        Span::styled(app.api_host.clone(), Style::default().fg(Theme::fg())),
        Span::styled(" │ ", Style::default().fg(Theme::border_dim())),
        Span::styled(app.user_id.clone(), Style::default().fg(Theme::fg())),
    ];

    if app.pane == Pane::Instances {
        if let Some(fetched_at) = app.workspace.instances_fetched_at {
            let local = fetched_at.with_timezone(&chrono::Local);
            spans.push(Span::styled(
                format!(" │ updated {}", local.format("%H:%M:%S")),
                Style::default().fg(Theme::fg_dim()),
            ));
        }
    }

    if app.pane == Pane::Queries {
        if let Some(instance) = app.current_instance() {
            spans.push(Span::styled(" │ ", Style::default().fg(Theme::border_dim())));
            spans.push(Span::styled(
                instance.name.clone(),
                Style::default()
                    .fg(Theme::status_color(&instance.status))
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" ({})", instance.region),
                Style::default().fg(Theme::fg_dim()),
            ));
        }
    }

    if app.feedback.busy() {
        let frame_idx = app.feedback.spinner_frame as usize % SPINNER_FRAMES.len();
        spans.push(Span::styled(
            format!(" │ {}", SPINNER_FRAMES[frame_idx]),
            Style::default().fg(Theme::border_warn()),
        ));
    }

    if let Some(ref msg) = app.feedback.status_message {
        spans.push(Span::styled(
            format!(" │ {msg}"),
            Style::default().fg(Theme::border_active()),
        ));
    }

    if let Some(ref err) = app.workspace.last_error {
        spans.push(Span::styled(
            format!(" │ ERR: {}", truncate_to_width(err, 48)),
            Style::default()
                .fg(Theme::border_danger())
                .add_modifier(Modifier::BOLD),
        ));
    }

    spans.push(Span::styled(
        format!(" │ {now}"),
        Style::default().fg(Theme::border_dim()),
    ));

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Theme::header_bg()));

    frame.render_widget(paragraph, area);
}
