use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::theme::Theme;
use crate::app::{App, Pane, ViewMode};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default()
        .fg(Theme::border_active())
        .add_modifier(Modifier::BOLD);
    let sep_style = Style::default().fg(Theme::border_dim());
    let desc_style = Style::default().fg(Theme::fg());

    if app.view_mode == ViewMode::Filter {
        let spans = vec![
            Span::styled(" /", key_style),
            Span::styled(app.filter.text.clone(), desc_style),
            Span::styled("█", Style::default().fg(Theme::fg_dim())),
            Span::styled("  enter", key_style),
            Span::styled(" apply", desc_style),
            Span::styled(" │ ", sep_style),
            Span::styled("esc", key_style),
            Span::styled(" clear", desc_style),
        ];
        let paragraph =
            Paragraph::new(Line::from(spans)).style(Style::default().bg(Theme::header_bg()));
        frame.render_widget(paragraph, area);
        return;
    }

    let hints: &[(&str, &str)] = if app.pane == Pane::Queries && app.editor_focused {
        &[
            ("esc", "list"),
            ("^s", "save"),
            ("^r", "revert"),
            ("tab", "indent"),
            ("s-tab", "outdent"),
            ("y", "yank"),
        ]
    } else if app.pane == Pane::Queries {
        &[
            ("↑↓", "select"),
            ("enter", "edit"),
            ("n", "new"),
            ("d", "delete"),
            ("r", "refresh"),
            ("/", "filter"),
            ("y", "yank"),
            ("esc", "instances"),
            ("?", "help"),
        ]
    } else {
        &[
            ("↑↓", "select"),
            ("enter", "queries"),
            ("d", "delete"),
            ("r", "refresh"),
            ("/", "filter"),
            ("y", "yank endpoint"),
            ("q", "quit"),
            ("?", "help"),
            (",", "config"),
        ]
    };

    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i == 0 {
            spans.push(Span::styled(format!(" {key}"), key_style));
        } else {
            spans.push(Span::styled(" │ ", sep_style));
            spans.push(Span::styled((*key).to_string(), key_style));
        }
        spans.push(Span::styled(format!(" {desc}"), desc_style));
    }

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Theme::header_bg()));

    frame.render_widget(paragraph, area);
}
