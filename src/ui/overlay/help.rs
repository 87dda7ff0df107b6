use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::ui::theme::Theme;

use super::{centered_rect, overlay_block, section_header};

pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect(70, 80, area);
    frame.render_widget(Clear, popup);

    let block = overlay_block("Keybindings  [j/k] scroll  [Esc] close", Theme::border_active());

    let key_style = Style::default()
        .fg(Theme::border_active())
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Theme::fg());

    let entry = |key: &str, desc: &str| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("    {key:<12}"), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let lines = vec![
        Line::from(""),
        section_header("Global"),
        entry("q / Esc", "Back / quit"),
        entry("Ctrl+C", "Force quit"),
        entry("?", "This help screen"),
        entry(",", "Configuration"),
        entry("/", "Filter current list"),
        entry("y", "Copy to clipboard"),
        entry("r", "Refresh current list"),
        Line::from(""),
        section_header("Instances"),
        entry("↑↓ / j k", "Select instance"),
        entry("Enter", "Open saved queries"),
        entry("d", "Delete instance"),
        Line::from(""),
        section_header("Queries"),
        entry("↑↓ / j k", "Select query"),
        entry("Enter / i", "Edit query"),
        entry("n", "New draft query"),
        entry("d", "Delete query"),
        Line::from(""),
        section_header("Editor"),
        entry("Esc", "Back to query list"),
        entry("Ctrl+S", "Save query"),
        entry("Ctrl+R", "Revert to saved version"),
        entry("Tab", "Indent line or selection"),
        entry("Shift+Tab", "Outdent"),
        Line::from(""),
        Line::from(Span::styled(
            "    Queries are named by their QUERY <name> declaration.",
            Style::default().fg(Theme::fg_dim()),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((app.overlay_scroll, 0));
    frame.render_widget(paragraph, popup);
}
