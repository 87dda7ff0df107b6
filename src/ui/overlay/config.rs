use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::config::ConfigItem;
use crate::ui::theme::Theme;

use super::{centered_rect, overlay_block, section_header};

pub fn render_config(frame: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect(50, 50, area);
    frame.render_widget(Clear, popup);

    let block = overlay_block(
        "Configuration  [←→] change  [q/Esc] save & close",
        Theme::border_active(),
    );

    let mut lines = vec![Line::from(""), section_header("Settings"), Line::from("")];

    for (i, item) in ConfigItem::ALL.iter().enumerate() {
        let selected = i == app.config_overlay.selected;
        let indicator = if selected { "▸ " } else { "  " };

        let value_str = match item {
            ConfigItem::ColorTheme => app.config.color_theme.label().to_string(),
            ConfigItem::RequestTimeout => format!("{}s", app.config.request_timeout_secs),
        };

        let label_style = if selected {
            Style::default()
                .fg(Theme::border_active())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::fg())
        };

        let value_style = if selected {
            Style::default()
                .fg(Theme::overlay_bg())
                .bg(Theme::border_active())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::fg_dim())
        };

        lines.push(Line::from(vec![
            Span::styled(format!("  {indicator}"), label_style),
            Span::styled(format!("{:<18}", item.label()), label_style),
            Span::styled(format!(" {value_str} "), value_style),
        ]));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, popup);
}
