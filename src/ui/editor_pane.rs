use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use super::ql_highlight;
use super::theme::Theme;
use crate::app::App;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(edit) = app.workspace.active_edit() else {
        let block = Block::default()
            .title(" Editor ")
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style(Theme::border_dim()));
        let hint = Paragraph::new(Line::from(Span::styled(
            "  enter on a query to edit, n for a new one",
            Style::default().fg(Theme::fg_dim()),
        )))
        .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let name = edit.name.clone();
    let dirty = edit.dirty;
    let content = edit.content.clone();

    let marker = if dirty { " *" } else { "" };
    let border_color = if app.editor_focused {
        Theme::border_active()
    } else {
        Theme::border_dim()
    };
    let block = Block::default()
        .title(format!(" {name}{marker} "))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_style(border_color));

    let inner = block.inner(area);

    // Keep the cursor line inside the viewport.
    let (cursor_line, cursor_col) = app.editor.position(&content);
    let height = inner.height.max(1) as usize;
    if cursor_line < app.editor.scroll as usize {
        app.editor.scroll = cursor_line as u16;
    } else if cursor_line >= app.editor.scroll as usize + height {
        app.editor.scroll = (cursor_line + 1 - height) as u16;
    }

    let lines: Vec<Line> = content.split('\n').map(ql_highlight::highlight_line).map(Line::from).collect();
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((app.editor.scroll, 0));
    frame.render_widget(paragraph, area);

    if app.editor_focused {
        let x = inner.x + cursor_col.min(u16::MAX as usize) as u16;
        let y = inner.y + (cursor_line - app.editor.scroll as usize) as u16;
        if x < inner.x + inner.width && y < inner.y + inner.height {
            frame.set_cursor_position((x, y));
        }
    }
}
