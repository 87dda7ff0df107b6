use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct LayoutAreas {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

pub fn compute_layout(area: Rect) -> LayoutAreas {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(area);

    LayoutAreas {
        header: outer[0],
        body: outer[1],
        footer: outer[2],
    }
}

/// Split the queries pane body into the saved-query list and the editor.
pub fn split_queries(body: Rect) -> (Rect, Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(body);
    (cols[0], cols[1])
}
