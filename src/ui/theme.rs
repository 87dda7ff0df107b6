use ratatui::style::{Color, Modifier, Style};
use std::sync::RwLock;

use crate::api::models::InstanceStatus;
use crate::config::ThemeColors;

static ACTIVE_THEME: RwLock<ThemeColors> = RwLock::new(ThemeColors::TOKYO_NIGHT);

pub fn set_theme(colors: ThemeColors) {
    *ACTIVE_THEME.write().unwrap() = colors;
}

pub struct Theme;

impl Theme {
    pub fn header_bg() -> Color {
        ACTIVE_THEME.read().unwrap().header_bg
    }

    pub fn fg() -> Color {
        ACTIVE_THEME.read().unwrap().fg
    }

    pub fn fg_dim() -> Color {
        ACTIVE_THEME.read().unwrap().fg_dim
    }

    pub fn border_active() -> Color {
        ACTIVE_THEME.read().unwrap().border_active
    }

    pub fn border_warn() -> Color {
        ACTIVE_THEME.read().unwrap().border_warn
    }

    pub fn border_danger() -> Color {
        ACTIVE_THEME.read().unwrap().border_danger
    }

    pub fn border_ok() -> Color {
        ACTIVE_THEME.read().unwrap().border_ok
    }

    pub fn border_dim() -> Color {
        ACTIVE_THEME.read().unwrap().border_dim
    }

    pub fn overlay_bg() -> Color {
        ACTIVE_THEME.read().unwrap().overlay_bg
    }

    pub fn highlight_bg() -> Color {
        ACTIVE_THEME.read().unwrap().highlight_bg
    }

    pub fn ql_keyword() -> Color {
        ACTIVE_THEME.read().unwrap().ql_keyword
    }

    pub fn ql_string() -> Color {
        ACTIVE_THEME.read().unwrap().ql_string
    }

    pub fn ql_number() -> Color {
        ACTIVE_THEME.read().unwrap().ql_number
    }

    pub fn ql_comment() -> Color {
        ACTIVE_THEME.read().unwrap().ql_comment
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Self::fg())
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(color: Color) -> Style {
        Style::default().fg(color)
    }

    pub fn status_color(status: &InstanceStatus) -> Color {
        let theme = ACTIVE_THEME.read().unwrap();
        match status {
            InstanceStatus::Active => theme.status_active,
            InstanceStatus::Stopped => theme.status_stopped,
            InstanceStatus::Redeploying => theme.status_redeploying,
            InstanceStatus::Other(_) => theme.fg_dim,
        }
    }
}
