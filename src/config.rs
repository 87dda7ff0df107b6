use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum ColorTheme {
    #[default]
    TokyoNight,
    Dracula,
    Nord,
}

impl ColorTheme {
    pub fn next(self) -> Self {
        match self {
            Self::TokyoNight => Self::Dracula,
            Self::Dracula => Self::Nord,
            Self::Nord => Self::TokyoNight,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::TokyoNight => Self::Nord,
            Self::Dracula => Self::TokyoNight,
            Self::Nord => Self::Dracula,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TokyoNight => "Tokyo Night",
            Self::Dracula => "Dracula",
            Self::Nord => "Nord",
        }
    }

    pub fn colors(self) -> ThemeColors {
        match self {
            Self::TokyoNight => ThemeColors::TOKYO_NIGHT,
            Self::Dracula => ThemeColors::dracula(),
            Self::Nord => ThemeColors::nord(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub header_bg: Color,
    pub fg: Color,
    pub fg_dim: Color,
    pub border_active: Color,
    pub border_warn: Color,
    pub border_danger: Color,
    pub border_ok: Color,
    pub border_dim: Color,
    pub status_active: Color,
    pub status_stopped: Color,
    pub status_redeploying: Color,
    pub overlay_bg: Color,
    pub highlight_bg: Color,
    // Query syntax highlighting
    pub ql_keyword: Color,
    pub ql_string: Color,
    pub ql_number: Color,
    pub ql_comment: Color,
}

impl ThemeColors {
    pub const TOKYO_NIGHT: Self = Self {
        header_bg: Color::Rgb(36, 40, 59),
        fg: Color::Rgb(192, 202, 245),
        fg_dim: Color::Rgb(115, 121, 148),
        border_active: Color::Rgb(125, 207, 255),   // soft cyan
        border_warn: Color::Rgb(224, 175, 104),     // soft amber
        border_danger: Color::Rgb(247, 118, 142),   // soft red
        border_ok: Color::Rgb(158, 206, 106),       // soft green
        border_dim: Color::Rgb(59, 66, 97),         // muted blue-gray
        status_active: Color::Rgb(158, 206, 106),
        status_stopped: Color::Rgb(247, 118, 142),
        status_redeploying: Color::Rgb(224, 175, 104),
        overlay_bg: Color::Rgb(26, 27, 38),
        highlight_bg: Color::Rgb(40, 42, 64),
        ql_keyword: Color::Rgb(198, 120, 221),      // purple
        ql_string: Color::Rgb(152, 195, 121),       // green
        ql_number: Color::Rgb(209, 154, 102),       // orange
        ql_comment: Color::Rgb(92, 99, 112),        // gray
    };

    pub fn dracula() -> Self {
        Self {
            header_bg: Color::Rgb(40, 42, 54),
            fg: Color::Rgb(248, 248, 242),
            fg_dim: Color::Rgb(98, 114, 164),
            border_active: Color::Rgb(139, 233, 253),
            border_warn: Color::Rgb(241, 250, 140),
            border_danger: Color::Rgb(255, 85, 85),
            border_ok: Color::Rgb(80, 250, 123),
            border_dim: Color::Rgb(68, 71, 90),
            status_active: Color::Rgb(80, 250, 123),
            status_stopped: Color::Rgb(255, 85, 85),
            status_redeploying: Color::Rgb(241, 250, 140),
            overlay_bg: Color::Rgb(33, 34, 44),
            highlight_bg: Color::Rgb(55, 57, 74),
            ql_keyword: Color::Rgb(255, 121, 198),  // pink
            ql_string: Color::Rgb(241, 250, 140),   // yellow
            ql_number: Color::Rgb(189, 147, 249),   // purple
            ql_comment: Color::Rgb(98, 114, 164),   // comment gray
        }
    }

    pub fn nord() -> Self {
        Self {
            header_bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(216, 222, 233),
            fg_dim: Color::Rgb(107, 121, 142),
            border_active: Color::Rgb(136, 192, 208),
            border_warn: Color::Rgb(235, 203, 139),
            border_danger: Color::Rgb(191, 97, 106),
            border_ok: Color::Rgb(163, 190, 140),
            border_dim: Color::Rgb(76, 86, 106),
            status_active: Color::Rgb(163, 190, 140),
            status_stopped: Color::Rgb(191, 97, 106),
            status_redeploying: Color::Rgb(235, 203, 139),
            overlay_bg: Color::Rgb(38, 44, 57),
            highlight_bg: Color::Rgb(59, 66, 82),
            ql_keyword: Color::Rgb(180, 142, 173),  // purple (nord15)
            ql_string: Color::Rgb(163, 190, 140),   // green (nord14)
            ql_number: Color::Rgb(208, 135, 112),   // orange (nord12)
            ql_comment: Color::Rgb(76, 86, 106),    // gray (nord3)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub color_theme: ColorTheme,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            color_theme: ColorTheme::TokyoNight,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("dbdeck").join("config.toml"))
    }

    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) {
        let Some(path) = Self::config_path() else {
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(contents) = toml::to_string_pretty(self) {
            let _ = fs::write(&path, contents);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigItem {
    ColorTheme,
    RequestTimeout,
}

impl ConfigItem {
    pub const ALL: [ConfigItem; 2] = [ConfigItem::ColorTheme, ConfigItem::RequestTimeout];

    pub fn label(self) -> &'static str {
        match self {
            Self::ColorTheme => "Color Theme",
            Self::RequestTimeout => "Request Timeout",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_theme_next_cycles() {
        assert_eq!(ColorTheme::TokyoNight.next(), ColorTheme::Dracula);
        assert_eq!(ColorTheme::Dracula.next(), ColorTheme::Nord);
        assert_eq!(ColorTheme::Nord.next(), ColorTheme::TokyoNight);
    }

    #[test]
    fn color_theme_next_prev_inverse() {
        for theme in [ColorTheme::TokyoNight, ColorTheme::Dracula, ColorTheme::Nord] {
            assert_eq!(theme.next().prev(), theme);
            assert_eq!(theme.prev().next(), theme);
        }
    }

    #[test]
    fn color_theme_labels_not_empty() {
        for theme in [ColorTheme::TokyoNight, ColorTheme::Dracula, ColorTheme::Nord] {
            assert!(!theme.label().is_empty(), "{theme:?} has empty label");
        }
    }

    #[test]
    fn app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.color_theme, ColorTheme::TokyoNight);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn app_config_toml_round_trip() {
        let config = AppConfig {
            color_theme: ColorTheme::Nord,
            request_timeout_secs: 45,
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn app_config_partial_toml_uses_defaults() {
        let parsed: AppConfig = toml::from_str("color_theme = \"Dracula\"").unwrap();
        assert_eq!(parsed.color_theme, ColorTheme::Dracula);
        assert_eq!(parsed.request_timeout_secs, 30);
    }

    #[test]
    fn app_config_garbage_toml_falls_back() {
        let parsed: Result<AppConfig, _> = toml::from_str("color_theme = 17");
        assert!(parsed.is_err());
    }

    #[test]
    fn config_items_have_labels() {
        for item in ConfigItem::ALL {
            assert!(!item.label().is_empty());
        }
    }
}
