//! Color palettes for the TUI

use ratatui::prelude::*;
use tracing::debug;

use crate::config::ThemeConfig;

/// Resolved theme (never `Auto`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Podium colors for the top three ranks
    pub rank_first: Color,
    pub rank_second: Color,
    pub rank_third: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub index_color: Color,
    pub onsight_color: Color,

    // Styles
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub filter_color: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_bg: Color,

    // Notice banner colors
    pub banner_bg: Color,
    pub banner_fg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            rank_first: Color::Yellow,
            rank_second: Color::Gray,
            rank_third: Color::Rgb(205, 127, 50),
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            onsight_color: Color::Green,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            filter_color: Color::Magenta,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_bg: Color::Indexed(234),
            banner_bg: Color::Rgb(120, 80, 20),
            banner_fg: Color::White,
        }
    }

    pub fn light() -> Self {
        Self {
            rank_first: Color::Rgb(184, 134, 11),
            rank_second: Color::DarkGray,
            rank_third: Color::Rgb(160, 82, 45),
            row_alt_bg: Color::Indexed(254),
            index_color: Color::Gray,
            onsight_color: Color::Rgb(0, 128, 0),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::DarkGray,
            title_color: Color::Blue,
            filter_color: Color::Magenta,
            status_bar_bg: Color::Indexed(252),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(0, 128, 0),
            flash_error: Color::Red,
            popup_border: Color::Blue,
            popup_bg: Color::Indexed(255),
            banner_bg: Color::Rgb(255, 236, 179),
            banner_fg: Color::Black,
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    /// Color for a 0-based rank position
    pub fn rank_color(&self, idx: usize) -> Option<Color> {
        match idx {
            0 => Some(self.rank_first),
            1 => Some(self.rank_second),
            2 => Some(self.rank_third),
            _ => None,
        }
    }
}

/// Resolve the configured theme. `Auto` queries the terminal background and
/// falls back to dark when the terminal does not answer.
pub fn resolve_theme(config: ThemeConfig) -> Theme {
    match config {
        ThemeConfig::Dark => Theme::Dark,
        ThemeConfig::Light => Theme::Light,
        ThemeConfig::Auto => match terminal_light::luma() {
            Ok(luma) => theme_from_luma(luma),
            Err(e) => {
                debug!(error = %e, "terminal background detection failed, using dark theme");
                Theme::Dark
            }
        },
    }
}

fn theme_from_luma(luma: f32) -> Theme {
    if luma > 0.6 {
        Theme::Light
    } else {
        Theme::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_themes_skip_detection() {
        assert_eq!(resolve_theme(ThemeConfig::Dark), Theme::Dark);
        assert_eq!(resolve_theme(ThemeConfig::Light), Theme::Light);
    }

    #[test]
    fn test_theme_from_luma() {
        assert_eq!(theme_from_luma(0.05), Theme::Dark);
        assert_eq!(theme_from_luma(0.6), Theme::Dark);
        assert_eq!(theme_from_luma(0.95), Theme::Light);
    }

    #[test]
    fn test_rank_color_podium_only() {
        let colors = ThemeColors::dark();
        assert_eq!(colors.rank_color(0), Some(Color::Yellow));
        assert!(colors.rank_color(2).is_some());
        assert!(colors.rank_color(3).is_none());
    }
}
