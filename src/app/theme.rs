//! UI 主题：把颜色集中管理，避免散落在渲染代码里。

use crate::kernel::state::{NoticeLevel, ThemeMode};
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct UiTheme {
    pub fg: Color,
    pub bg: Color,
    pub muted_fg: Color,
    pub focus_border: Color,
    pub inactive_border: Color,
    pub accent_fg: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub sidebar_selected_bg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub heading_fg: Color,
    pub code_fg: Color,
    pub code_bg: Color,
    pub link_fg: Color,
    pub quote_fg: Color,
    pub info_fg: Color,
    pub warning_fg: Color,
    pub error_fg: Color,
}

impl UiTheme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            fg: Color::Rgb(0xD4, 0xD4, 0xD4),
            bg: Color::Rgb(0x1E, 0x1E, 0x1E),
            muted_fg: Color::Rgb(0x80, 0x80, 0x80),
            focus_border: Color::Rgb(0x4F, 0xC1, 0xFF),
            inactive_border: Color::Rgb(0x45, 0x45, 0x45),
            accent_fg: Color::Rgb(0xC5, 0x86, 0xC0),
            selection_bg: Color::Rgb(0x26, 0x4F, 0x78),
            selection_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            sidebar_selected_bg: Color::Rgb(0x37, 0x37, 0x3D),
            status_bg: Color::Rgb(0x00, 0x7A, 0xCC),
            status_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            heading_fg: Color::Rgb(0x56, 0x9C, 0xD6),
            code_fg: Color::Rgb(0xCE, 0x91, 0x78),
            code_bg: Color::Rgb(0x2D, 0x2D, 0x2D),
            link_fg: Color::Rgb(0x4E, 0xC9, 0xB0),
            quote_fg: Color::Rgb(0x6A, 0x99, 0x55),
            info_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            warning_fg: Color::Rgb(0xFF, 0xD7, 0x00),
            error_fg: Color::Rgb(0xF4, 0x87, 0x71),
        }
    }

    pub fn light() -> Self {
        Self {
            fg: Color::Rgb(0x33, 0x33, 0x33),
            bg: Color::Rgb(0xFF, 0xFF, 0xFF),
            muted_fg: Color::Rgb(0x8E, 0x8E, 0x8E),
            focus_border: Color::Rgb(0x00, 0x5F, 0xB8),
            inactive_border: Color::Rgb(0xCC, 0xCC, 0xCC),
            accent_fg: Color::Rgb(0xAF, 0x00, 0xDB),
            selection_bg: Color::Rgb(0xAD, 0xD6, 0xFF),
            selection_fg: Color::Rgb(0x00, 0x00, 0x00),
            sidebar_selected_bg: Color::Rgb(0xE4, 0xE6, 0xF1),
            status_bg: Color::Rgb(0x00, 0x5F, 0xB8),
            status_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            heading_fg: Color::Rgb(0x00, 0x00, 0xFF),
            code_fg: Color::Rgb(0xA3, 0x15, 0x15),
            code_bg: Color::Rgb(0xF3, 0xF3, 0xF3),
            link_fg: Color::Rgb(0x26, 0x7F, 0x99),
            quote_fg: Color::Rgb(0x00, 0x80, 0x00),
            info_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            warning_fg: Color::Rgb(0xFF, 0xE0, 0x66),
            error_fg: Color::Rgb(0xFF, 0xB4, 0xA8),
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted_fg).bg(self.bg)
    }

    pub fn border(&self, focused: bool) -> Style {
        let color = if focused {
            self.focus_border
        } else {
            self.inactive_border
        };
        Style::default().fg(color).bg(self.bg)
    }

    pub fn selection(&self) -> Style {
        Style::default().fg(self.selection_fg).bg(self.selection_bg)
    }

    pub fn status(&self) -> Style {
        Style::default().fg(self.status_fg).bg(self.status_bg)
    }

    pub fn notice(&self, level: NoticeLevel) -> Style {
        let fg = match level {
            NoticeLevel::Info => self.info_fg,
            NoticeLevel::Warning => self.warning_fg,
            NoticeLevel::Error => self.error_fg,
        };
        let style = Style::default().fg(fg).bg(self.status_bg);
        if level == NoticeLevel::Info {
            style
        } else {
            style.add_modifier(Modifier::BOLD)
        }
    }
}

impl Default for UiTheme {
    fn default() -> Self {
        Self::dark()
    }
}
