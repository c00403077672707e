//! Colours for the terminal client.
//!
//! Rendering code asks for colours by role (muted text, accents, status
//! badges) and never names a colour directly, so light and dark themes only
//! differ here.

use colored::Color;
use crm::model::Theme;

pub struct Palette {
    pub title: Color,
    pub muted: Color,
    pub accent: Color,
    pub editing: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    /// Badge colours for the well-known statuses, by position.
    pub statuses: [Color; 3],
    /// Badge colour for any other status.
    pub other_status: Color,
}

pub static LIGHT: Palette = Palette {
    title: Color::Black,
    muted: Color::BrightBlack,
    accent: Color::Blue,
    editing: Color::Magenta,
    success: Color::Green,
    warning: Color::Yellow,
    error: Color::Red,
    statuses: [Color::Blue, Color::Yellow, Color::Green],
    other_status: Color::BrightBlack,
};

pub static DARK: Palette = Palette {
    title: Color::BrightWhite,
    muted: Color::White,
    accent: Color::BrightCyan,
    editing: Color::BrightMagenta,
    success: Color::BrightGreen,
    warning: Color::BrightYellow,
    error: Color::BrightRed,
    statuses: [Color::BrightCyan, Color::BrightYellow, Color::BrightGreen],
    other_status: Color::White,
};

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}

impl Palette {
    pub fn status(&self, rank: Option<usize>) -> Color {
        rank.and_then(|i| self.statuses.get(i).copied())
            .unwrap_or(self.other_status)
    }
}
