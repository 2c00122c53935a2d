//! Terminal styling and color utilities.
//!
//! ANSI escape code definitions and color detection for the enhanced route
//! view. Trail colors follow the usual trail-map convention.

use skiroute_lib::Difficulty;

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    /// Bold reverse green for START tags.
    pub const TAG_START: &str = "\x1b[1;7;32m";
    /// Bold reverse cyan for LIFT tags.
    pub const TAG_LIFT: &str = "\x1b[1;7;36m";
    /// Bold reverse white for TRAIL tags.
    pub const TAG_TRAIL: &str = "\x1b[1;7;37m";
    /// Bold reverse magenta for GOAL tags.
    pub const TAG_GOAL: &str = "\x1b[1;7;35m";

    /// Bright bold white for emphasis (point and trail names).
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary elements (tree lines, minutes).
    pub const GRAY: &str = "\x1b[90m";
    pub const GREEN: &str = "\x1b[32m";
    pub const BLUE: &str = "\x1b[34m";
    /// Orange (256-color) for blue-black runs.
    pub const ORANGE: &str = "\x1b[38;5;208m";
    pub const RED: &str = "\x1b[31m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color
/// is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_start: &'static str,
    pub tag_lift: &'static str,
    pub tag_trail: &'static str,
    pub tag_goal: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
    pub blue: &'static str,
    pub orange: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_start: colors::TAG_START,
            tag_lift: colors::TAG_LIFT,
            tag_trail: colors::TAG_TRAIL,
            tag_goal: colors::TAG_GOAL,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
            blue: colors::BLUE,
            orange: colors::ORANGE,
            red: colors::RED,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_start: "",
            tag_lift: "",
            tag_trail: "",
            tag_goal: "",
            white_bold: "",
            gray: "",
            green: "",
            blue: "",
            orange: "",
            red: "",
        }
    }

    /// `colored()` if the terminal supports ANSI colors, otherwise `plain()`.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Color for a trail difficulty label. Unknown labels stay unstyled.
    #[must_use]
    pub fn difficulty(&self, label: &str) -> &'static str {
        match label.parse::<Difficulty>() {
            Ok(Difficulty::Green) => self.green,
            Ok(Difficulty::Blue) => self.blue,
            Ok(Difficulty::BlueBlack) => self.orange,
            Ok(Difficulty::Black) => self.white_bold,
            Ok(Difficulty::DoubleBlack) => self.red,
            Err(_) => self.reset,
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects `NO_COLOR` (https://no-color.org/) and `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}
