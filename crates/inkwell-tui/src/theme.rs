//! Color themes.

use ratatui::style::Color;

use crate::highlight::TokenKind;

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub foreground: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub line_number_fg: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub keyword_fg: Color,
    pub string_fg: Color,
    pub comment_fg: Color,
    pub number_fg: Color,
}

pub const DARK: Theme = Theme {
    name: "dark",
    background: Color::Rgb(20, 20, 20),
    foreground: Color::Rgb(220, 220, 220),
    status_bg: Color::Rgb(40, 80, 140),
    status_fg: Color::Rgb(255, 255, 255),
    line_number_fg: Color::Rgb(120, 120, 120),
    selection_bg: Color::Rgb(70, 130, 180),
    selection_fg: Color::Rgb(255, 255, 255),
    keyword_fg: Color::Rgb(255, 215, 0),
    string_fg: Color::Rgb(152, 251, 152),
    comment_fg: Color::Rgb(140, 140, 140),
    number_fg: Color::Rgb(255, 105, 180),
};

pub const LIGHT: Theme = Theme {
    name: "light",
    background: Color::Rgb(250, 250, 250),
    foreground: Color::Rgb(40, 40, 40),
    status_bg: Color::Rgb(173, 216, 230),
    status_fg: Color::Rgb(0, 0, 0),
    line_number_fg: Color::Rgb(150, 150, 150),
    selection_bg: Color::Rgb(200, 230, 255),
    selection_fg: Color::Rgb(0, 0, 0),
    keyword_fg: Color::Rgb(0, 0, 200),
    string_fg: Color::Rgb(0, 128, 0),
    comment_fg: Color::Rgb(128, 128, 128),
    number_fg: Color::Rgb(148, 0, 211),
};

pub const MONOKAI: Theme = Theme {
    name: "monokai",
    background: Color::Rgb(39, 40, 34),
    foreground: Color::Rgb(248, 248, 242),
    status_bg: Color::Rgb(73, 72, 62),
    status_fg: Color::Rgb(248, 248, 242),
    line_number_fg: Color::Rgb(144, 144, 140),
    selection_bg: Color::Rgb(73, 72, 62),
    selection_fg: Color::Rgb(248, 248, 242),
    keyword_fg: Color::Rgb(249, 38, 114),
    string_fg: Color::Rgb(230, 219, 116),
    comment_fg: Color::Rgb(117, 113, 94),
    number_fg: Color::Rgb(174, 129, 255),
};

pub const SOLARIZED: Theme = Theme {
    name: "solarized",
    background: Color::Rgb(0, 43, 54),
    foreground: Color::Rgb(131, 148, 150),
    status_bg: Color::Rgb(7, 54, 66),
    status_fg: Color::Rgb(147, 161, 161),
    line_number_fg: Color::Rgb(88, 110, 117),
    selection_bg: Color::Rgb(7, 54, 66),
    selection_fg: Color::Rgb(147, 161, 161),
    keyword_fg: Color::Rgb(38, 139, 210),
    string_fg: Color::Rgb(42, 161, 152),
    comment_fg: Color::Rgb(88, 110, 117),
    number_fg: Color::Rgb(211, 54, 130),
};

/// Every theme, in cycling order.
pub const ALL: [Theme; 4] = [DARK, LIGHT, MONOKAI, SOLARIZED];

impl Theme {
    /// Look a theme up by name; unknown names fall back to `dark`.
    pub fn by_name(name: &str) -> Theme {
        ALL.iter()
            .copied()
            .find(|theme| theme.name == name)
            .unwrap_or(DARK)
    }

    /// Foreground for a highlighted token.
    pub fn token_fg(&self, kind: TokenKind) -> Color {
        match kind {
            TokenKind::Keyword => self.keyword_fg,
            TokenKind::String => self.string_fg,
            TokenKind::Comment => self.comment_fg,
            TokenKind::Number => self.number_fg,
        }
    }

    /// The theme after this one, wrapping around.
    pub fn next(self) -> Theme {
        ALL.iter()
            .position(|theme| theme.name == self.name)
            .map(|i| ALL[(i + 1) % ALL.len()])
            .unwrap_or(DARK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_falls_back_to_dark() {
        assert_eq!(Theme::by_name("monokai"), MONOKAI);
        assert_eq!(Theme::by_name("neon"), DARK);
        assert_eq!(Theme::by_name(""), DARK);
    }

    #[test]
    fn test_next_cycles_through_all() {
        let mut theme = DARK;
        let mut seen = Vec::new();
        for _ in 0..ALL.len() {
            theme = theme.next();
            seen.push(theme.name);
        }
        assert_eq!(seen, ["light", "monokai", "solarized", "dark"]);
    }

    #[test]
    fn test_token_colors() {
        assert_eq!(MONOKAI.token_fg(TokenKind::Keyword), Color::Rgb(249, 38, 114));
        assert_eq!(LIGHT.token_fg(TokenKind::Number), Color::Rgb(148, 0, 211));
    }
}
