use serde::{Deserialize, Serialize};

/// Terminal colour as written in the settings file, e.g. `Red` or `Rgb(255, 128, 0)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Color {
    Black,
    DarkGrey,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Yellow,
    DarkYellow,
    Blue,
    DarkBlue,
    Magenta,
    DarkMagenta,
    Cyan,
    DarkCyan,
    White,
    Grey,
    Rgb(u8, u8, u8),
}

impl From<Color> for crossterm::style::Color {
    fn from(value: Color) -> Self {
        use crossterm::style::Color as CsColor;

        match value {
            Color::Black => CsColor::Black,
            Color::DarkGrey => CsColor::DarkGrey,
            Color::Red => CsColor::Red,
            Color::DarkRed => CsColor::DarkRed,
            Color::Green => CsColor::Green,
            Color::DarkGreen => CsColor::DarkGreen,
            Color::Yellow => CsColor::Yellow,
            Color::DarkYellow => CsColor::DarkYellow,
            Color::Blue => CsColor::Blue,
            Color::DarkBlue => CsColor::DarkBlue,
            Color::Magenta => CsColor::Magenta,
            Color::DarkMagenta => CsColor::DarkMagenta,
            Color::Cyan => CsColor::Cyan,
            Color::DarkCyan => CsColor::DarkCyan,
            Color::White => CsColor::White,
            Color::Grey => CsColor::Grey,
            Color::Rgb(r, g, b) => CsColor::Rgb { r, g, b },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub walls: Color,
    pub entrance: Color,
    pub exit: Color,
    pub dfs_path: Color,
    pub bfs_path: Color,
    pub visited: Color,
    pub frontier: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme {
            walls: Color::White,
            entrance: Color::Green,
            exit: Color::Yellow,
            dfs_path: Color::Red,
            bfs_path: Color::Blue,
            visited: Color::DarkGrey,
            frontier: Color::Cyan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_terminal_colors() {
        assert_eq!(
            crossterm::style::Color::from(Color::DarkRed),
            crossterm::style::Color::DarkRed
        );
        assert_eq!(
            crossterm::style::Color::from(Color::Rgb(1, 2, 3)),
            crossterm::style::Color::Rgb { r: 1, g: 2, b: 3 }
        );
    }

    #[test]
    fn default_paths_match_algorithm_colors() {
        let scheme = ColorScheme::default();
        assert_eq!(scheme.dfs_path, Color::Red);
        assert_eq!(scheme.bfs_path, Color::Blue);
    }
}
