//! Style types for text rendering
//!
//! Styles are resolved per character by layering: the current-line style
//! sits at the bottom and bracket styles are painted over it.

/// Terminal colors: the ANSI 16-color palette plus truecolor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Look up a named color (`red`, `bright-blue`, `default`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.to_lowercase().replace('_', "-").as_str() {
            "default" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "bright-black" | "gray" | "grey" => Color::BrightBlack,
            "bright-red" => Color::BrightRed,
            "bright-green" => Color::BrightGreen,
            "bright-yellow" => Color::BrightYellow,
            "bright-blue" => Color::BrightBlue,
            "bright-magenta" => Color::BrightMagenta,
            "bright-cyan" => Color::BrightCyan,
            "bright-white" => Color::BrightWhite,
            _ => return None,
        };
        Some(color)
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
    /// Reverse video (swap fg/bg)
    pub reverse: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Create a style with just background color
    pub fn bg(color: Color) -> Self {
        Self {
            bg: color,
            ..Default::default()
        }
    }

    /// Create a reverse video style (for selections)
    pub fn reverse() -> Self {
        Self {
            reverse: true,
            ..Default::default()
        }
    }

    /// Builder: set foreground color
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Paint `over` on top of this style. Colors that `over` leaves at
    /// default show through; attributes accumulate.
    pub fn layered(self, over: Style) -> Self {
        Self {
            fg: if over.fg == Color::Default { self.fg } else { over.fg },
            bg: if over.bg == Color::Default { self.bg } else { over.bg },
            bold: self.bold || over.bold,
            italic: self.italic || over.italic,
            underline: self.underline || over.underline,
            reverse: self.reverse || over.reverse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert_eq!(style.fg, Color::Default);
        assert_eq!(style.bg, Color::Default);
        assert!(!style.bold);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::fg(Color::Red).with_bold().with_bg(Color::Rgb(1, 2, 3));
        assert_eq!(style.fg, Color::Red);
        assert_eq!(style.bg, Color::Rgb(1, 2, 3));
        assert!(style.bold);
        assert!(!style.is_default());
    }

    #[test]
    fn test_layered_keeps_lower_bg() {
        let line = Style::bg(Color::Rgb(232, 242, 254));
        let painted = line.layered(Style::fg(Color::Red));
        assert_eq!(painted.fg, Color::Red);
        assert_eq!(painted.bg, Color::Rgb(232, 242, 254));
    }

    #[test]
    fn test_layered_overrides_bg() {
        let line = Style::bg(Color::Blue);
        let painted = line.layered(Style::bg(Color::Red).with_bold());
        assert_eq!(painted.bg, Color::Red);
        assert!(painted.bold);
    }

    #[test]
    fn test_color_from_name() {
        assert_eq!(Color::from_name("Red"), Some(Color::Red));
        assert_eq!(Color::from_name("bright_blue"), Some(Color::BrightBlue));
        assert_eq!(Color::from_name("grey"), Some(Color::BrightBlack));
        assert_eq!(Color::from_name("chartreuse"), None);
    }
}
