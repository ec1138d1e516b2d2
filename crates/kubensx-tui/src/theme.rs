use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,
    pub fg: Color,
    pub selection: Style,
    pub marked: Style,
    pub text_dim: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            fg: Color::Reset,
            selection: Style::default().fg(Color::Black).bg(Color::Cyan),
            marked: Style::default().fg(Color::Cyan),
            text_dim: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Theme {
    /// Monochrome variant for `--no-color`; selection falls back to reverse video.
    pub fn plain() -> Self {
        Self {
            accent: Color::Reset,
            fg: Color::Reset,
            selection: Style::default().add_modifier(Modifier::REVERSED),
            marked: Style::default().add_modifier(Modifier::BOLD),
            text_dim: Style::default(),
        }
    }

    pub fn new(color: bool) -> Self {
        if color {
            Self::default()
        } else {
            Self::plain()
        }
    }
}
