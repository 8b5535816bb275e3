use ratatui::style::Color;

/// Light/dark color palette. Persisted by name in the preference store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight_bg: Color,
    pub badge: Color,
    pub error: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            fg: Color::Black,
            muted: Color::DarkGray,
            accent: Color::Blue,
            highlight_bg: Color::Gray,
            badge: Color::Magenta,
            error: Color::Red,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            fg: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            highlight_bg: Color::DarkGray,
            badge: Color::Yellow,
            error: Color::Red,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn toggled(self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_light_and_dark() {
        assert_eq!(Theme::dark().toggled(), Theme::light());
        assert_eq!(Theme::light().toggled(), Theme::dark());
    }

    #[test]
    fn unknown_name_falls_back_to_dark() {
        assert_eq!(Theme::from_name("solarized"), Theme::dark());
    }
}
