//! Theme Module
//!
//! Built-in card palettes and the per-request color overrides.

/// Built-in color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Unknown names fall back to the light theme.
    pub fn from_param(value: &str) -> Self {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                text: "#333",
                background: "#FFFEFE",
                border: "#E0E0E0",
                avatar_border: "#D0D0D0",
            },
            Theme::Dark => Palette {
                text: "#E0E0E0",
                background: "#121212",
                border: "#555",
                avatar_border: "#666",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: &'static str,
    pub background: &'static str,
    pub border: &'static str,
    pub avatar_border: &'static str,
}

/// Final colors after applying query overrides on top of a palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colors {
    pub text: String,
    pub background: String,
    pub border: String,
    pub avatar_border: String,
}

impl Colors {
    /// `border` recolors both the card outline and the avatar ring.
    pub fn resolve(
        palette: Palette,
        text: Option<&str>,
        background: Option<&str>,
        border: Option<&str>,
    ) -> Self {
        Self {
            text: text.unwrap_or(palette.text).to_string(),
            background: background.unwrap_or(palette.background).to_string(),
            border: border.unwrap_or(palette.border).to_string(),
            avatar_border: border.unwrap_or(palette.avatar_border).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_theme_is_light() {
        assert_eq!(Theme::from_param("solarized"), Theme::Light);
        assert_eq!(Theme::from_param("dark"), Theme::Dark);
    }

    #[test]
    fn test_overrides_win() {
        let colors = Colors::resolve(Theme::Dark.palette(), Some("#fff"), None, Some("red"));
        assert_eq!(colors.text, "#fff");
        assert_eq!(colors.background, "#121212");
        assert_eq!(colors.border, "red");
        assert_eq!(colors.avatar_border, "red");
    }

    #[test]
    fn test_no_overrides_uses_palette() {
        let colors = Colors::resolve(Theme::Light.palette(), None, None, None);
        assert_eq!(colors.avatar_border, "#D0D0D0");
        assert_eq!(colors.border, "#E0E0E0");
    }
}
