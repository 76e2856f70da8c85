use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
    pub focus: FocusStyle,
    pub carousel: CarouselStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
            focus: FocusStyle::default(),
            carousel: CarouselStyle::default(),
        }
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self::default()
    }

    pub fn vibrant() -> Self {
        Self {
            name: "vibrant".to_string(),
            colors: ThemeColors {
                background: HexColor::new("#0a0a0f"),
                foreground: HexColor::new("#e0e0e0"),
                accent: HexColor::new("#ffe66d"),
                success: HexColor::new("#95e1a3"),
                muted: HexColor::new("#6c757d"),
            },
            focus: FocusStyle {
                focused_border: HexColor::new("#ff6b6b"),
                unfocused_border: HexColor::new("#3d3d4d"),
                focused_title: HexColor::new("#ffe66d"),
                unfocused_title: HexColor::new("#6c757d"),
                use_bold_focused: true,
            },
            carousel: CarouselStyle {
                button_fg: HexColor::new("#0a0a0f"),
                button_bg: HexColor::new("#4ecdc4"),
                finish_bg: HexColor::new("#ff6b6b"),
                ..Default::default()
            },
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" | "dark" => Some(Self::dark()),
            "vibrant" => Some(Self::vibrant()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub background: HexColor,
    pub foreground: HexColor,
    pub accent: HexColor,
    pub success: HexColor,
    pub muted: HexColor,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: HexColor::new("#1a1b26"),
            foreground: HexColor::new("#c0caf5"),
            accent: HexColor::new("#bb9af7"),
            success: HexColor::new("#9ece6a"),
            muted: HexColor::new("#565f89"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusStyle {
    pub focused_border: HexColor,
    pub unfocused_border: HexColor,
    pub focused_title: HexColor,
    pub unfocused_title: HexColor,
    pub use_bold_focused: bool,
}

impl Default for FocusStyle {
    fn default() -> Self {
        Self {
            focused_border: HexColor::new("#7aa2f7"),
            unfocused_border: HexColor::new("#3b4261"),
            focused_title: HexColor::new("#bb9af7"),
            unfocused_title: HexColor::new("#565f89"),
            use_bold_focused: true,
        }
    }
}

/// Colors of the carousel widget itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselStyle {
    pub dot_active: HexColor,
    pub dot_inactive: HexColor,
    pub button_fg: HexColor,
    pub button_bg: HexColor,
    /// Button background while it shows the finish label
    pub finish_bg: HexColor,
}

impl Default for CarouselStyle {
    fn default() -> Self {
        Self {
            dot_active: HexColor::new("#CBCBCB"),
            dot_inactive: HexColor::new("#6E6E6E"),
            button_fg: HexColor::new("#1a1b26"),
            button_bg: HexColor::new("#7aa2f7"),
            finish_bg: HexColor::new("#9ece6a"),
        }
    }
}

impl CarouselStyle {
    pub fn dot_color(&self, active: bool) -> Color {
        if active {
            self.dot_active.to_color()
        } else {
            self.dot_inactive.to_color()
        }
    }

    pub fn button_style(&self, finishing: bool, focused: bool) -> Style {
        let bg = if finishing {
            self.finish_bg.to_color()
        } else {
            self.button_bg.to_color()
        };
        let mut style = Style::default().fg(self.button_fg.to_color()).bg(bg);
        if focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    pub fn new(hex: &str) -> Self {
        Self(hex.to_string())
    }

    pub fn to_color(&self) -> Color {
        self.parse_hex().unwrap_or(Color::Reset)
    }

    fn parse_hex(&self) -> Option<Color> {
        let hex = self.0.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color::Rgb(r, g, b))
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self("#ffffff".to_string())
    }
}

impl Theme {
    pub fn border_style(&self, focused: bool) -> Style {
        let color = if focused {
            self.focus.focused_border.to_color()
        } else {
            self.focus.unfocused_border.to_color()
        };

        let mut style = Style::default().fg(color);
        if focused && self.focus.use_bold_focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }

    pub fn title_style(&self, focused: bool) -> Style {
        let color = if focused {
            self.focus.focused_title.to_color()
        } else {
            self.focus.unfocused_title.to_color()
        };

        let mut style = Style::default().fg(color);
        if focused && self.focus.use_bold_focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.colors.muted.to_color())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hex_color_parsing() {
        let color = HexColor::new("#ff0000");
        assert_eq!(color.to_color(), Color::Rgb(255, 0, 0));

        let color = HexColor::new("#6E6E6E");
        assert_eq!(color.to_color(), Color::Rgb(0x6E, 0x6E, 0x6E));

        let color = HexColor::new("not-a-color");
        assert_eq!(color.to_color(), Color::Reset);
    }

    #[test]
    fn test_hex_color_multibyte_falls_back() {
        // Six bytes, but only four characters
        let color = HexColor::new("#a\u{e9}\u{e9}b");
        assert_eq!(color.to_color(), Color::Reset);
    }

    #[test]
    fn test_theme_file_with_multibyte_color() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("theme.toml"),
            "[carousel]\ndot_active = \"#a\u{e9}\u{e9}b\"\n",
        )
        .unwrap();

        let manager = crate::config::ConfigManager::with_dir(dir.path().to_path_buf());
        let style = &manager.theme().carousel;
        assert_eq!(style.dot_color(true), Color::Reset);
        assert_eq!(style.dot_color(false), Color::Rgb(0x6E, 0x6E, 0x6E));
    }

    #[test]
    fn test_dot_colors_differ() {
        let style = CarouselStyle::default();
        assert_eq!(style.dot_color(true), Color::Rgb(0xCB, 0xCB, 0xCB));
        assert_eq!(style.dot_color(false), Color::Rgb(0x6E, 0x6E, 0x6E));
    }

    #[test]
    fn test_theme_from_name() {
        assert_eq!(Theme::from_name("vibrant").map(|t| t.name), Some("vibrant".to_string()));
        assert_eq!(Theme::from_name("dark"), Some(Theme::default()));
        assert_eq!(Theme::from_name("nope"), None);
    }

    #[test]
    fn test_theme_serialization() {
        let theme = Theme::vibrant();
        let toml_str = toml::to_string_pretty(&theme).unwrap();
        let parsed: Theme = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, theme);
    }

    #[test]
    fn test_partial_theme_keeps_defaults() {
        let parsed: Theme = toml::from_str("[carousel]\ndot_active = \"#ff0000\"").unwrap();
        assert_eq!(parsed.carousel.dot_active.to_color(), Color::Rgb(255, 0, 0));
        assert_eq!(parsed.carousel.dot_inactive, CarouselStyle::default().dot_inactive);
    }
}
