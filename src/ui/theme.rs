use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub accent: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,

    // Footer mode colors
    pub footer_items: ColorSpec,
    pub footer_menu: ColorSpec,
    pub footer_form: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

/// Rose Pine Dawn is the default.
///
impl Default for Theme {
    fn default() -> Self {
        Self::rose_pine_dawn()
    }
}

impl Theme {
    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Self {
        Theme {
            name: "rose-pine-dawn".to_string(),
            primary: ColorSpec::rgb(40, 105, 131),      // Pine
            accent: ColorSpec::rgb(144, 122, 169),      // Iris
            banner: ColorSpec::rgb(215, 130, 126),      // Rose
            text: ColorSpec::rgb(87, 82, 121),          // Text
            text_muted: ColorSpec::rgb(152, 147, 165),  // Muted
            success: ColorSpec::rgb(86, 148, 159),      // Foam
            warning: ColorSpec::rgb(234, 157, 52),      // Gold
            error: ColorSpec::rgb(180, 99, 122),        // Love
            border_active: ColorSpec::rgb(40, 105, 131),
            border_normal: ColorSpec::rgb(223, 218, 217), // Highlight Med
            highlight_bg: ColorSpec::rgb(244, 237, 232),  // Highlight Low
            highlight_fg: ColorSpec::rgb(87, 82, 121),
            footer_items: ColorSpec::rgb(40, 105, 131),
            footer_menu: ColorSpec::rgb(215, 130, 126),
            footer_form: ColorSpec::rgb(144, 122, 169),
        }
    }

    /// Dracula theme.
    ///
    pub fn dracula() -> Self {
        Theme {
            name: "dracula".to_string(),
            primary: ColorSpec::rgb(189, 147, 249),     // Purple
            accent: ColorSpec::rgb(255, 121, 198),      // Pink
            banner: ColorSpec::rgb(139, 233, 253),      // Cyan
            text: ColorSpec::rgb(248, 248, 242),        // Foreground
            text_muted: ColorSpec::rgb(98, 114, 164),   // Comment
            success: ColorSpec::rgb(80, 250, 123),      // Green
            warning: ColorSpec::rgb(241, 250, 140),     // Yellow
            error: ColorSpec::rgb(255, 85, 85),         // Red
            border_active: ColorSpec::rgb(189, 147, 249),
            border_normal: ColorSpec::rgb(68, 71, 90), // Current Line
            highlight_bg: ColorSpec::rgb(68, 71, 90),
            highlight_fg: ColorSpec::rgb(248, 248, 242),
            footer_items: ColorSpec::rgb(189, 147, 249),
            footer_menu: ColorSpec::rgb(139, 233, 253),
            footer_form: ColorSpec::rgb(255, 121, 198),
        }
    }

    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night".to_string(),
            primary: ColorSpec::rgb(122, 162, 247),     // Blue
            accent: ColorSpec::rgb(187, 154, 247),      // Magenta
            banner: ColorSpec::rgb(125, 207, 255),      // Cyan
            text: ColorSpec::rgb(169, 177, 214),        // Foreground
            text_muted: ColorSpec::rgb(86, 95, 137),    // Comment
            success: ColorSpec::rgb(158, 206, 106),     // Green
            warning: ColorSpec::rgb(224, 175, 104),     // Yellow
            error: ColorSpec::rgb(247, 118, 142),       // Red
            border_active: ColorSpec::rgb(122, 162, 247),
            border_normal: ColorSpec::rgb(59, 66, 97),
            highlight_bg: ColorSpec::rgb(41, 46, 66),
            highlight_fg: ColorSpec::rgb(192, 202, 245),
            footer_items: ColorSpec::rgb(122, 162, 247),
            footer_menu: ColorSpec::rgb(125, 207, 255),
            footer_form: ColorSpec::rgb(187, 154, 247),
        }
    }

    /// Get theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rose-pine-dawn" => Some(Self::rose_pine_dawn()),
            "dracula" => Some(Self::dracula()),
            "tokyo-night" => Some(Self::tokyo_night()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        vec![
            "rose-pine-dawn".to_string(),
            "dracula".to_string(),
            "tokyo-night".to_string(),
        ]
    }
}
