use ratatui::style::Color;

use crate::model::{Priority, UiConfig};

/// Parsed color theme for the panel
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub selection_bg: Color,
    pub progress_fill: Color,
    pub progress_track: Color,
    pub low: Color,
    pub medium: Color,
    pub high: Color,
}

impl Default for Theme {
    fn default() -> Self {
        let red = Color::Rgb(0xFF, 0x44, 0x44);
        let yellow = Color::Rgb(0xFF, 0xD7, 0x00);
        let green = Color::Rgb(0x44, 0xFF, 0x88);
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red,
            yellow,
            green,
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            progress_fill: green,
            progress_track: Color::Rgb(0x2A, 0x22, 0x44),
            low: green,
            medium: yellow,
            high: red,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

impl Theme {
    /// Create a theme from the `[ui]` config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "selection_bg" => theme.selection_bg = color,
                "progress_fill" => theme.progress_fill = color,
                "progress_track" => theme.progress_track = color,
                _ => {}
            }
        }

        for (tier, value) in &ui.priority_colors {
            let Some(color) = parse_hex_color(value) else {
                continue;
            };
            match tier.parse::<Priority>() {
                Ok(Priority::Low) => theme.low = color,
                Ok(Priority::Medium) => theme.medium = color,
                Ok(Priority::High) => theme.high = color,
                Err(_) => {}
            }
        }

        theme
    }

    /// Lozenge color for a priority tier
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
        }
    }
}
