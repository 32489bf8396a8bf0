//! Form colors, optionally read from a kitty.conf-style color file
//! (defaults to the Omarchy theme at ~/.config/omarchy/current/theme/kitty.conf)

use ratatui::style::Color;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color,    // Focused input border, key hints
    pub danger: Color,    // Validation errors
    pub success: Color,   // Submit button, summary border
    pub text: Color,      // Input text
    pub text_dim: Color,  // Placeholders, footer
    pub inactive: Color,  // Unfocused borders
    pub header: Color,    // "Contact Form" header and field labels
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(250, 179, 135),
            danger: Color::Rgb(243, 139, 168),
            success: Color::Rgb(166, 218, 149),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(137, 180, 250),
        }
    }
}

impl Theme {
    /// Load colors from `path`, then the Omarchy theme, then the built-in palette
    pub fn load(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match Self::from_file(path) {
                Some(theme) => return theme,
                None => tracing::warn!("Could not load theme from {}", path.display()),
            }
        }

        dirs::home_dir()
            .and_then(|home| Self::from_file(&home.join(".config/omarchy/current/theme/kitty.conf")))
            .unwrap_or_default()
    }

    fn from_file(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        Self::from_kitty_conf(&content)
    }

    /// Map a kitty color table onto the form's colors. Missing entries keep
    /// the built-in value.
    fn from_kitty_conf(content: &str) -> Option<Self> {
        let colors = parse_kitty_conf(content);
        if colors.is_empty() {
            return None;
        }

        let base = Self::default();
        let pick = |keys: &[&str], fallback: Color| {
            keys.iter()
                .find_map(|k| colors.get(*k))
                .copied()
                .unwrap_or(fallback)
        };

        Some(Self {
            accent: pick(&["color2", "color10"], base.accent),
            danger: pick(&["color1", "color9"], base.danger),
            success: pick(&["color10", "color2"], base.success),
            text: pick(&["foreground"], base.text),
            text_dim: pick(&["color8"], base.text_dim),
            inactive: pick(&["inactive_border_color", "color8"], base.inactive),
            header: pick(&["color4", "color12"], base.header),
        })
    }
}

/// Parse kitty.conf lines of the form `key #hexcolor`
fn parse_kitty_conf(content: &str) -> HashMap<String, Color> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (key, value) = line.split_once(char::is_whitespace)?;
            Some((key.to_string(), parse_hex_color(value)?))
        })
        .collect()
}

/// Parse a hex color string (#RRGGBB or #RGB)
fn parse_hex_color(s: &str) -> Option<Color> {
    let s = s.trim().trim_start_matches('#');
    if !s.is_ascii() {
        return None;
    }

    match s.len() {
        6 => {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FFC107"), Some(Color::Rgb(255, 193, 7)));
        assert_eq!(parse_hex_color("fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("red"), None);
    }

    #[test]
    fn test_kitty_conf_mapping() {
        let conf = "\
# Matte black
foreground #bebebe
color1     #D35F5F
color2 #FFC107
cursor none
";
        let theme = Theme::from_kitty_conf(conf).unwrap();
        assert_eq!(theme.text, Color::Rgb(190, 190, 190));
        assert_eq!(theme.danger, Color::Rgb(211, 95, 95));
        assert_eq!(theme.accent, Color::Rgb(255, 193, 7));
        // Not present in the file
        assert_eq!(theme.header, Theme::default().header);
    }

    #[test]
    fn test_conf_without_colors_is_ignored() {
        assert!(Theme::from_kitty_conf("# only a comment\nfont_size 11").is_none());
    }
}
