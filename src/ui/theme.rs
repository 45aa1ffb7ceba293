use ratatui::style::Color;

use crate::config::WidgetOptions;
use crate::model::{ChatbotConfig, CornerPosition};

/// Default accent, #007bff.
pub const DEFAULT_ACCENT: Color = Color::Rgb(0, 123, 255);

/// Resolved presentation settings for one run. Explicit local options
/// win, then the server-provided configuration, then built-in defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub accent: Color,
    pub position: CornerPosition,
}

impl Theme {
    pub fn resolve(options: &WidgetOptions, remote: Option<&ChatbotConfig>) -> Self {
        let accent = options
            .primary_color
            .as_deref()
            .or(remote.map(|config| config.primary_color.as_str()))
            .and_then(parse_hex)
            .unwrap_or(DEFAULT_ACCENT);

        let position = options
            .position
            .or(remote.map(|config| config.position))
            .unwrap_or_default();

        Self { accent, position }
    }
}

/// Parse a "#rrggbb" hex string. Anything else is rejected and the
/// caller falls back to the default accent.
fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BusinessProfile;

    fn remote(color: &str, position: CornerPosition) -> ChatbotConfig {
        ChatbotConfig {
            chatbot_name: "Helper".to_string(),
            welcome_message: "Hi!".to_string(),
            business_profile: BusinessProfile::Content,
            primary_language: "en".to_string(),
            primary_color: color.to_string(),
            avatar_url: None,
            position,
        }
    }

    #[test]
    fn explicit_options_win_over_server_values() {
        let options = WidgetOptions {
            position: Some(CornerPosition::TopLeft),
            primary_color: Some("#ff0000".to_string()),
            ..Default::default()
        };
        let config = remote("#00ff00", CornerPosition::BottomLeft);

        let theme = Theme::resolve(&options, Some(&config));
        assert_eq!(theme.accent, Color::Rgb(255, 0, 0));
        assert_eq!(theme.position, CornerPosition::TopLeft);
    }

    #[test]
    fn server_values_apply_when_options_are_unset() {
        let options = WidgetOptions::default();
        let config = remote("#00ff7f", CornerPosition::TopRight);

        let theme = Theme::resolve(&options, Some(&config));
        assert_eq!(theme.accent, Color::Rgb(0, 255, 127));
        assert_eq!(theme.position, CornerPosition::TopRight);
    }

    #[test]
    fn defaults_apply_before_the_config_arrives() {
        let theme = Theme::resolve(&WidgetOptions::default(), None);
        assert_eq!(theme.accent, DEFAULT_ACCENT);
        assert_eq!(theme.position, CornerPosition::BottomRight);
    }

    #[test]
    fn unparseable_color_falls_back_to_default() {
        let options = WidgetOptions {
            primary_color: Some("cornflower".to_string()),
            ..Default::default()
        };
        let theme = Theme::resolve(&options, None);
        assert_eq!(theme.accent, DEFAULT_ACCENT);
    }

    #[test]
    fn hex_parsing_accepts_only_full_rgb_triplets() {
        assert_eq!(parse_hex("#007bff"), Some(Color::Rgb(0, 123, 255)));
        assert_eq!(parse_hex(" #007bff "), Some(Color::Rgb(0, 123, 255)));
        assert_eq!(parse_hex("007bff"), None);
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#gggggg"), None);
    }
}
