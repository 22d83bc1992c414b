//! Theme definitions for Dynicon.

use gpui::{hsla, Global, Hsla, WindowAppearance};

/// Color palette for UI rendering.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Window background color.
    pub background: Hsla,
    /// Panel/card background.
    pub surface: Hsla,
    /// Primary text color, also the default icon fill.
    pub text: Hsla,
    /// Dimmed text, used for the loading placeholder.
    pub text_muted: Hsla,
    /// Element border color.
    pub border: Hsla,
    /// Primary accent color.
    pub accent: Hsla,
    /// Accent hover state.
    pub accent_hover: Hsla,
    /// Text drawn on top of the accent color.
    pub on_accent: Hsla,
    /// Error text, used for resolution failures.
    pub status_error: Hsla,
}

impl ThemeColors {
    /// Dark palette (Catppuccin Mocha).
    pub fn dark() -> Self {
        Self {
            background: hsla(240.0 / 360.0, 0.21, 0.15, 1.0),
            surface: hsla(237.0 / 360.0, 0.16, 0.23, 1.0),
            text: hsla(226.0 / 360.0, 0.64, 0.88, 1.0),
            text_muted: hsla(228.0 / 360.0, 0.24, 0.72, 1.0),
            border: hsla(233.0 / 360.0, 0.13, 0.31, 1.0),
            accent: hsla(217.0 / 360.0, 0.92, 0.76, 1.0),
            accent_hover: hsla(232.0 / 360.0, 0.97, 0.85, 1.0),
            on_accent: hsla(240.0 / 360.0, 0.21, 0.15, 1.0),
            status_error: hsla(343.0 / 360.0, 0.81, 0.75, 1.0),
        }
    }

    /// Light palette (Catppuccin Latte).
    pub fn light() -> Self {
        Self {
            background: hsla(220.0 / 360.0, 0.23, 0.95, 1.0),
            surface: hsla(220.0 / 360.0, 0.21, 0.92, 1.0),
            text: hsla(234.0 / 360.0, 0.16, 0.35, 1.0),
            text_muted: hsla(233.0 / 360.0, 0.10, 0.47, 1.0),
            border: hsla(220.0 / 360.0, 0.22, 0.90, 1.0),
            accent: hsla(220.0 / 360.0, 0.91, 0.54, 1.0),
            accent_hover: hsla(231.0 / 360.0, 0.97, 0.72, 1.0),
            on_accent: hsla(0.0, 0.0, 1.0, 1.0),
            status_error: hsla(347.0 / 360.0, 0.87, 0.44, 1.0),
        }
    }
}

/// Theme used by the demo shell and icon presenters.
#[derive(Debug, Clone)]
pub struct DemoTheme {
    /// Theme identifier.
    pub name: String,
    /// GPUI appearance (Light/Dark).
    pub appearance: WindowAppearance,
    /// Color palette.
    pub colors: ThemeColors,
}

impl DemoTheme {
    /// Create a new dark theme.
    pub fn dark() -> Self {
        Self { name: "dark".to_string(), appearance: WindowAppearance::Dark, colors: ThemeColors::dark() }
    }

    /// Create a new light theme.
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            appearance: WindowAppearance::Light,
            colors: ThemeColors::light(),
        }
    }

    /// Pick the theme matching a window appearance.
    pub fn for_appearance(appearance: WindowAppearance) -> Self {
        match appearance {
            WindowAppearance::Light | WindowAppearance::VibrantLight => Self::light(),
            WindowAppearance::Dark | WindowAppearance::VibrantDark => Self::dark(),
        }
    }
}

impl Default for DemoTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Global for DemoTheme {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_for_appearance() {
        assert_eq!(DemoTheme::for_appearance(WindowAppearance::Light).name, "light");
        assert_eq!(DemoTheme::for_appearance(WindowAppearance::VibrantDark).name, "dark");
        assert_eq!(DemoTheme::default().name, "dark");
    }
}
