//! Button component with variants.

use gpui::{
    div, prelude::*, px, App, ClickEvent, CursorStyle, ElementId, Hsla, IntoElement, RenderOnce,
    SharedString, Window,
};

use crate::DemoTheme;

/// Type alias for button click handler callback.
pub type ClickHandler = Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>;

/// Button variant styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// Accent background.
    #[default]
    Primary,
    /// Subtle surface background.
    Secondary,
}

/// A labelled button.
#[derive(IntoElement)]
pub struct Button {
    id: ElementId,
    label: Option<SharedString>,
    variant: ButtonVariant,
    disabled: bool,
    on_click: Option<ClickHandler>,
}

impl Button {
    /// Create a new button.
    pub fn new() -> Self {
        Self {
            id: ElementId::Name("button".into()),
            label: None,
            variant: ButtonVariant::default(),
            disabled: false,
            on_click: None,
        }
    }

    /// Set the button ID.
    pub fn id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the button label.
    pub fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the button variant.
    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the disabled state.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the click handler.
    pub fn on_click(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    /// Background, hover background and text colors for the current variant.
    fn colors(&self, theme: &DemoTheme) -> (Hsla, Hsla, Hsla) {
        let colors = &theme.colors;
        match self.variant {
            ButtonVariant::Primary => (colors.accent, colors.accent_hover, colors.on_accent),
            ButtonVariant::Secondary => (colors.surface, colors.border, colors.text),
        }
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderOnce for Button {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.global::<DemoTheme>();
        let (bg, hover_bg, text_color) = self.colors(theme);
        let opacity = if self.disabled { 0.5 } else { 1.0 };

        let mut button = div()
            .id(self.id)
            .h(px(32.0))
            .px(px(12.0))
            .flex()
            .items_center()
            .justify_center()
            .rounded(px(4.0))
            .bg(bg)
            .text_color(text_color)
            .text_size(px(14.0))
            .opacity(opacity);

        if !self.disabled {
            button = button.cursor(CursorStyle::PointingHand).hover(|style| style.bg(hover_bg));
            if let Some(handler) = self.on_click {
                button = button.on_click(move |event, window, cx| handler(event, window, cx));
            }
        }

        if let Some(label) = self.label {
            button = button.child(label);
        }

        button
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_construction() {
        let button = Button::new().id("reload").label("Reload").variant(ButtonVariant::Secondary);

        assert_eq!(button.label.as_deref(), Some("Reload"));
        assert_eq!(button.variant, ButtonVariant::Secondary);
        assert!(!button.disabled);
        assert!(button.on_click.is_none());
        assert!(button.disabled(true).disabled);
    }

    #[test]
    fn test_variant_colors() {
        let theme = DemoTheme::dark();
        let primary = Button::new().colors(&theme);
        let secondary = Button::new().variant(ButtonVariant::Secondary).colors(&theme);

        assert_eq!(primary.0, theme.colors.accent);
        assert_eq!(secondary, (theme.colors.surface, theme.colors.border, theme.colors.text));
    }
}
