//! Dynicon demo root component.

use dynicon_core::{DemoConfig, IconArtifact, IconError, LoadCallbacks, PresentationAttributes};
use dynicon_ui::{Button, ButtonVariant, DemoTheme, Icon};
use gpui::{div, prelude::*, px, Context, Entity, IntoElement, Render, Window};

/// Root component: a toggle button and three icon presenters.
pub struct DemoApp {
    config: DemoConfig,
    current_name: String,
    toggled: Entity<Icon>,
    first: Entity<Icon>,
    second: Entity<Icon>,
}

impl DemoApp {
    /// Create the demo, starting all three loads.
    pub fn new(config: DemoConfig, cx: &mut Context<Self>) -> Self {
        let callbacks = demo_callbacks();
        let [first_name, second_name] = config.toggle_names.clone();
        let current_name = config.initial_name.clone();

        let toggled = cx.new(|cx| {
            Icon::new(&current_name, PresentationAttributes::new().fill("gray"), callbacks.clone(), cx)
        });
        let first = cx.new(|cx| {
            Icon::new(
                &first_name,
                PresentationAttributes::new().fill("gray").width("300"),
                callbacks.clone(),
                cx,
            )
        });
        let second = cx.new(|cx| {
            Icon::new(
                &second_name,
                PresentationAttributes::new().fill("darkblue").height("100"),
                callbacks,
                cx,
            )
        });

        // Re-render when the toggled icon changes so the reload button tracks its state
        cx.observe(&toggled, |_, _, cx| cx.notify()).detach();

        Self { config, current_name, toggled, first, second }
    }

    /// Switch the toggled presenter to the other name.
    fn toggle(&mut self, cx: &mut Context<Self>) {
        let next = self.config.next_name(&self.current_name).to_string();
        tracing::debug!(from = %self.current_name, to = %next, "Changing icon");

        self.toggled.update(cx, |icon, cx| icon.set_name(&next, cx));
        self.current_name = next;
        cx.notify();
    }

    /// Resolve every presenter's current name again.
    fn reload_all(&mut self, cx: &mut Context<Self>) {
        tracing::debug!("Reloading icons");
        for icon in [&self.toggled, &self.first, &self.second] {
            icon.update(cx, |icon, cx| icon.reload(cx));
        }
    }
}

/// Shared callbacks that only log.
fn demo_callbacks() -> LoadCallbacks {
    LoadCallbacks::new()
        .on_completed(|name: &str, _: &IconArtifact| tracing::info!("{name} successfully loaded"))
        .on_error(|e: &IconError| tracing::error!("{}", e.message()))
}

impl Render for DemoApp {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let loading = self.toggled.read(cx).state().is_loading();
        let theme = cx.global::<DemoTheme>();
        let colors = &theme.colors;

        div()
            .flex()
            .flex_col()
            .size_full()
            .gap(px(16.0))
            .p(px(24.0))
            .bg(colors.background)
            .text_color(colors.text)
            .child(
                div()
                    .flex()
                    .gap(px(8.0))
                    .child(
                        Button::new()
                            .id("change-icon")
                            .label("Change Icon")
                            .variant(ButtonVariant::Primary)
                            .on_click(cx.listener(|this, _, _window, cx| this.toggle(cx))),
                    )
                    .child(
                        Button::new()
                            .id("reload")
                            .label("Reload")
                            .variant(ButtonVariant::Secondary)
                            .disabled(loading)
                            .on_click(cx.listener(|this, _, _window, cx| this.reload_all(cx))),
                    ),
            )
            .child(
                div()
                    .flex()
                    .items_start()
                    .gap(px(24.0))
                    .child(self.toggled.clone())
                    .child(self.first.clone())
                    .child(self.second.clone()),
            )
    }
}
