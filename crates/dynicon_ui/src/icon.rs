//! Icon presenter.
//!
//! An [`Icon`] entity owns one loader slot. It restarts resolution when its
//! name changes and renders a strict projection of the loader
//! state: error text, the loading placeholder, the SVG, or nothing.

use dynicon_core::models::LOADING_PLACEHOLDER;
use dynicon_core::services::PendingLoad;
use dynicon_core::{
    IconLoader, IconRequest, IconState, IconView, LoadCallbacks, LoadInput, LoadState,
    PresentationAttributes,
};
use gpui::{
    div, prelude::*, px, rgb, svg, AnyElement, Context, Hsla, IntoElement, Pixels, Render,
    SharedString, Task, Window,
};

use crate::{DemoTheme, IconAssets};

/// Side length used when the attributes give neither width nor height.
const FALLBACK_SIDE: f32 = 48.0;

/// Presenter bound to one loader slot.
pub struct Icon {
    loader: IconLoader,
    callbacks: LoadCallbacks,
    attributes: PresentationAttributes,
    _load_task: Option<Task<()>>,
}

impl Icon {
    /// Create a presenter and start loading `name`.
    ///
    /// Requires [`IconState`] and [`IconAssets`] globals. Resolved artifacts
    /// are published to [`IconAssets`] before the loader reports them loaded.
    pub fn new(
        name: impl AsRef<str>,
        attributes: PresentationAttributes,
        callbacks: LoadCallbacks,
        cx: &mut Context<Self>,
    ) -> Self {
        let assets = cx.global::<IconAssets>().clone();
        let loader =
            cx.global::<IconState>().loader_with_publisher(move |artifact| assets.insert(artifact));
        let mut icon = Self { loader, callbacks, attributes, _load_task: None };
        icon.set_name(name, cx);
        icon
    }

    /// The name currently requested, `None` if the last name was rejected.
    pub fn name(&self) -> Option<IconRequest> {
        self.loader.request()
    }

    /// Current load state.
    pub fn state(&self) -> LoadState {
        self.loader.state()
    }

    /// Request a different icon. No-op if `name` is already requested.
    ///
    /// A name that is not a valid request supersedes the current load and
    /// fails the slot.
    pub fn set_name(&mut self, name: impl AsRef<str>, cx: &mut Context<Self>) {
        match IconRequest::new(name) {
            Ok(request) => {
                let input = LoadInput::new(request).with_callbacks(self.callbacks.clone());
                if let Some(pending) = self.loader.update(input) {
                    self.spawn(pending, cx);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected icon request");
                self.loader.reject(e, &self.callbacks);
                self._load_task = None;
                cx.notify();
            }
        }
    }

    /// Resolve the current name again.
    pub fn reload(&mut self, cx: &mut Context<Self>) {
        if let Some(pending) = self.loader.reload() {
            self.spawn(pending, cx);
        }
    }

    fn spawn(&mut self, pending: PendingLoad, cx: &mut Context<Self>) {
        let runtime = cx.global::<IconState>().runtime().handle().clone();

        // Dropping the previous task only stops the UI side from waiting; the
        // superseded resolution finishes on the runtime and is discarded there.
        self._load_task = Some(cx.spawn(async move |this, cx| {
            if let Err(e) = runtime.spawn(pending.run()).await {
                tracing::error!(error = %e, "Icon load task panicked");
            }
            let _ = this.update(cx, |_icon: &mut Icon, cx| cx.notify());
        }));

        cx.notify();
    }
}

impl Render for Icon {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<DemoTheme>();
        render_view(IconView::present(&self.loader.state(), &self.attributes), theme)
    }
}

/// Render an [`IconView`] with the given theme.
pub fn render_view(view: IconView, theme: &DemoTheme) -> AnyElement {
    match view {
        IconView::Error(message) => {
            div().text_color(theme.colors.status_error).child(SharedString::from(message)).into_any_element()
        }
        IconView::Loading => {
            div().text_color(theme.colors.text_muted).child(LOADING_PLACEHOLDER).into_any_element()
        }
        IconView::Icon { artifact, attributes } => {
            let (width, height) = icon_dimensions(&attributes);
            svg()
                .path(SharedString::from(artifact.asset_path().to_string()))
                .w(width)
                .h(height)
                .flex_none()
                .text_color(fill_color(&attributes).unwrap_or(theme.colors.text))
                .into_any_element()
        }
        IconView::Empty => div().into_any_element(),
    }
}

/// Width and height for an icon; a single given dimension is used for both.
pub fn icon_dimensions(attributes: &PresentationAttributes) -> (Pixels, Pixels) {
    match (attributes.width_px(), attributes.height_px()) {
        (Some(w), Some(h)) => (px(w), px(h)),
        (Some(side), None) | (None, Some(side)) => (px(side), px(side)),
        (None, None) => (px(FALLBACK_SIDE), px(FALLBACK_SIDE)),
    }
}

/// The `fill` attribute as a GPUI color.
pub fn fill_color(attributes: &PresentationAttributes) -> Option<Hsla> {
    attributes.fill_rgb().map(|color| rgb(color).into())
}
