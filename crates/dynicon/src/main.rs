//! Dynicon - dynamic SVG icon loading demo built with GPUI.

mod app;

use app::DemoApp;
use dynicon_core::config::DemoConfig;
use dynicon_core::logging::{init_logging, LogConfig};
use dynicon_core::state::IconState;
use dynicon_ui::{DemoTheme, IconAssets};
use gpui::{px, size, App, AppContext, Application, Bounds, Size, WindowBounds, WindowOptions};

fn main() {
    let (config, config_error) = match DemoConfig::load_default() {
        Ok(config) => (config, None),
        Err(e) => (DemoConfig::default(), Some(e)),
    };

    let logging = init_logging(LogConfig::from_config(&config));
    logging.report();

    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Invalid config, using defaults");
    }
    tracing::info!("Starting Dynicon");

    let state = match IconState::with_config(config.clone()) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize IconState");
            return;
        }
    };
    register_bundled_icons(&state);

    let assets = IconAssets::new();

    Application::new().with_assets(assets.clone()).run(move |cx: &mut App| {
        cx.set_global(state);
        cx.set_global(assets);

        let window_size = size(px(900.0), px(600.0));
        let bounds = Bounds::centered(None, window_size, cx);

        let window_options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            window_min_size: Some(Size { width: px(400.0), height: px(300.0) }),
            focus: true,
            show: true,
            ..Default::default()
        };

        let opened = cx.open_window(window_options, |window, cx| {
            cx.set_global(DemoTheme::for_appearance(window.appearance()));
            window
                .observe_window_appearance(|window, cx| {
                    tracing::debug!(appearance = ?window.appearance(), "Window appearance changed");
                    cx.set_global(DemoTheme::for_appearance(window.appearance()));
                    cx.refresh_windows();
                })
                .detach();

            window.on_window_should_close(cx, |window, cx| {
                window.remove_window();
                cx.quit();
                false
            });

            cx.new(|cx| DemoApp::new(config, cx))
        });
        if let Err(e) = opened {
            tracing::error!(error = %e, "Failed to open window");
            cx.quit();
            return;
        }

        cx.activate(true);
    });
}

/// Register the icons shipped with the demo, unless the icon directory
/// already provided them.
fn register_bundled_icons(state: &IconState) {
    let registry = state.registry();
    for (name, bytes) in [
        ("svg1", include_bytes!("../assets/icons/svg1.svg").as_slice()),
        ("svg2", include_bytes!("../assets/icons/svg2.svg").as_slice()),
    ] {
        if !registry.contains(name) {
            registry.register_embedded(name, bytes);
        }
    }
}
