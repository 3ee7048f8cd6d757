#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod app;
mod domain;
mod infra;
mod ui;
mod util;

use dioxus::prelude::*;

#[cfg(feature = "desktop")]
use dioxus_desktop::{
    tao::{dpi::LogicalSize, window::WindowBuilder},
    Config as DesktopConfig,
};

use crate::util::version::{version_label, APP_NAME};

/// Sets `key` to `value` unless the user already chose something.
fn default_env(key: &str, value: &str) {
    if std::env::var_os(key).is_none() {
        std::env::set_var(key, value);
    }
}

/// Wayland explicit sync crashes the webview on some drivers. Force the GL
/// backend and turn off WebKit's DMABUF renderer there.
fn apply_wayland_workarounds() {
    if std::env::var_os("WAYLAND_DISPLAY").is_none() {
        return;
    }
    default_env("WGPU_BACKEND", "gl");
    default_env("WEBKIT_DISABLE_DMABUF_RENDERER", "1");
}

fn main() {
    util::logging::init();
    apply_wayland_workarounds();
    tracing::info!(version = %version_label(), "starting {APP_NAME}");

    let builder = LaunchBuilder::new();

    #[cfg(feature = "desktop")]
    let builder = builder.with_cfg(desktop! {
        DesktopConfig::new().with_window(
            WindowBuilder::new()
                .with_title(APP_NAME)
                .with_inner_size(LogicalSize::new(1180.0, 820.0))
                .with_min_inner_size(LogicalSize::new(760.0, 560.0))
        )
    });

    builder.launch(app::App);
}
