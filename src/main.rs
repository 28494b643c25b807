#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod app;
mod domain;
mod ui;
mod util;

use dioxus::prelude::*;

#[cfg(feature = "desktop")]
use dioxus_desktop::{tao::window::WindowBuilder, Config as DesktopConfig};

use crate::util::{config::AppConfig, logging, version::version_label};

fn main() {
    // Wayland explicit-sync crashes on some drivers; fall back to GL unless the caller opts in.
    if std::env::var("WAYLAND_DISPLAY").is_ok() && std::env::var("WGPU_BACKEND").is_err() {
        std::env::set_var("WGPU_BACKEND", "gl");
    }

    // WebKit's DMABUF renderer opts into explicit sync; disable it unless the user overrides.
    if std::env::var("WAYLAND_DISPLAY").is_ok()
        && std::env::var("WEBKIT_DISABLE_DMABUF_RENDERER").is_err()
    {
        std::env::set_var("WEBKIT_DISABLE_DMABUF_RENDERER", "1");
    }

    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    logging::init(&config);
    if let Some(err) = config_error {
        tracing::warn!(error = %err, "falling back to default configuration");
    }
    tracing::info!(version = %version_label(), vat = config.vat_enabled_by_default, "starting");

    let builder = LaunchBuilder::new();

    #[cfg(feature = "desktop")]
    let builder = {
        let window_config = desktop! {
            DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(config.window_title.clone())
            )
        };
        builder.with_cfg(window_config)
    };

    #[cfg(not(feature = "desktop"))]
    let builder = builder;

    builder.with_context(config).launch(app::App);
}
