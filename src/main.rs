#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_runtime;
mod content_target;
mod external_browser;
mod handshake;
mod logging;
mod navigation_policy;
mod platform_setup;
mod shell_commands;
mod single_instance;
mod update_confirm;
mod update_events;
mod update_flow;
mod window_actions;
mod window_factory;
mod window_registry;

pub(crate) use app_constants::*;
pub(crate) use content_target::ContentTarget;
pub(crate) use update_events::{DownloadProgress, UpdateEvent, UpdateInfo, UpdateSession};
pub(crate) use window_registry::WindowRegistry;

fn main() {
    app_runtime::run();
}
