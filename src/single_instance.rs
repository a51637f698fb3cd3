use tauri::AppHandle;

use crate::window_actions;

/// Runs in the surviving instance when a second launch loses the instance
/// lock. The loser has already exited with code 0 inside the plugin; our job
/// is only to surface the primary window.
pub(crate) fn handle_second_instance(app_handle: &AppHandle, argv: &[String], cwd: &str) {
    log::info!("second instance blocked (argv: {argv:?}, cwd: {cwd})");
    window_actions::focus_primary_window(app_handle, |line| log::warn!("{line}"));
}
