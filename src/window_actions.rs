use tauri::{AppHandle, Manager};

use crate::PRIMARY_WINDOW_LABEL;

/// Bring a window to the foreground, restoring it first if it sits minimized.
pub(crate) fn focus_window<F>(app_handle: &AppHandle, label: &str, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(label) else {
        log(&format!("focus_window skipped: window {label} not found"));
        return;
    };

    if window.is_minimized().unwrap_or(false) {
        if let Err(error) = window.unminimize() {
            log(&format!("failed to restore minimized window {label}: {error}"));
        }
    }
    if let Err(error) = window.show() {
        log(&format!("failed to show window {label}: {error}"));
    }
    if let Err(error) = window.set_focus() {
        log(&format!("failed to focus window {label}: {error}"));
    }
}

pub(crate) fn focus_primary_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    focus_window(app_handle, PRIMARY_WINDOW_LABEL, log);
}
