use tauri::AppHandle;

use crate::window_factory;

/// Inbound command surface for content views. Trusted-content assumption:
/// the fragment is not validated, every call creates a window.
#[tauri::command]
pub(crate) fn shell_open_secondary_window(
    app_handle: AppHandle,
    route_fragment: String,
) -> Result<(), String> {
    log::info!("content requested a secondary window for route '{route_fragment}'");
    window_factory::create_secondary_window(&app_handle, &route_fragment)
}
