use tauri::{AppHandle, Manager, WebviewWindowBuilder};

use crate::{
    external_browser,
    navigation_policy::{self, NavigationDecision},
    ContentTarget, WindowRegistry, PRIMARY_WINDOW_LABEL, WINDOW_TITLE,
};

pub(crate) fn create_primary_window(app_handle: &AppHandle) -> Result<(), String> {
    create_content_window(app_handle, PRIMARY_WINDOW_LABEL, None)
}

/// Always creates a fresh window; fragments are not deduplicated, so N calls
/// yield N windows onto the same content bundle.
pub(crate) fn create_secondary_window(
    app_handle: &AppHandle,
    route_fragment: &str,
) -> Result<(), String> {
    let label = app_handle.state::<WindowRegistry>().next_secondary_label();
    create_content_window(app_handle, &label, Some(route_fragment))
}

fn create_content_window(
    app_handle: &AppHandle,
    label: &str,
    route_fragment: Option<&str>,
) -> Result<(), String> {
    let target = app_handle.state::<ContentTarget>().inner().clone();
    let content_url = target.webview_url(route_fragment);
    log::info!("creating window {label} at {content_url:?}");

    WebviewWindowBuilder::new(app_handle, label, content_url)
        .title(WINDOW_TITLE)
        .icon(tauri::include_image!("./icons/icon.png"))
        .map_err(|error| format!("Failed to set icon on window {label}: {error}"))?
        .on_navigation(move |requested| {
            match navigation_policy::decide_navigation(&target, requested) {
                NavigationDecision::AllowInWindow => true,
                NavigationDecision::OpenExternally => {
                    if let Err(error) = external_browser::open_in_default_browser(requested) {
                        log::warn!("failed to open {requested} in external browser: {error}");
                    }
                    false
                }
                NavigationDecision::Deny => {
                    log::info!("blocked navigation to {requested}");
                    false
                }
            }
        })
        .build()
        .map_err(|error| format!("Failed to create window {label}: {error}"))?;

    app_handle.state::<WindowRegistry>().register(label);
    Ok(())
}
