use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tauri_plugin_updater::Update;

use crate::{UpdateInfo, RELEASE_NAME_FALLBACK, UPDATE_DIALOG_TITLE};

pub(crate) fn restart_prompt_text(info: &UpdateInfo) -> String {
    let release = info.release_name.as_deref().unwrap_or(RELEASE_NAME_FALLBACK);
    format!(
        "{release}\n\nA new version ({}) has been downloaded. Restart the application to apply the updates.",
        info.version
    )
}

/// Modal two-option choice: "Restart" installs now, "Later" (or dismissing
/// the dialog) leaves the staged payload for the next normal launch. Blocks
/// the update task until the user answers; the event loop keeps running.
pub(crate) fn prompt_restart(app_handle: &AppHandle, info: &UpdateInfo) -> bool {
    let restart_now = app_handle
        .dialog()
        .message(restart_prompt_text(info))
        .title(UPDATE_DIALOG_TITLE)
        .kind(MessageDialogKind::Info)
        .buttons(MessageDialogButtons::OkCancelCustom(
            "Restart".to_string(),
            "Later".to_string(),
        ))
        .blocking_show();

    log::info!(
        "update confirmation answered: {}",
        if restart_now { "Restart" } else { "Later" }
    );
    restart_now
}

pub(crate) fn install_and_restart(app_handle: &AppHandle, update: &Update, bytes: &[u8]) {
    if let Err(error) = update.install(bytes) {
        log::error!("failed to install update {}: {error}", update.version);
        return;
    }

    log::info!("update {} installed; restarting", update.version);
    app_handle.request_restart();
}
