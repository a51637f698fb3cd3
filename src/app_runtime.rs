use tauri::{webview::PageLoadEvent, Emitter, EventTarget, Manager, RunEvent, WindowEvent};

use crate::{
    handshake, logging, platform_setup, shell_commands, single_instance, update_flow,
    window_factory, ContentTarget, WindowRegistry, HANDSHAKE_EVENT,
};

/// Ordered startup: log sink, platform accommodations, single-instance gate,
/// managed state, primary window, then the update check (packaged builds
/// only, once the primary window exists). A second launch exits with code 0
/// inside the single-instance plugin before any of the later steps run.
pub(crate) fn run() {
    logging::init();
    log::info!("App v{} starting...", env!("CARGO_PKG_VERSION"));
    platform_setup::apply_platform_accommodations();

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, argv, cwd| {
            single_instance::handle_second_instance(app, &argv, &cwd);
        }))
        .plugin(tauri_plugin_process::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_updater::Builder::new().build())
        .manage(WindowRegistry::default())
        .manage(ContentTarget::from_environment())
        .invoke_handler(tauri::generate_handler![
            shell_commands::shell_open_secondary_window,
        ])
        .on_page_load(|webview, payload| match payload.event() {
            PageLoadEvent::Started => {
                log::debug!("page-load started: {}", payload.url());
            }
            PageLoadEvent::Finished => {
                let label = webview.label().to_string();
                let registry = webview.app_handle().state::<WindowRegistry>();
                if registry.mark_handshaken(&label) {
                    if let Err(error) = webview.emit_to(
                        EventTarget::labeled(label.as_str()),
                        HANDSHAKE_EVENT,
                        handshake::handshake_payload(),
                    ) {
                        log::warn!("failed to push handshake into window {label}: {error}");
                    }
                }
            }
        })
        .setup(|app| {
            let app_handle = app.handle().clone();
            window_factory::create_primary_window(&app_handle)?;
            update_flow::spawn_startup_update_check(&app_handle);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::WindowEvent {
                label,
                event: WindowEvent::Destroyed,
                ..
            } => {
                let registry = app_handle.state::<WindowRegistry>();
                registry.remove(&label);
                log::info!(
                    "window {label} closed ({} remaining)",
                    registry.window_count()
                );
            }
            RunEvent::ExitRequested { api, code, .. } => {
                // A None code means the exit was requested because the last
                // window closed; macOS convention keeps the app resident.
                #[cfg(target_os = "macos")]
                {
                    if code.is_none() {
                        api.prevent_exit();
                    }
                }
                #[cfg(not(target_os = "macos"))]
                {
                    let _ = (api, code);
                }
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen { .. } => {
                let registry = app_handle.state::<WindowRegistry>();
                match registry.first_label() {
                    Some(label) => crate::window_actions::focus_window(app_handle, &label, |line| {
                        log::warn!("{line}")
                    }),
                    None => {
                        if let Err(error) = window_factory::create_primary_window(app_handle) {
                            log::error!("failed to recreate primary window on reactivation: {error}");
                        }
                    }
                }
            }
            _ => {}
        });
}
