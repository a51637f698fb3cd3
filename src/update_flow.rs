use std::{
    sync::Mutex,
    time::{Duration, Instant},
};

use tauri::{AppHandle, Manager};
use tauri_plugin_updater::{Update, UpdaterExt};

use crate::{
    update_confirm,
    update_events::{is_newer_version, UpdateAction},
    DownloadProgress, UpdateEvent, UpdateInfo, UpdateSession,
};

const PROGRESS_LOG_INTERVAL: Duration = Duration::from_millis(500);

/// Startup update check: once per process lifetime, packaged builds only,
/// after the primary window exists. Failures never leave the log sink.
pub(crate) fn spawn_startup_update_check(app_handle: &AppHandle) {
    if tauri::is_dev() {
        log::info!("development build; skipping update check");
        return;
    }

    let app_handle = app_handle.clone();
    tauri::async_runtime::spawn(async move {
        run_update_check(&app_handle).await;
    });
}

async fn run_update_check(app_handle: &AppHandle) {
    let session = Mutex::new(UpdateSession::new());
    let dispatch = |event: UpdateEvent| -> Option<UpdateInfo> {
        let actions = match session.lock() {
            Ok(mut guard) => guard.apply(event),
            Err(_) => Vec::new(),
        };
        perform_logged_actions(actions)
    };

    dispatch(UpdateEvent::CheckStarted);

    let updater = match app_handle.updater() {
        Ok(updater) => updater,
        Err(error) => {
            dispatch(UpdateEvent::Failed(format!(
                "failed to initialize updater: {error}"
            )));
            return;
        }
    };
    let current_version = app_handle.package_info().version.to_string();

    let update = match updater.check().await {
        Ok(Some(update)) => update,
        Ok(None) => {
            dispatch(UpdateEvent::UpToDate);
            return;
        }
        Err(error) => {
            dispatch(UpdateEvent::Failed(error.to_string()));
            return;
        }
    };

    if !is_newer_version(&current_version, &update.version) {
        dispatch(UpdateEvent::UpToDate);
        return;
    }
    dispatch(UpdateEvent::UpdateAvailable(update_info_from(&update)));

    let mut tracker = ProgressTracker::new();
    let downloaded_bytes = match update
        .download(
            |chunk_length, content_length| {
                if let Some(progress) = tracker.record(chunk_length as u64, content_length) {
                    dispatch(UpdateEvent::DownloadProgress(progress));
                }
            },
            || {},
        )
        .await
    {
        Ok(bytes) => bytes,
        Err(error) => {
            dispatch(UpdateEvent::Failed(error.to_string()));
            return;
        }
    };

    // The payload is staged; the session is terminal after this event and the
    // remaining decision belongs to the confirmation gate.
    let Some(info) = dispatch(UpdateEvent::Downloaded) else {
        return;
    };

    if update_confirm::prompt_restart(app_handle, &info) {
        update_confirm::install_and_restart(app_handle, &update, &downloaded_bytes);
    } else {
        log::info!("user deferred the update; it applies on next launch");
    }
}

/// Execute the log side effects of a transition and hand back a pending
/// install prompt, if any. Logging stays synchronous so this can run inside
/// the download progress callback.
fn perform_logged_actions(actions: Vec<UpdateAction>) -> Option<UpdateInfo> {
    let mut prompt = None;
    for action in actions {
        match action {
            UpdateAction::Log(line) => log::info!("{line}"),
            UpdateAction::PromptInstall(info) => prompt = Some(info),
        }
    }
    prompt
}

fn update_info_from(update: &Update) -> UpdateInfo {
    UpdateInfo {
        version: update.version.clone(),
        release_name: update.body.as_deref().and_then(release_name_from_notes),
        total_bytes: None,
    }
}

/// The feed carries free-form release notes; the first non-empty line doubles
/// as the release name in the confirmation dialog.
fn release_name_from_notes(notes: &str) -> Option<String> {
    notes
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Aggregates raw chunk callbacks into periodic progress snapshots so the log
/// is not flooded with one line per network read.
struct ProgressTracker {
    transferred: u64,
    window_start: Instant,
    window_bytes: u64,
}

impl ProgressTracker {
    fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            transferred: 0,
            window_start: now,
            window_bytes: 0,
        }
    }

    fn record(&mut self, chunk: u64, total: Option<u64>) -> Option<DownloadProgress> {
        self.record_at(Instant::now(), chunk, total)
    }

    fn record_at(&mut self, now: Instant, chunk: u64, total: Option<u64>) -> Option<DownloadProgress> {
        self.transferred = self.transferred.saturating_add(chunk);
        self.window_bytes = self.window_bytes.saturating_add(chunk);

        let elapsed = now.saturating_duration_since(self.window_start);
        let finished = total.is_some_and(|total| self.transferred >= total);
        if elapsed < PROGRESS_LOG_INTERVAL && !finished {
            return None;
        }

        let bytes_per_second = if elapsed.is_zero() {
            0
        } else {
            (self.window_bytes as f64 / elapsed.as_secs_f64()) as u64
        };
        let percent = total
            .filter(|total| *total > 0)
            .map(|total| self.transferred as f64 * 100.0 / total as f64)
            .unwrap_or(0.0);

        self.window_start = now;
        self.window_bytes = 0;

        Some(DownloadProgress {
            bytes_per_second,
            percent,
            transferred: self.transferred,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_withholds_snapshots_inside_the_log_interval() {
        let start = Instant::now();
        let mut tracker = ProgressTracker::starting_at(start);

        assert!(tracker
            .record_at(start + Duration::from_millis(100), 256, Some(4096))
            .is_none());
        assert!(tracker
            .record_at(start + Duration::from_millis(200), 256, Some(4096))
            .is_none());

        let snapshot = tracker
            .record_at(start + Duration::from_secs(1), 512, Some(4096))
            .expect("interval elapsed, snapshot due");
        assert_eq!(snapshot.transferred, 1024);
        assert_eq!(snapshot.total, Some(4096));
        assert_eq!(snapshot.percent, 25.0);
        assert_eq!(snapshot.bytes_per_second, 1024);
    }

    #[test]
    fn tracker_always_reports_the_final_chunk() {
        let start = Instant::now();
        let mut tracker = ProgressTracker::starting_at(start);

        let snapshot = tracker
            .record_at(start + Duration::from_millis(10), 4096, Some(4096))
            .expect("completed download must be reported");
        assert_eq!(snapshot.percent, 100.0);
    }

    #[test]
    fn tracker_rate_resets_per_window() {
        let start = Instant::now();
        let mut tracker = ProgressTracker::starting_at(start);

        let first = tracker
            .record_at(start + Duration::from_secs(1), 1000, Some(10_000))
            .expect("snapshot due");
        assert_eq!(first.bytes_per_second, 1000);

        let second = tracker
            .record_at(start + Duration::from_secs(3), 4000, Some(10_000))
            .expect("snapshot due");
        assert_eq!(second.bytes_per_second, 2000);
        assert_eq!(second.transferred, 5000);
    }

    #[test]
    fn unknown_total_reports_zero_percent() {
        let start = Instant::now();
        let mut tracker = ProgressTracker::starting_at(start);

        let snapshot = tracker
            .record_at(start + Duration::from_secs(1), 128, None)
            .expect("snapshot due");
        assert_eq!(snapshot.percent, 0.0);
        assert_eq!(snapshot.total, None);
    }

    #[test]
    fn updater_init_failure_ends_the_session_through_the_state_machine() {
        let mut session = UpdateSession::new();
        session.apply(UpdateEvent::CheckStarted);

        let actions = session.apply(UpdateEvent::Failed(
            "failed to initialize updater: endpoints missing".to_string(),
        ));
        assert!(actions.iter().any(|action| matches!(
            action,
            UpdateAction::Log(line) if line.contains("failed to initialize updater")
        )));
        assert!(perform_logged_actions(actions).is_none());

        // The failure is terminal; later events cannot produce a prompt.
        let late = session.apply(UpdateEvent::Downloaded);
        assert!(perform_logged_actions(late).is_none());
    }

    #[test]
    fn release_name_is_the_first_non_empty_notes_line() {
        assert_eq!(
            release_name_from_notes("\n  \nSpring Release\n- fixes\n"),
            Some("Spring Release".to_string())
        );
        assert_eq!(release_name_from_notes("   \n\t\n"), None);
    }
}
