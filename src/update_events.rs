use semver::Version;
use serde::Serialize;

/// Descriptor of an available update, produced when the feed reports a newer
/// version and consumed by the confirmation gate. The feed does not announce
/// the payload size up front; `total_bytes` fills in from the first download
/// progress snapshot that carries one.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UpdateInfo {
    pub(crate) version: String,
    pub(crate) release_name: Option<String>,
    pub(crate) total_bytes: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct DownloadProgress {
    pub(crate) bytes_per_second: u64,
    pub(crate) percent: f64,
    pub(crate) transferred: u64,
    pub(crate) total: Option<u64>,
}

impl DownloadProgress {
    pub(crate) fn describe(&self) -> String {
        let total = self
            .total
            .map(|total| total.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        format!(
            "Download speed: {} B/s - Downloaded {:.1}% ({}/{})",
            self.bytes_per_second, self.percent, self.transferred, total
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum UpdateEvent {
    CheckStarted,
    UpdateAvailable(UpdateInfo),
    UpToDate,
    DownloadProgress(DownloadProgress),
    Downloaded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UpdatePhase {
    Idle,
    Checking,
    UpdateAvailable,
    Downloading,
    Downloaded,
    UpToDate,
    Failed,
}

impl UpdatePhase {
    pub(crate) fn is_terminal(&self) -> bool {
        matches!(self, Self::Downloaded | Self::UpToDate | Self::Failed)
    }
}

/// Side effects requested by a transition. The caller performs them in order;
/// the session itself never touches the dialog or the log sink.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum UpdateAction {
    Log(String),
    PromptInstall(UpdateInfo),
}

/// One update-check session: `idle → checking → {no-update |
/// update-available → downloading → downloaded} | error`. Transitions are
/// pure; anything arriving out of order (including after a terminal phase)
/// is ignored with a log line.
#[derive(Debug)]
pub(crate) struct UpdateSession {
    phase: UpdatePhase,
    info: Option<UpdateInfo>,
}

impl UpdateSession {
    pub(crate) fn new() -> Self {
        Self {
            phase: UpdatePhase::Idle,
            info: None,
        }
    }

    pub(crate) fn apply(&mut self, event: UpdateEvent) -> Vec<UpdateAction> {
        match event {
            UpdateEvent::CheckStarted if self.phase == UpdatePhase::Idle => {
                self.phase = UpdatePhase::Checking;
                vec![UpdateAction::Log("Checking for update...".to_string())]
            }
            UpdateEvent::UpToDate if self.phase == UpdatePhase::Checking => {
                self.phase = UpdatePhase::UpToDate;
                vec![UpdateAction::Log("Update not available.".to_string())]
            }
            UpdateEvent::UpdateAvailable(info) if self.phase == UpdatePhase::Checking => {
                self.phase = UpdatePhase::UpdateAvailable;
                let line = format!("Update available: version {}", info.version);
                self.info = Some(info);
                vec![UpdateAction::Log(line)]
            }
            UpdateEvent::DownloadProgress(progress)
                if matches!(
                    self.phase,
                    UpdatePhase::UpdateAvailable | UpdatePhase::Downloading
                ) =>
            {
                self.phase = UpdatePhase::Downloading;
                if let Some(info) = self.info.as_mut() {
                    if info.total_bytes.is_none() {
                        info.total_bytes = progress.total;
                    }
                }
                vec![UpdateAction::Log(progress.describe())]
            }
            UpdateEvent::Downloaded
                if matches!(
                    self.phase,
                    UpdatePhase::UpdateAvailable | UpdatePhase::Downloading
                ) =>
            {
                self.phase = UpdatePhase::Downloaded;
                match self.info.clone() {
                    Some(info) => vec![
                        UpdateAction::Log("Update downloaded.".to_string()),
                        UpdateAction::PromptInstall(info),
                    ],
                    None => vec![UpdateAction::Log(
                        "update downloaded without update metadata; skipping install prompt"
                            .to_string(),
                    )],
                }
            }
            UpdateEvent::Failed(message) if !self.phase.is_terminal() => {
                self.phase = UpdatePhase::Failed;
                vec![UpdateAction::Log(format!("Error in update check: {message}"))]
            }
            other => vec![UpdateAction::Log(format!(
                "ignoring update event {other:?} in phase {:?}",
                self.phase
            ))],
        }
    }
}

/// The feed is trusted to report only newer versions, but a malformed or
/// stale feed entry should not trigger a pointless download.
pub(crate) fn is_newer_version(current: &str, latest: &str) -> bool {
    match (Version::parse(current), Version::parse(latest)) {
        (Ok(current), Ok(latest)) => latest > current,
        _ => current != latest,
    }
}
