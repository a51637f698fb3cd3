//! Platform accommodations that must run before the event loop is built.

#[cfg(windows)]
const WEBVIEW2_ARGS_ENV: &str = "WEBVIEW2_ADDITIONAL_BROWSER_ARGUMENTS";

pub(crate) fn apply_platform_accommodations() {
    #[cfg(windows)]
    {
        if legacy_windows_release() {
            disable_gpu_acceleration();
        }
        set_notification_identity();
    }
}

/// Windows 7 reports NT 6.1; its compositor misrenders GPU-accelerated
/// webviews.
#[cfg_attr(not(windows), allow(dead_code))]
fn is_legacy_nt(major: u32, minor: u32) -> bool {
    (major, minor) == (6, 1)
}

#[cfg_attr(not(windows), allow(dead_code))]
fn with_disable_gpu(existing: Option<&str>) -> String {
    match existing.map(str::trim).filter(|args| !args.is_empty()) {
        Some(args) if args.split_whitespace().any(|arg| arg == "--disable-gpu") => args.to_string(),
        Some(args) => format!("{args} --disable-gpu"),
        None => "--disable-gpu".to_string(),
    }
}

#[cfg(windows)]
fn legacy_windows_release() -> bool {
    windows_nt_version().is_some_and(|(major, minor)| is_legacy_nt(major, minor))
}

#[cfg(windows)]
fn windows_nt_version() -> Option<(u32, u32)> {
    use windows::Win32::System::SystemInformation::{GetVersionExW, OSVERSIONINFOW};

    let mut info = OSVERSIONINFOW {
        dwOSVersionInfoSize: std::mem::size_of::<OSVERSIONINFOW>() as u32,
        ..Default::default()
    };
    if !unsafe { GetVersionExW(&mut info) }.as_bool() {
        return None;
    }
    Some((info.dwMajorVersion, info.dwMinorVersion))
}

/// WebView2 reads extra browser arguments from the environment at webview
/// creation time, so this must happen before any window exists.
#[cfg(windows)]
fn disable_gpu_acceleration() {
    let merged = with_disable_gpu(std::env::var(WEBVIEW2_ARGS_ENV).ok().as_deref());
    std::env::set_var(WEBVIEW2_ARGS_ENV, &merged);
    log::info!("legacy Windows release detected; {WEBVIEW2_ARGS_ENV}={merged}");
}

/// Windows 10+ groups toast notifications by AppUserModelID.
#[cfg(windows)]
fn set_notification_identity() {
    use windows::core::HSTRING;
    use windows::Win32::UI::Shell::SetCurrentProcessExplicitAppUserModelID;

    let id = HSTRING::from(crate::APP_USER_MODEL_ID);
    if let Err(error) = unsafe { SetCurrentProcessExplicitAppUserModelID(&id) } {
        log::warn!("failed to set AppUserModelID: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::{is_legacy_nt, with_disable_gpu};

    #[test]
    fn only_nt_6_1_counts_as_legacy() {
        assert!(is_legacy_nt(6, 1));
        assert!(!is_legacy_nt(6, 2));
        assert!(!is_legacy_nt(6, 0));
        assert!(!is_legacy_nt(10, 0));
    }

    #[test]
    fn disable_gpu_merges_with_existing_arguments() {
        assert_eq!(with_disable_gpu(None), "--disable-gpu");
        assert_eq!(with_disable_gpu(Some("  ")), "--disable-gpu");
        assert_eq!(
            with_disable_gpu(Some("--no-sandbox")),
            "--no-sandbox --disable-gpu"
        );
        assert_eq!(with_disable_gpu(Some("--disable-gpu")), "--disable-gpu");
    }
}
