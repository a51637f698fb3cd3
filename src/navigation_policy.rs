use url::Url;

use crate::ContentTarget;

/// Outcome for a content-requested navigation away from the shell's own
/// content. Secure external targets go to the default browser; everything
/// else is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NavigationDecision {
    AllowInWindow,
    OpenExternally,
    Deny,
}

pub(crate) fn decide_navigation(target: &ContentTarget, requested: &Url) -> NavigationDecision {
    if requested.scheme() == "about" || is_shell_content(target, requested) {
        return NavigationDecision::AllowInWindow;
    }
    if requested.scheme() == "https" {
        return NavigationDecision::OpenExternally;
    }
    NavigationDecision::Deny
}

fn is_shell_content(target: &ContentTarget, requested: &Url) -> bool {
    match target {
        ContentTarget::DevServer { base } => {
            requested.scheme() == base.scheme()
                && requested.host_str() == base.host_str()
                && requested.port_or_known_default() == base.port_or_known_default()
        }
        // Packaged content is served from the custom protocol, which surfaces
        // as tauri://localhost (or *.tauri.localhost on Windows).
        ContentTarget::Packaged => {
            requested.scheme() == "tauri" || requested.host_str() == Some("tauri.localhost")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev_target() -> ContentTarget {
        ContentTarget::dev_server("localhost", 3000).expect("valid address")
    }

    fn parse(raw: &str) -> Url {
        Url::parse(raw).expect("test url should parse")
    }

    #[test]
    fn https_targets_open_in_the_external_browser() {
        let decision = decide_navigation(&dev_target(), &parse("https://example.com/"));
        assert_eq!(decision, NavigationDecision::OpenExternally);
    }

    #[test]
    fn plain_http_targets_are_dropped() {
        let decision = decide_navigation(&dev_target(), &parse("http://example.com/"));
        assert_eq!(decision, NavigationDecision::Deny);
    }

    #[test]
    fn file_targets_are_dropped() {
        let decision = decide_navigation(&ContentTarget::Packaged, &parse("file:///etc/passwd"));
        assert_eq!(decision, NavigationDecision::Deny);
    }

    #[test]
    fn the_dev_server_origin_stays_in_the_window() {
        let decision = decide_navigation(&dev_target(), &parse("http://localhost:3000/#/settings"));
        assert_eq!(decision, NavigationDecision::AllowInWindow);
    }

    #[test]
    fn a_different_port_on_the_dev_host_is_not_shell_content() {
        let decision = decide_navigation(&dev_target(), &parse("http://localhost:3001/"));
        assert_eq!(decision, NavigationDecision::Deny);
    }

    #[test]
    fn packaged_protocol_urls_stay_in_the_window() {
        let tauri_url = decide_navigation(&ContentTarget::Packaged, &parse("tauri://localhost/index.html"));
        assert_eq!(tauri_url, NavigationDecision::AllowInWindow);

        let windows_form =
            decide_navigation(&ContentTarget::Packaged, &parse("http://tauri.localhost/index.html"));
        assert_eq!(windows_form, NavigationDecision::AllowInWindow);
    }

    #[test]
    fn the_initial_blank_document_is_allowed() {
        let decision = decide_navigation(&ContentTarget::Packaged, &parse("about:blank"));
        assert_eq!(decision, NavigationDecision::AllowInWindow);
    }
}
