use std::env;

use tauri::WebviewUrl;
use url::Url;

use crate::{
    DEFAULT_DEV_SERVER_HOST, DEFAULT_DEV_SERVER_PORT, DEV_SERVER_HOST_ENV, DEV_SERVER_PORT_ENV,
    PACKAGED_INDEX_PATH,
};

/// Where window content comes from. Development builds are served from a
/// local dev server addressed through the environment; packaged builds load
/// the bundled frontend. Resolved once at startup and shared by every window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ContentTarget {
    DevServer { base: Url },
    Packaged,
}

impl ContentTarget {
    pub(crate) fn from_environment() -> Self {
        if !tauri::is_dev() {
            return Self::Packaged;
        }

        let host =
            env::var(DEV_SERVER_HOST_ENV).unwrap_or_else(|_| DEFAULT_DEV_SERVER_HOST.to_string());
        let port = env::var(DEV_SERVER_PORT_ENV)
            .ok()
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_DEV_SERVER_PORT);

        match Self::dev_server(&host, port) {
            Ok(target) => target,
            Err(error) => {
                log::warn!("invalid dev server address ({error}); falling back to packaged content");
                Self::Packaged
            }
        }
    }

    pub(crate) fn dev_server(host: &str, port: u16) -> Result<Self, String> {
        let base = Url::parse(&format!("http://{host}:{port}/"))
            .map_err(|error| format!("cannot address dev server at {host}:{port}: {error}"))?;
        Ok(Self::DevServer { base })
    }

    /// Content address for a window, with an optional route fragment selecting
    /// a view inside the same bundle.
    pub(crate) fn webview_url(&self, route_fragment: Option<&str>) -> WebviewUrl {
        match self {
            Self::DevServer { base } => {
                let mut url = base.clone();
                url.set_fragment(route_fragment);
                WebviewUrl::External(url)
            }
            Self::Packaged => match route_fragment {
                Some(fragment) => WebviewUrl::App(format!("{PACKAGED_INDEX_PATH}#{fragment}").into()),
                None => WebviewUrl::App(PACKAGED_INDEX_PATH.into()),
            },
        }
    }
}
