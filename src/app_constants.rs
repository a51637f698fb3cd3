pub(crate) const PRIMARY_WINDOW_LABEL: &str = "main";
pub(crate) const SECONDARY_WINDOW_PREFIX: &str = "secondary";
pub(crate) const WINDOW_TITLE: &str = "Vela";

/// Pushed into every window once its content finishes loading.
pub(crate) const HANDSHAKE_EVENT: &str = "main-process-message";

pub(crate) const DEV_SERVER_HOST_ENV: &str = "VELA_DEV_SERVER_HOST";
pub(crate) const DEV_SERVER_PORT_ENV: &str = "VELA_DEV_SERVER_PORT";
pub(crate) const DEFAULT_DEV_SERVER_HOST: &str = "127.0.0.1";
pub(crate) const DEFAULT_DEV_SERVER_PORT: u16 = 5173;

/// Entry document inside the bundled frontend, relative to the dist root.
pub(crate) const PACKAGED_INDEX_PATH: &str = "index.html";

pub(crate) const UPDATE_DIALOG_TITLE: &str = "App Update";
pub(crate) const RELEASE_NAME_FALLBACK: &str = "releaseName";

#[cfg(windows)]
pub(crate) const APP_USER_MODEL_ID: &str = "com.vela.shell";
