use chrono::{Local, Locale};

const FALLBACK_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Payload for the once-per-window push delivered after content load,
/// rendered in the date-time convention of the environment's locale.
pub(crate) fn handshake_payload() -> String {
    let now = Local::now();
    match environment_locale() {
        Some(locale) => now.format_localized("%c", locale).to_string(),
        None => now.format(FALLBACK_TIMESTAMP_FORMAT).to_string(),
    }
}

fn environment_locale() -> Option<Locale> {
    for env_key in ["LC_ALL", "LC_TIME", "LANG"] {
        if let Ok(value) = std::env::var(env_key) {
            if let Some(locale) = parse_locale(&value) {
                return Some(locale);
            }
        }
    }
    None
}

/// Environment locales arrive as `en_US.UTF-8` or `en-US`; chrono wants the
/// bare `en_US` identifier.
fn parse_locale(raw: &str) -> Option<Locale> {
    let bare = raw
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim()
        .replace('-', "_");
    if bare.is_empty() {
        return None;
    }
    Locale::try_from(bare.as_str()).ok()
}
