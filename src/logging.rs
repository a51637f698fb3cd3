/// Initialize the process-wide log sink. All lifecycle transitions are
/// reported here as human-readable status lines; nothing else surfaces them.
pub(crate) fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}
