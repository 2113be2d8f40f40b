use env_logger::Env;

/// `RUST_LOG` wins; otherwise `info`.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}
