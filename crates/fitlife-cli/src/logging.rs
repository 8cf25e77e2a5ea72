use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Logs go to stderr so command output stays
/// pipeable.
pub fn init(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|e| {
        eprintln!("Invalid log filter '{level}' ({e}), falling back to 'info'");
        EnvFilter::new("info")
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
