use tracing::Level;

/// Installs a fmt subscriber for the process. Returns `false` when one is already set.
pub fn init(verbose: bool) -> bool {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .is_ok()
}
