use anyhow::Result;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs a global `fmt` subscriber filtered by `RUST_LOG`.
///
/// Call once at host start-up. A second call fails because a global subscriber is
/// already set.
pub fn init_tracing() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
