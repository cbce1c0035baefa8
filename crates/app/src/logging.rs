//! Test logging initialisation.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a `tracing` subscriber that writes through the test harness'
/// captured output.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Safe to call from
/// every test; only the first call installs anything.
pub fn init_test_logging() {
    let installed = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!("test logging initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_initialisation_is_harmless() {
        init_test_logging();
        init_test_logging();
        tracing::info!("still logging");
    }
}
