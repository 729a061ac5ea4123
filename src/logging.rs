use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEBUG_ENV: &str = "NOTEWOLFY_DEBUG";

/// Sends tracing output to stderr when `RUST_LOG` is set or
/// `NOTEWOLFY_DEBUG=1`. Otherwise no subscriber is installed.
pub fn init() -> bool {
    let debug = std::env::var(DEBUG_ENV).is_ok_and(|value| value.trim() == "1");
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if debug => EnvFilter::new("notewolfy=debug"),
        Err(_) => return false,
    };

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(true),
    );
    if subscriber.try_init().is_err() {
        return false;
    }

    tracing::debug!("tracing initialized");
    true
}
