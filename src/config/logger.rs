use tracing::info;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub fn initialize_logger() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_level(true)
        .with_file(true)
        .with_target(true)
        .pretty()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "polls_api=info,tower_http=info".into()),
        )
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        // already installed by an earlier call
        return;
    }
    info!("Logger Initialized:: ✅");
}
