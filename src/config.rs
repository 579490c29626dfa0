use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let log_filter =
            env::var("RUST_LOG").unwrap_or_else(|_| "info,storefront_schema=debug".to_string());
        Ok(Self {
            database_url,
            log_filter,
        })
    }

    /// Installs the global tracing subscriber for the binaries.
    pub fn init_tracing(&self) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(&self.log_filter))
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
