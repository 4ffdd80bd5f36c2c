//! `parokya-console` -- profile administration console.
//!
//! Connects to the profile backend, keeps the collection cached
//! locally, and offers an interactive shell for listing, adding,
//! editing, and deleting profiles.
//!
//! # Environment variables
//!
//! | Variable           | Required | Default                 | Description              |
//! |--------------------|----------|-------------------------|--------------------------|
//! | `PROFILES_API_URL` | no       | `http://localhost:8080` | Backend base HTTP URL    |
//! | `RUST_LOG`         | no       | `parokya_console=info`  | Tracing filter directive |

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parokya_cache::ProfileCache;
use parokya_client::{ClientConfig, ProfilesApi};
use parokya_console::shell::AdminShell;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parokya_console=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Loaded client configuration");

    let store = Arc::new(ProfilesApi::new(&config));
    let cache = ProfileCache::start(Arc::clone(&store) as Arc<dyn parokya_core::ProfileStore>);

    let mut shell = AdminShell::new(store, Arc::clone(&cache));
    if let Err(error) = shell.run().await {
        tracing::error!(%error, "Shell terminated with an error");
        cache.shutdown().await;
        std::process::exit(1);
    }

    cache.shutdown().await;
}
