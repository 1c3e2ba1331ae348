//! Opening the on-disk store and the gateway over it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use comicstore::{Gateway, GatewayConfig, store::InMemory};

use crate::cli::Cli;

pub const DB_FILE: &str = "comicstore.json";

/// A gateway together with the file its store is persisted to.
pub struct Workspace {
    pub gateway: Gateway,
    store: Arc<InMemory>,
    db_path: PathBuf,
}

impl Workspace {
    /// Load the store from the data directory and open a gateway over it.
    pub async fn open(cli: &Cli) -> Result<Self, Box<dyn std::error::Error>> {
        let data_dir = cli.data_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = match &cli.config {
            Some(path) => GatewayConfig::load(path).await?,
            None => GatewayConfig::default(),
        };

        let db_path = data_dir.join(DB_FILE);
        let store = Arc::new(InMemory::load_from_file(&db_path).await?);
        tracing::debug!("Using store at {}", db_path.display());

        let gateway = Gateway::open(store.clone(), config).await?;
        Ok(Self {
            gateway,
            store,
            db_path,
        })
    }

    /// Write the store back to disk.
    pub async fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.store.save_to_file(&self.db_path).await?;
        tracing::debug!("Saved store to {}", self.db_path.display());
        Ok(())
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}
