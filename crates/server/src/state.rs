use std::sync::Arc;

use tanya::{ChatEngine, IntentSet, MemoryCatalog, MemoryIntentStore, SeedData};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Answering engine (shared across requests)
    pub engine: Arc<ChatEngine>,
}

impl ServerState {
    /// Create new server state
    ///
    /// With the `backend-postgres` feature and a `database` section in the
    /// configuration, the engine reads intents and books from Postgres.
    /// Otherwise it serves from in-memory stores, optionally seeded from the
    /// configured JSON file.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let engine = build_engine(&config)?;
        Ok(Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
        })
    }
}

fn build_engine(config: &ServerConfig) -> ServerResult<ChatEngine> {
    if config.database.is_some() {
        #[cfg(feature = "backend-postgres")]
        return build_postgres_engine(config);
        #[cfg(not(feature = "backend-postgres"))]
        warn!("database configured but backend-postgres is disabled at compile time; using in-memory stores");
    }
    build_memory_engine(config)
}

#[cfg(feature = "backend-postgres")]
fn build_postgres_engine(config: &ServerConfig) -> ServerResult<ChatEngine> {
    use std::time::Duration;
    use tanya::{PostgresCatalog, PostgresConfig, PostgresIntentStore};

    let db = config
        .database
        .as_ref()
        .ok_or_else(|| ServerError::Config("database section missing".into()))?;
    let pg = PostgresConfig {
        host: db.host.clone(),
        port: db.port,
        user: db.user.clone(),
        password: db.password.clone(),
        dbname: db.dbname.clone(),
        connect_timeout: Duration::from_secs(db.connect_timeout_secs),
    };
    info!(host = %pg.host, dbname = %pg.dbname, "using postgres stores");
    let engine = ChatEngine::with_config(
        Arc::new(PostgresIntentStore::new(pg.clone())),
        Arc::new(PostgresCatalog::new(pg)),
        config.matching.clone(),
    )?;
    Ok(engine)
}

fn build_memory_engine(config: &ServerConfig) -> ServerResult<ChatEngine> {
    let seed = match &config.seed_file {
        Some(path) => {
            let seed =
                SeedData::from_file(path).map_err(|e| ServerError::Config(e.to_string()))?;
            info!(
                path,
                intents = seed.intents.len(),
                books = seed.books.len(),
                "loaded seed data"
            );
            seed
        }
        None => {
            warn!("no database and no seed file configured; starting with empty stores");
            SeedData::default()
        }
    };

    let engine = ChatEngine::with_config(
        Arc::new(MemoryIntentStore::new(IntentSet::new(seed.intents))),
        Arc::new(MemoryCatalog::new(seed.books)),
        config.matching.clone(),
    )?;
    Ok(engine)
}
