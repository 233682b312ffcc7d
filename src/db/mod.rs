use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};

use crate::{config::Config, errors::AppResult, models::domain::Session};

const APP_NAME: &str = "quiz-engine";
const MAX_POOL_SIZE: u32 = 10;
const MIN_POOL_SIZE: u32 = 2;
const TIMEOUT: Duration = Duration::from_secs(5);

/// The database holding quiz sessions.
#[derive(Clone)]
pub struct Database {
    db: mongodb::Database,
}

impl Database {
    /// Opens the pool and fails fast when the server does not answer a ping.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let options = client_options(&config.mongo_conn_string).await?;
        let client = Client::with_options(options)?;
        let database = Self {
            db: client.database(&config.mongo_db_name),
        };

        database.ping().await?;
        log::info!("Connected to MongoDB database {}", config.mongo_db_name);

        Ok(database)
    }

    pub fn sessions(&self, collection_name: &str) -> Collection<Session> {
        self.db.collection(collection_name)
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

async fn client_options(conn_string: &str) -> AppResult<ClientOptions> {
    let mut options = ClientOptions::parse(conn_string).await?;
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.app_name = Some(APP_NAME.to_string());
    options.max_pool_size = Some(MAX_POOL_SIZE);
    options.min_pool_size = Some(MIN_POOL_SIZE);
    options.connect_timeout = Some(TIMEOUT);
    options.server_selection_timeout = Some(TIMEOUT);
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn client_options_carry_pool_and_timeouts() {
        let options = client_options("mongodb://localhost:27017").await.unwrap();

        assert_eq!(options.app_name.as_deref(), Some("quiz-engine"));
        assert_eq!(options.max_pool_size, Some(10));
        assert_eq!(options.min_pool_size, Some(2));
        assert_eq!(options.server_selection_timeout, Some(Duration::from_secs(5)));
        assert!(options.server_api.is_some());
    }

    #[tokio::test]
    async fn malformed_connection_string_is_a_database_error() {
        let result = client_options("not-a-mongo-uri").await;

        assert!(matches!(
            result,
            Err(crate::errors::AppError::DatabaseError(_))
        ));
    }

    #[test]
    fn database_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Database>();
    }
}
