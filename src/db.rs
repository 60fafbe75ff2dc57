use crate::config::Config;
use crate::store::MongoStore;

pub async fn init_store(config: &Config) -> MongoStore {
    MongoStore::connect(&config.mongodb_url, &config.database_name)
        .await
        .expect("Failed to connect to database")
}
