use mongodb::{options::ClientOptions, Client, Database};
use std::sync::Arc;
use tracing::info;

use crate::error::AppResult;

pub async fn init_database(mongo_uri: &str, db_name: &str) -> AppResult<Arc<Database>> {
    let mut client_options = ClientOptions::parse(mongo_uri).await?;
    client_options.app_name = Some("PollsApi".to_string());

    let client = Client::with_options(client_options)?;
    let database = client.database(db_name);
    info!("Connected to MongoDB database {}", db_name);

    Ok(Arc::new(database))
}
