use std::sync::Arc;

use tera::Tera;
use tracing::{info, warn};

use crate::{
    config::{db::init_database, settings::Settings, templates::init_templates},
    error::AppResult,
    repositories::{
        memory_store::InMemoryQuestionStore,
        question_repository::{MongoQuestionStore, QuestionStore},
    },
};

/// Shared by every request handler through an `Extension` layer.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn QuestionStore>,
    pub templates: Arc<Tera>,
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn new(store: Arc<dyn QuestionStore>, admin_token: Option<String>) -> AppResult<Self> {
        Ok(Self {
            store,
            templates: Arc::new(init_templates()?),
            admin_token,
        })
    }

    /// Picks the record store from the settings and wires the state together.
    pub async fn from_settings(settings: &Settings) -> AppResult<Self> {
        let store: Arc<dyn QuestionStore> = match &settings.mongo_uri {
            Some(mongo_uri) => {
                let db = init_database(mongo_uri, &settings.database_name).await?;
                let store = MongoQuestionStore::new(db);
                store.ensure_indexes().await?;
                info!("Using MongoDB question store");
                Arc::new(store)
            }
            None => {
                warn!("MONGO_URI not set, questions will only be kept in memory");
                Arc::new(InMemoryQuestionStore::new())
            }
        };

        if settings.admin_token.is_none() {
            warn!("ADMIN_TOKEN not set, the admin API is disabled");
        }

        Self::new(store, settings.admin_token.clone())
    }
}
