use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime as BsonDateTime},
    Collection, Database, IndexModel,
};
use tracing::{debug, info, warn};

use crate::{
    error::{AppResult, PollsError},
    models::question::{Choice, Question},
};

/// Record store for questions and their choices.
///
/// Implementations return questions newest first and choices in insertion order.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn list_questions(&self) -> AppResult<Vec<Question>>;

    /// Questions with `pub_date <= now`.
    async fn published_questions(&self, now: DateTime<Utc>) -> AppResult<Vec<Question>>;

    async fn get_question(&self, question_id: &str) -> AppResult<Option<Question>>;

    async fn insert_question(&self, question: Question) -> AppResult<()>;

    /// Returns false when no question with that id exists.
    async fn update_question(&self, question: &Question) -> AppResult<bool>;

    /// Removes the question together with all of its choices.
    async fn delete_question(&self, question_id: &str) -> AppResult<bool>;

    async fn choices_for(&self, question_id: &str) -> AppResult<Vec<Choice>>;

    async fn insert_choice(&self, choice: Choice) -> AppResult<()>;

    /// Inserts a batch of choices in one write.
    async fn insert_choices(&self, choices: Vec<Choice>) -> AppResult<()>;

    async fn delete_choice(&self, question_id: &str, choice_id: &str) -> AppResult<bool>;

    /// Adds one vote to the choice in a single atomic update. Returns false when
    /// the choice does not belong to the question, and
    /// `PollsError::VoteLimitReached` when the count is already `u32::MAX`.
    async fn increment_votes(&self, question_id: &str, choice_id: &str) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct MongoQuestionStore {
    questions: Collection<Question>,
    choices: Collection<Choice>,
}

impl MongoQuestionStore {
    pub fn new(db: Arc<Database>) -> Self {
        let questions = db.collection::<Question>("questions");
        let choices = db.collection::<Choice>("choices");
        Self { questions, choices }
    }

    /// Creates the indexes the read paths rely on.
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.choices
            .create_index(IndexModel::builder().keys(doc! { "question_id": 1 }).build())
            .await?;
        self.questions
            .create_index(IndexModel::builder().keys(doc! { "pub_date": -1 }).build())
            .await?;
        info!("MongoDB indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl QuestionStore for MongoQuestionStore {
    async fn list_questions(&self) -> AppResult<Vec<Question>> {
        let cursor = self
            .questions
            .find(doc! {})
            .sort(doc! { "pub_date": -1 })
            .await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn published_questions(&self, now: DateTime<Utc>) -> AppResult<Vec<Question>> {
        let now = BsonDateTime::from_millis(now.timestamp_millis());
        let cursor = self
            .questions
            .find(doc! { "pub_date": { "$lte": now } })
            .sort(doc! { "pub_date": -1 })
            .await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn get_question(&self, question_id: &str) -> AppResult<Option<Question>> {
        Ok(self.questions.find_one(doc! { "_id": question_id }).await?)
    }

    async fn insert_question(&self, question: Question) -> AppResult<()> {
        let result = self.questions.insert_one(&question).await?;
        debug!("Question saved with ID: {}", result.inserted_id);
        Ok(())
    }

    async fn update_question(&self, question: &Question) -> AppResult<bool> {
        let result = self
            .questions
            .replace_one(doc! { "_id": question.id.as_str() }, question)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_question(&self, question_id: &str) -> AppResult<bool> {
        if self.get_question(question_id).await?.is_none() {
            return Ok(false);
        }
        // choices go first so a failure in between never leaves orphans
        let removed = self
            .choices
            .delete_many(doc! { "question_id": question_id })
            .await?;
        let result = self.questions.delete_one(doc! { "_id": question_id }).await?;
        if result.deleted_count == 0 {
            return Ok(false);
        }
        info!(
            "Deleted question {} and {} choice(s)",
            question_id, removed.deleted_count
        );
        Ok(true)
    }

    async fn choices_for(&self, question_id: &str) -> AppResult<Vec<Choice>> {
        let cursor = self
            .choices
            .find(doc! { "question_id": question_id })
            .await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn insert_choice(&self, choice: Choice) -> AppResult<()> {
        self.choices.insert_one(&choice).await?;
        Ok(())
    }

    async fn insert_choices(&self, choices: Vec<Choice>) -> AppResult<()> {
        if choices.is_empty() {
            return Ok(());
        }
        let result = self.choices.insert_many(&choices).await?;
        debug!("{} choice(s) saved", result.inserted_ids.len());
        Ok(())
    }

    async fn delete_choice(&self, question_id: &str, choice_id: &str) -> AppResult<bool> {
        let result = self
            .choices
            .delete_one(doc! { "_id": choice_id, "question_id": question_id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn increment_votes(&self, question_id: &str, choice_id: &str) -> AppResult<bool> {
        let result = self
            .choices
            .update_one(
                doc! {
                    "_id": choice_id,
                    "question_id": question_id,
                    "votes": { "$lt": i64::from(u32::MAX) },
                },
                doc! { "$inc": { "votes": 1 } },
            )
            .await?;
        if result.matched_count > 0 {
            return Ok(true);
        }

        let at_limit = self
            .choices
            .find_one(doc! { "_id": choice_id, "question_id": question_id })
            .await?
            .is_some();
        if at_limit {
            warn!("Choice {} is at the vote limit", choice_id);
            return Err(PollsError::VoteLimitReached(choice_id.to_string()).into());
        }
        Ok(false)
    }
}
