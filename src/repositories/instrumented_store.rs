use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::question::{Choice, Question},
    repositories::{memory_store::InMemoryQuestionStore, question_repository::QuestionStore},
};

/// In-memory store that counts choice lookups and can refuse batch choice writes.
#[derive(Default)]
pub struct InstrumentedStore {
    inner: InMemoryQuestionStore,
    choice_loads: AtomicUsize,
    fail_choice_batches: AtomicBool,
}

impl InstrumentedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn choice_loads(&self) -> usize {
        self.choice_loads.load(Ordering::SeqCst)
    }

    pub fn fail_choice_batches(&self) {
        self.fail_choice_batches.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl QuestionStore for InstrumentedStore {
    async fn list_questions(&self) -> AppResult<Vec<Question>> {
        self.inner.list_questions().await
    }

    async fn published_questions(&self, now: DateTime<Utc>) -> AppResult<Vec<Question>> {
        self.inner.published_questions(now).await
    }

    async fn get_question(&self, question_id: &str) -> AppResult<Option<Question>> {
        self.inner.get_question(question_id).await
    }

    async fn insert_question(&self, question: Question) -> AppResult<()> {
        self.inner.insert_question(question).await
    }

    async fn update_question(&self, question: &Question) -> AppResult<bool> {
        self.inner.update_question(question).await
    }

    async fn delete_question(&self, question_id: &str) -> AppResult<bool> {
        self.inner.delete_question(question_id).await
    }

    async fn choices_for(&self, question_id: &str) -> AppResult<Vec<Choice>> {
        self.choice_loads.fetch_add(1, Ordering::SeqCst);
        self.inner.choices_for(question_id).await
    }

    async fn insert_choice(&self, choice: Choice) -> AppResult<()> {
        self.inner.insert_choice(choice).await
    }

    async fn insert_choices(&self, choices: Vec<Choice>) -> AppResult<()> {
        if self.fail_choice_batches.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("choice batch rejected".to_string()));
        }
        self.inner.insert_choices(choices).await
    }

    async fn delete_choice(&self, question_id: &str, choice_id: &str) -> AppResult<bool> {
        self.inner.delete_choice(question_id, choice_id).await
    }

    async fn increment_votes(&self, question_id: &str, choice_id: &str) -> AppResult<bool> {
        self.inner.increment_votes(question_id, choice_id).await
    }
}
